pub mod chain_head;
pub mod headers;

pub use headerdb_database;
pub use headerdb_database::prelude::DB;
