pub mod block;
pub mod config;
pub mod errors;
pub mod header;
pub mod listener;
pub mod network;
pub mod record;
pub mod tx;

pub use headerdb_hashes::{HASH_SIZE, Hash};
pub use headerdb_math::ChainWork;
