pub mod errors;
pub mod header_store;
pub mod model;
pub mod processes;

pub use header_store::{ChainStore, HeaderStore};
