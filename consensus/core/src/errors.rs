pub mod compact;
pub mod header;
pub mod verification;
