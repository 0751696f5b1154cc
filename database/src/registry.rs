//! Reserved database keys.
//!
//! Header records are keyed by the raw 32 bytes of their block hash, with no prefix. Reserved keys
//! therefore must never be 32 bytes long.

/// Key under which the hash of the current chain head is stored
pub const CHAIN_HEAD_KEY: &[u8] = b"chainhead";
