use super::header::HeaderError;
use headerdb_hashes::Hash;
use headerdb_math::TargetError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),

    #[error("block {block} does not connect to {parent}: its previous block is {prev_hash}")]
    ParentMismatch { block: Hash, parent: Hash, prev_hash: Hash },

    #[error("block {0} has invalid difficulty bits: {1}")]
    InvalidDifficultyBits(Hash, TargetError),

    #[error("block {0} has difficulty bits {1:#010x} with a target above the network limit")]
    TargetAbovePowLimit(Hash, u32),

    #[error("the network limit bits {0:#010x} are invalid")]
    InvalidPowLimit(u32),

    #[error("rejected by listener: {0}")]
    ListenerRejected(String),
}

pub type VerificationResult<T> = std::result::Result<T, VerificationError>;
