use super::header::HeaderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompactError {
    #[error("a compact record is {expected} bytes but got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("chain work needs {needed} bytes but only {capacity} are available")]
    ChainWorkOverflow { needed: usize, capacity: usize },

    #[error("height {0} does not fit the compact record")]
    HeightOverflow(u32),

    #[error("negative height {0} in compact record")]
    NegativeHeight(i32),

    #[error("malformed header in compact record: {0}")]
    MalformedHeader(#[from] HeaderError),
}

pub type CompactResult<T> = std::result::Result<T, CompactError>;
