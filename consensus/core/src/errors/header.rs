use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("expected {expected} header bytes but got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

pub type HeaderResult<T> = std::result::Result<T, HeaderError>;
