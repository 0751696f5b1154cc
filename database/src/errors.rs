use crate::prelude::DbKey;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key {0} not found in store")]
    KeyNotFound(DbKey),

    #[error("data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("rocksdb error {0}")]
    DbError(#[from] rocksdb::Error),

    /// A stored value could not be encoded or decoded
    #[error("value codec error: {0}")]
    CodecError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("the store is closed")]
    StoreClosed,

    #[error("the store at {0} is still open")]
    StoreStillOpen(PathBuf),

    #[error("io error {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn codec(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::CodecError(Box::new(err))
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait StoreResultExt<T> {
    /// Converts a "key not found" error into absence.
    ///
    /// Mapping:
    /// - `Ok(v)` -> `Ok(Some(v))`
    /// - `Err(KeyNotFound)` -> `Ok(None)`
    /// - any other `Err(e)` -> `Err(e)`
    fn optional(self) -> StoreResult<Option<T>>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn optional(self) -> StoreResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_key_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
