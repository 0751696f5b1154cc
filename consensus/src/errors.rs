use headerdb_consensus_core::errors::verification::VerificationError;
use headerdb_database::prelude::StoreError;
use headerdb_hashes::Hash;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("verification error: {0}")]
    VerificationError(#[from] VerificationError),

    #[error("block {0} has an unknown parent {1}")]
    MissingParent(Hash, Hash),
}

pub type ChainResult<T> = std::result::Result<T, ChainError>;
