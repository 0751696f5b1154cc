use headerdb_hashes::{Hash, Hasher, TransactionHash};
use std::sync::Arc;

pub type TransactionId = Hash;

/// An opaque serialized transaction.
///
/// Transactions are never persisted, they only travel along blocks to chain listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    bytes: Arc<[u8]>,
    id: TransactionId,
}

impl Transaction {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let id = TransactionHash::hash(&bytes);
        Self { bytes, id }
    }

    /// Double-SHA256 of the serialized transaction
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
