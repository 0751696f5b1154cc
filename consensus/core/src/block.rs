use crate::{header::Header, tx::Transaction};
use headerdb_hashes::Hash;
use std::sync::Arc;

/// A block: a header and its transactions
#[derive(Clone, Debug)]
pub struct Block {
    pub header: Arc<Header>,
    pub transactions: Arc<Vec<Transaction>>,
}

impl Block {
    pub fn new(header: Header, txs: Vec<Transaction>) -> Self {
        Self { header: Arc::new(header), transactions: Arc::new(txs) }
    }

    pub fn from_header(header: Header) -> Self {
        Self { header: Arc::new(header), transactions: Arc::new(Vec::new()) }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    /// The header alone, with the transactions stripped
    pub fn to_header(&self) -> Header {
        self.header.as_ref().clone()
    }

    pub fn is_header_only(&self) -> bool {
        self.transactions.is_empty()
    }
}
