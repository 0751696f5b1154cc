use headerdb_database::prelude::{BatchDbWriter, CachedDbItem, DB, DirectDbWriter, HashCodec, StoreResult};
use headerdb_database::registry::CHAIN_HEAD_KEY;
use headerdb_hashes::Hash;
use rocksdb::WriteBatch;
use std::sync::Arc;

/// Reader API for `ChainHeadStore`.
pub trait ChainHeadStoreReader {
    fn get(&self) -> StoreResult<Hash>;
}

pub trait ChainHeadStore: ChainHeadStoreReader {
    fn set(&mut self, hash: Hash) -> StoreResult<()>;
}

/// A DB + cache implementation of `ChainHeadStore` trait
#[derive(Clone)]
pub struct DbChainHeadStore {
    db: Arc<DB>,
    access: CachedDbItem<Hash, HashCodec>,
}

impl DbChainHeadStore {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbItem::new(db, CHAIN_HEAD_KEY.to_vec(), HashCodec) }
    }

    pub fn set_batch(&mut self, batch: &mut WriteBatch, hash: Hash) -> StoreResult<()> {
        self.access.write(BatchDbWriter::new(batch), &hash)
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}

impl ChainHeadStoreReader for DbChainHeadStore {
    fn get(&self) -> StoreResult<Hash> {
        self.access.read()
    }
}

impl ChainHeadStore for DbChainHeadStore {
    fn set(&mut self, hash: Hash) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), &hash)
    }
}
