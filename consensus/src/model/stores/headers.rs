use headerdb_consensus_core::{
    config::params::Params,
    record::{HeaderRecord, compact},
};
use headerdb_database::prelude::{
    BatchDbWriter, CachePolicy, CachedDbAccess, DB, DirectDbWriter, StoreError, StoreResult, ValueCodec,
};
use headerdb_hashes::Hash;
use rocksdb::WriteBatch;
use std::sync::Arc;

pub trait HeaderRecordStoreReader {
    fn get(&self, hash: Hash) -> StoreResult<HeaderRecord>;
    fn has(&self, hash: Hash) -> StoreResult<bool>;
}

pub trait HeaderRecordStore: HeaderRecordStoreReader {
    // Upsert: an existing record under the same hash is replaced
    fn insert(&self, record: &HeaderRecord) -> StoreResult<()>;
}

/// Stores records in their fixed width compact form
#[derive(Clone)]
pub struct CompactRecordCodec {
    params: Arc<Params>,
}

impl CompactRecordCodec {
    pub fn new(params: Arc<Params>) -> Self {
        Self { params }
    }
}

impl ValueCodec<HeaderRecord> for CompactRecordCodec {
    fn encode(&self, value: &HeaderRecord) -> StoreResult<Vec<u8>> {
        Ok(compact::encode(value).map_err(StoreError::codec)?.to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> StoreResult<HeaderRecord> {
        compact::decode(bytes, &self.params).map_err(StoreError::codec)
    }
}

/// A DB + cache implementation of `HeaderRecordStore` trait, with concurrency support.
///
/// Records are keyed by the bytes of their block hash.
#[derive(Clone)]
pub struct DbHeaderRecordStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, HeaderRecord, CompactRecordCodec>,
}

impl DbHeaderRecordStore {
    pub fn new(db: Arc<DB>, params: Arc<Params>, cache_policy: CachePolicy) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_policy, CompactRecordCodec::new(params)) }
    }

    pub fn insert_batch(&self, batch: &mut WriteBatch, record: &HeaderRecord) -> StoreResult<()> {
        self.access.write(BatchDbWriter::new(batch), record.hash(), record.clone())
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}

impl HeaderRecordStoreReader for DbHeaderRecordStore {
    fn get(&self, hash: Hash) -> StoreResult<HeaderRecord> {
        self.access.read(&hash)
    }

    fn has(&self, hash: Hash) -> StoreResult<bool> {
        self.access.has(&hash)
    }
}

impl HeaderRecordStore for DbHeaderRecordStore {
    fn insert(&self, record: &HeaderRecord) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), record.hash(), record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headerdb_consensus_core::{config::params::REGTEST_PARAMS, errors::compact::CompactError};
    use headerdb_database::{create_temp_db, prelude::ConnBuilder};
    use headerdb_math::ChainWork;

    #[test]
    fn test_insert_and_get() {
        let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
        let store = DbHeaderRecordStore::new(db.clone(), Arc::new(REGTEST_PARAMS), CachePolicy::Count(16));
        let genesis = REGTEST_PARAMS.genesis_record().unwrap();

        assert!(!store.has(genesis.hash()).unwrap());
        store.insert(&genesis).unwrap();
        store.clear_cache();
        assert_eq!(store.get(genesis.hash()).unwrap(), genesis);

        // The raw value is the 96 byte compact form
        let raw = db.get(genesis.hash()).unwrap().unwrap();
        assert_eq!(raw, compact::encode(&genesis).unwrap().to_vec());
    }

    #[test]
    fn test_capacity_violation_is_a_codec_error() {
        let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
        let store = DbHeaderRecordStore::new(db.clone(), Arc::new(REGTEST_PARAMS), CachePolicy::Count(16));
        let genesis = REGTEST_PARAMS.genesis_record().unwrap();
        let too_much_work = ChainWork::from_be_bytes(&[0x01; 13]);
        let record = HeaderRecord::new(genesis.header().clone(), too_much_work, 0);

        match store.insert(&record) {
            Err(StoreError::CodecError(err)) => {
                assert!(matches!(err.downcast_ref::<CompactError>(), Some(CompactError::ChainWorkOverflow { needed: 13, .. })))
            }
            other => panic!("expected a codec error, got {other:?}"),
        }
        // Nothing was written or cached
        assert!(!store.has(genesis.hash()).unwrap());
    }
}
