use crate::model::stores::{
    DB,
    chain_head::{ChainHeadStore, ChainHeadStoreReader, DbChainHeadStore},
    headers::{DbHeaderRecordStore, HeaderRecordStore, HeaderRecordStoreReader},
};
use headerdb_consensus_core::{config::params::Params, record::HeaderRecord};
use headerdb_core::{debug, info, warn};
use headerdb_database::prelude::{
    BatchDbWriter, CachePolicy, ConnBuilder, StoreError, StoreResult, StoreResultExt, delete_all_keys, delete_db,
};
use headerdb_hashes::Hash;
use parking_lot::Mutex;
use rocksdb::WriteBatch;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Number of records kept in the read cache by default
pub const DEFAULT_RECORDS_CACHE_SIZE: usize = 2048;

/// Storage of header records and of the chain head pointer.
///
/// Implementors must make every operation atomic with respect to the others.
pub trait ChainStore: Send + Sync {
    fn params(&self) -> &Params;

    /// Stores `record` under its hash, replacing any record already there
    fn put(&self, record: &HeaderRecord) -> StoreResult<()>;

    /// Returns `None` when no record is stored under `hash`
    fn get(&self, hash: Hash) -> StoreResult<Option<HeaderRecord>>;

    fn get_chain_head(&self) -> StoreResult<HeaderRecord>;

    /// Points the chain head at `record`. The record itself is expected to be stored already.
    fn set_chain_head(&self, record: &HeaderRecord) -> StoreResult<()>;

    /// The parent of `record`, if stored
    fn get_prev(&self, record: &HeaderRecord) -> StoreResult<Option<HeaderRecord>> {
        self.get(record.header().prev_hash)
    }
}

struct Inner {
    db: Arc<DB>,
    headers: DbHeaderRecordStore,
    chain_head: DbChainHeadStore,
}

impl Inner {
    fn clear_caches(&self) {
        self.headers.clear_cache();
        self.chain_head.clear_cache();
    }
}

/// A [`ChainStore`] persisted in RocksDB.
///
/// A store opened on an empty database is initialized with the genesis record of its network as chain head.
/// All operations are serialized by a store-wide lock.
pub struct HeaderStore {
    params: Arc<Params>,
    genesis: HeaderRecord,
    path: PathBuf,
    // `None` once closed
    inner: Mutex<Option<Inner>>,
}

impl HeaderStore {
    pub fn open(params: Params, conn_builder: ConnBuilder<PathBuf>) -> StoreResult<Self> {
        Self::open_with_cache_policy(params, conn_builder, CachePolicy::Count(DEFAULT_RECORDS_CACHE_SIZE))
    }

    pub fn open_with_cache_policy(params: Params, conn_builder: ConnBuilder<PathBuf>, cache_policy: CachePolicy) -> StoreResult<Self> {
        let genesis = params
            .genesis_record()
            .map_err(|err| StoreError::DataInconsistency(format!("the {} genesis is invalid: {}", params.net, err)))?;
        let params = Arc::new(params);
        let path = conn_builder.db_path().to_owned();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let db = conn_builder.build()?;
        let headers = DbHeaderRecordStore::new(db.clone(), params.clone(), cache_policy);
        let mut chain_head = DbChainHeadStore::new(db.clone());
        if chain_head.get().optional()?.is_none() {
            info!("Initializing the {} header store at {} with genesis {}", params.net, path.display(), genesis.hash());
            let mut batch = WriteBatch::default();
            headers.insert_batch(&mut batch, &genesis)?;
            chain_head.set_batch(&mut batch, genesis.hash())?;
            db.write(batch)?;
        } else {
            debug!("Opened the {} header store at {}", params.net, path.display());
        }

        Ok(Self { params, genesis, path, inner: Mutex::new(Some(Inner { db, headers, chain_head })) })
    }

    fn with_inner<T>(&self, op: impl FnOnce(&mut Inner) -> StoreResult<T>) -> StoreResult<T> {
        let mut guard = self.inner.lock();
        let inner = guard.as_mut().ok_or(StoreError::StoreClosed)?;
        op(inner)
    }

    /// The record an empty store starts with
    pub fn genesis(&self) -> &HeaderRecord {
        &self.genesis
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_none()
    }

    /// Removes every record and leaves only the genesis record as chain head.
    ///
    /// Deletions and the genesis rewrite go through a single write batch, so the database never ends up
    /// without a chain head.
    pub fn reset(&self) -> StoreResult<()> {
        self.with_inner(|inner| {
            let mut batch = WriteBatch::default();
            let deleted = delete_all_keys(&inner.db, BatchDbWriter::new(&mut batch))?;
            inner.headers.insert_batch(&mut batch, &self.genesis)?;
            inner.chain_head.set_batch(&mut batch, self.genesis.hash())?;
            let result = inner.db.write(batch);
            inner.clear_caches();
            result?;
            info!("Reset the header store at {}, {} keys were removed", self.path.display(), deleted);
            Ok(())
        })
    }

    /// Flushes and releases the database. Further operations fail with [`StoreError::StoreClosed`].
    /// Closing a closed store does nothing.
    pub fn close(&self) -> StoreResult<()> {
        let Some(inner) = self.inner.lock().take() else {
            return Ok(());
        };
        let result = inner.db.flush();
        drop(inner);
        info!("Closed the header store at {}", self.path.display());
        result.map_err(StoreError::from)
    }

    /// Deletes the database from disk. The store must be closed first.
    pub fn destroy(&self) -> StoreResult<()> {
        let guard = self.inner.lock();
        if guard.is_some() {
            return Err(StoreError::StoreStillOpen(self.path.clone()));
        }
        delete_db(&self.path)?;
        info!("Destroyed the header store at {}", self.path.display());
        Ok(())
    }
}

impl ChainStore for HeaderStore {
    fn params(&self) -> &Params {
        &self.params
    }

    fn put(&self, record: &HeaderRecord) -> StoreResult<()> {
        self.with_inner(|inner| inner.headers.insert(record))
    }

    fn get(&self, hash: Hash) -> StoreResult<Option<HeaderRecord>> {
        self.with_inner(|inner| inner.headers.get(hash).optional())
    }

    fn get_chain_head(&self) -> StoreResult<HeaderRecord> {
        self.with_inner(|inner| {
            let head = inner.chain_head.get()?;
            inner
                .headers
                .get(head)
                .optional()?
                .ok_or_else(|| StoreError::DataInconsistency(format!("chain head {head} has no stored record")))
        })
    }

    fn set_chain_head(&self, record: &HeaderRecord) -> StoreResult<()> {
        self.with_inner(|inner| inner.chain_head.set(record.hash()))
    }
}

impl Drop for HeaderStore {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.get_mut().take() {
            if let Err(err) = inner.db.flush() {
                warn!("Failed flushing the header store at {} on drop: {}", self.path.display(), err);
            }
        }
    }
}
