use crate::{
    cache::CachePolicy,
    codec::ValueCodec,
    db::DB,
    errors::{StoreError, StoreResult},
};

use super::prelude::{Cache, DbKey, DbWriter};
use std::{collections::hash_map::RandomState, hash::BuildHasher, sync::Arc};

/// A concurrent DB store access with typed caching.
///
/// Keys are written as-is, without a bucket prefix, and values go through the codec `C`.
#[derive(Clone)]
pub struct CachedDbAccess<TKey, TData, C, S = RandomState>
where
    TKey: Clone + std::hash::Hash + Eq + Send + Sync,
    TData: Clone + Send + Sync,
{
    db: Arc<DB>,

    // Cache
    cache: Cache<TKey, TData, S>,

    codec: C,
}

impl<TKey, TData, C, S> CachedDbAccess<TKey, TData, C, S>
where
    TKey: Clone + std::hash::Hash + Eq + Send + Sync + AsRef<[u8]>,
    TData: Clone + Send + Sync,
    C: ValueCodec<TData>,
    S: BuildHasher + Default,
{
    pub fn new(db: Arc<DB>, cache_policy: CachePolicy, codec: C) -> Self {
        Self { db, cache: Cache::new(cache_policy), codec }
    }

    pub fn has(&self, key: &TKey) -> StoreResult<bool> {
        Ok(self.cache.contains_key(key) || self.db.get_pinned(key)?.is_some())
    }

    pub fn read(&self, key: &TKey) -> StoreResult<TData> {
        if let Some(data) = self.cache.get(key) {
            Ok(data)
        } else if let Some(slice) = self.db.get_pinned(key)? {
            let data = self.codec.decode(&slice)?;
            self.cache.insert(key.clone(), data.clone());
            Ok(data)
        } else {
            Err(StoreError::KeyNotFound(DbKey::new(key)))
        }
    }

    /// Encodes and writes `data`. An existing value under `key` is replaced.
    pub fn write(&self, mut writer: impl DbWriter, key: TKey, data: TData) -> StoreResult<()> {
        // Encode first so that a failure leaves both cache and DB untouched
        let bin_data = self.codec.encode(&data)?;
        writer.put(key.as_ref(), &bin_data)?;
        self.cache.insert(key, data);
        Ok(())
    }

    pub fn clear_cache(&self) {
        self.cache.remove_all();
    }
}
