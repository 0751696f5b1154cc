use crate::{
    codec::ValueCodec,
    db::DB,
    errors::{StoreError, StoreResult},
};

use super::prelude::{DbKey, DbWriter};
use parking_lot::RwLock;
use std::sync::Arc;

/// A cached DB item with concurrency support
#[derive(Clone)]
pub struct CachedDbItem<T, C> {
    db: Arc<DB>,
    key: Vec<u8>,
    codec: C,
    cached_item: Arc<RwLock<Option<T>>>,
}

impl<T, C> CachedDbItem<T, C>
where
    T: Clone,
    C: ValueCodec<T>,
{
    pub fn new(db: Arc<DB>, key: Vec<u8>, codec: C) -> Self {
        Self { db, key, codec, cached_item: Arc::new(RwLock::new(None)) }
    }

    pub fn read(&self) -> StoreResult<T> {
        if let Some(item) = self.cached_item.read().clone() {
            return Ok(item);
        }
        if let Some(slice) = self.db.get_pinned(&self.key)? {
            let item = self.codec.decode(&slice)?;
            *self.cached_item.write() = Some(item.clone());
            Ok(item)
        } else {
            Err(StoreError::KeyNotFound(DbKey::new(&self.key)))
        }
    }

    pub fn write(&mut self, mut writer: impl DbWriter, item: &T) -> StoreResult<()> {
        let bin_data = self.codec.encode(item)?;
        writer.put(&self.key, &bin_data)?;
        *self.cached_item.write() = Some(item.clone());
        Ok(())
    }

    pub fn clear_cache(&self) {
        *self.cached_item.write() = None;
    }
}
