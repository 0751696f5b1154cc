use crate::prelude::DB;
use rocksdb::WriteBatch;

/// Destination of store writes: the DB itself, or a batch committed later in one atomic write.
pub trait DbWriter {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), rocksdb::Error>;
    fn delete(&mut self, key: &[u8]) -> Result<(), rocksdb::Error>;
}

/// Writes straight to the DB, one operation at a time
pub struct DirectDbWriter<'a>(&'a DB);

impl<'a> DirectDbWriter<'a> {
    pub fn new(db: &'a DB) -> Self {
        Self(db)
    }
}

impl DbWriter for DirectDbWriter<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), rocksdb::Error> {
        self.0.put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), rocksdb::Error> {
        self.0.delete(key)
    }
}

/// Appends to a [`WriteBatch`] owned by the caller. Nothing reaches the DB until the batch is written.
pub struct BatchDbWriter<'a>(&'a mut WriteBatch);

impl<'a> BatchDbWriter<'a> {
    pub fn new(batch: &'a mut WriteBatch) -> Self {
        Self(batch)
    }
}

impl DbWriter for BatchDbWriter<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), rocksdb::Error> {
        self.0.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), rocksdb::Error> {
        self.0.delete(key);
        Ok(())
    }
}
