use crate::{errors::StoreResult, writer::DbWriter};
use rocksdb::{DBWithThreadMode, IteratorMode, MultiThreaded};
use std::path::Path;

pub use conn_builder::ConnBuilder;

mod conn_builder;

/// The DB type used for header stores
pub type DB = DBWithThreadMode<MultiThreaded>;

/// Deletes an existing DB if it exists, along with its directory
pub fn delete_db(db_dir: &Path) -> StoreResult<()> {
    if !db_dir.exists() {
        return Ok(());
    }
    let options = rocksdb::Options::default();
    DB::destroy(&options, db_dir)?;
    if db_dir.exists() {
        std::fs::remove_dir_all(db_dir)?;
    }
    Ok(())
}

/// Issues a delete for every key currently in `db` and returns the number of keys scanned.
///
/// With a batch writer nothing changes until the caller applies the batch.
pub fn delete_all_keys(db: &DB, mut writer: impl DbWriter) -> StoreResult<usize> {
    let mut count = 0;
    for item in db.iterator(IteratorMode::Start) {
        let (key, _) = item?;
        writer.delete(&key)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        create_temp_db,
        prelude::{BatchDbWriter, DirectDbWriter},
    };
    use rocksdb::WriteBatch;

    #[test]
    fn test_delete_all_keys() {
        let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
        for i in 0..16u8 {
            db.put([i; 4], [i]).unwrap();
        }

        let mut batch = WriteBatch::default();
        assert_eq!(delete_all_keys(&db, BatchDbWriter::new(&mut batch)).unwrap(), 16);
        assert_eq!(db.iterator(IteratorMode::Start).count(), 16);
        db.write(batch).unwrap();
        assert_eq!(db.iterator(IteratorMode::Start).count(), 0);

        db.put(b"a", b"b").unwrap();
        assert_eq!(delete_all_keys(&db, DirectDbWriter::new(&db)).unwrap(), 1);
        assert_eq!(delete_all_keys(&db, DirectDbWriter::new(&db)).unwrap(), 0);
    }

    #[test]
    fn test_delete_db() {
        let tempdir = tempfile::tempdir().unwrap();
        let db_path = tempdir.path().join("db");
        {
            let db = ConnBuilder::default().with_db_path(db_path.clone()).build().unwrap();
            db.put(b"key", b"value").unwrap();
        }
        assert!(db_path.exists());
        delete_db(&db_path).unwrap();
        assert!(!db_path.exists());
        // Deleting a missing DB is a no-op
        delete_db(&db_path).unwrap();
    }
}
