use crate::db::DB;
use std::{sync::Weak, thread, time::Duration};
use tempfile::TempDir;

/// Keeps a temporary DB directory alive as long as the DB it hosts.
///
/// On drop, waits briefly for all DB references to be released and then removes the directory.
pub struct DbLifetime {
    weak_db_ref: Weak<DB>,
    optional_tempdir: Option<TempDir>,
}

impl DbLifetime {
    pub fn new(tempdir: TempDir, weak_db_ref: Weak<DB>) -> Self {
        Self { optional_tempdir: Some(tempdir), weak_db_ref }
    }
}

impl Drop for DbLifetime {
    fn drop(&mut self) {
        for _ in 0..16 {
            if self.weak_db_ref.strong_count() > 0 {
                // Sometimes another thread is shutting-down and cleaning resources
                thread::sleep(Duration::from_millis(1000));
            } else {
                break;
            }
        }
        assert_eq!(self.weak_db_ref.strong_count(), 0, "DB is expected to have no strong references when lifetime is dropped");
        if let Some(dir) = self.optional_tempdir.take() {
            let _ = dir.close();
        }
    }
}

pub fn get_headerdb_tempdir() -> std::io::Result<TempDir> {
    tempfile::Builder::new().prefix("headerdb-rust").tempdir()
}

/// Creates a DB within a temp directory under `<OS SPECIFIC TEMP DIR>/headerdb-rust`
/// Callers must keep the `DbLifetime` guard for as long as they wish the DB to exist.
#[macro_export]
macro_rules! create_temp_db {
    ($conn_builder: expr) => {{
        let db_tempdir = $crate::utils::get_headerdb_tempdir().unwrap();
        let db_path = db_tempdir.path().to_owned();
        let db = $conn_builder.with_db_path(db_path).build().unwrap();
        ($crate::utils::DbLifetime::new(db_tempdir, std::sync::Arc::downgrade(&db)), db)
    }};
}
