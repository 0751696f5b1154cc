use crate::{db::DB, errors::StoreResult};
use headerdb_core::{info, warn};
use rocksdb::{BlockBasedOptions, ErrorKind};
use std::{path::PathBuf, sync::Arc};

const KB: usize = 1024;
const MB: usize = 1024 * KB;

#[derive(Debug)]
pub struct Unspecified;

#[derive(Debug)]
pub struct ConnBuilder<Path> {
    db_path: Path,
    create_if_missing: bool,
    repair_if_corrupted: bool,
    parallelism: usize,
    files_limit: i32,
    mem_budget: usize,
}

impl Default for ConnBuilder<Unspecified> {
    fn default() -> Self {
        ConnBuilder {
            db_path: Unspecified,
            create_if_missing: true,
            repair_if_corrupted: true,
            parallelism: 1,
            files_limit: 128,
            mem_budget: 16 * MB,
        }
    }
}

impl<Path> ConnBuilder<Path> {
    pub fn with_db_path(self, db_path: PathBuf) -> ConnBuilder<PathBuf> {
        ConnBuilder {
            db_path,
            create_if_missing: self.create_if_missing,
            repair_if_corrupted: self.repair_if_corrupted,
            parallelism: self.parallelism,
            files_limit: self.files_limit,
            mem_budget: self.mem_budget,
        }
    }
    pub fn with_create_if_missing(self, create_if_missing: bool) -> ConnBuilder<Path> {
        ConnBuilder { create_if_missing, ..self }
    }
    pub fn with_repair_if_corrupted(self, repair_if_corrupted: bool) -> ConnBuilder<Path> {
        ConnBuilder { repair_if_corrupted, ..self }
    }
    pub fn with_parallelism(self, parallelism: impl Into<usize>) -> ConnBuilder<Path> {
        ConnBuilder { parallelism: parallelism.into(), ..self }
    }
    pub fn with_mem_budget(self, mem_budget: impl Into<usize>) -> ConnBuilder<Path> {
        ConnBuilder { mem_budget: mem_budget.into(), ..self }
    }
    pub fn with_files_limit(self, files_limit: impl Into<i32>) -> ConnBuilder<Path> {
        ConnBuilder { files_limit: files_limit.into(), ..self }
    }
}

macro_rules! default_opts {
    ($self: expr) => {{
        let mut opts = rocksdb::Options::default();
        if $self.parallelism > 1 {
            opts.increase_parallelism($self.parallelism as i32);
        }

        // Records are small and append mostly, a single write buffer sized by the budget suffices
        opts.set_write_buffer_size(($self.mem_budget / 2).max(MB));
        opts.set_keep_log_file_num(1);
        opts.set_bytes_per_sync(MB as u64);

        let mut b_opts = BlockBasedOptions::default();
        b_opts.set_bloom_filter(10.0, false);
        b_opts.set_block_size(16 * KB);
        opts.set_block_based_table_factory(&b_opts);

        opts.set_max_open_files($self.files_limit);
        opts.create_if_missing($self.create_if_missing);
        opts
    }};
}

impl ConnBuilder<PathBuf> {
    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Opens the DB. If the engine reports corruption or an IO failure and repair is enabled,
    /// one repair is attempted followed by a single retry.
    pub fn build(self) -> StoreResult<Arc<DB>> {
        let opts = default_opts!(self);
        match DB::open(&opts, &self.db_path) {
            Ok(db) => Ok(Arc::new(db)),
            Err(err) if self.repair_if_corrupted && matches!(err.kind(), ErrorKind::Corruption | ErrorKind::IOError) => {
                warn!("Failed opening the database at {}: {}. Attempting a repair", self.db_path.display(), err);
                DB::repair(&opts, &self.db_path)?;
                let db = DB::open(&opts, &self.db_path)?;
                info!("Database at {} was repaired", self.db_path.display());
                Ok(Arc::new(db))
            }
            Err(err) => Err(err.into()),
        }
    }
}
