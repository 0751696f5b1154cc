#![allow(dead_code)]

use headerdb_consensus::HeaderStore;
use headerdb_consensus_core::{config::params::Params, header::Header, record::HeaderRecord};
use headerdb_database::prelude::ConnBuilder;
use headerdb_hashes::Hash;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn conn_builder(path: &Path) -> ConnBuilder<PathBuf> {
    ConnBuilder::default().with_db_path(path.to_owned()).with_files_limit(10)
}

/// Opens a store on a fresh temp directory. The directory lives as long as the returned guard.
pub fn open_temp_store(params: Params) -> (TempDir, HeaderStore) {
    let tempdir = tempfile::Builder::new().prefix("headerdb-store-test").tempdir().unwrap();
    let store = HeaderStore::open(params, conn_builder(&tempdir.path().join("headers"))).unwrap();
    (tempdir, store)
}

/// A header pointing at `parent` with the given difficulty bits. `salt` tells siblings apart.
pub fn child_header(parent: &HeaderRecord, bits: u32, salt: u64) -> Header {
    Header::new(4, parent.hash(), Hash::from(salt), parent.header().timestamp + 600, bits, salt as u32)
}
