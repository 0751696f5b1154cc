mod common;

use common::{child_header, conn_builder, open_temp_store};
use headerdb_consensus::{ChainStore, HeaderStore};
use headerdb_consensus_core::{
    config::params::{MAINNET_PARAMS, Params, REGTEST_PARAMS},
    errors::compact::CompactError,
    record::HeaderRecord,
};
use headerdb_database::prelude::{CachePolicy, StoreError};
use headerdb_hashes::Hash;
use headerdb_math::ChainWork;
use std::{str::FromStr, sync::Arc, thread};

fn build_chain(store: &HeaderStore, from: &HeaderRecord, len: u64, salt: u64) -> Vec<HeaderRecord> {
    let params = store.params().clone();
    let mut chain = Vec::new();
    let mut tip = from.clone();
    for i in 0..len {
        tip = tip.build(child_header(&tip, params.pow_limit_bits, salt + i), &params).unwrap();
        store.put(&tip).unwrap();
        chain.push(tip.clone());
    }
    chain
}

#[test]
fn test_fresh_store_holds_genesis() {
    let (_tempdir, store) = open_temp_store(MAINNET_PARAMS);
    let head = store.get_chain_head().unwrap();
    assert_eq!(head.height(), 0);
    assert_eq!(head.hash(), Hash::from_str("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f").unwrap());
    assert_eq!(head.header(), &MAINNET_PARAMS.genesis_header());
    assert_eq!(head.chain_work(), &ChainWork::from_u64(0x1_0001_0001));
    assert_eq!(&head, store.genesis());
    assert_eq!(store.get(head.hash()).unwrap(), Some(head));
}

#[test]
fn test_get_unknown_hash() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    assert_eq!(store.get(Hash::from(77u64)).unwrap(), None);
}

#[test]
fn test_put_overwrites() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let genesis = store.genesis().clone();
    let child = genesis.build(child_header(&genesis, REGTEST_PARAMS.pow_limit_bits, 1), &REGTEST_PARAMS).unwrap();
    store.put(&child).unwrap();
    store.put(&child).unwrap();
    assert_eq!(store.get(child.hash()).unwrap(), Some(child.clone()));

    // Same hash with different bookkeeping replaces the record silently
    let rewritten = HeaderRecord::new(child.header().clone(), ChainWork::from_u64(1000), 7);
    store.put(&rewritten).unwrap();
    assert_eq!(store.get(child.hash()).unwrap(), Some(rewritten));
}

#[test]
fn test_persistence_across_reopen() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");

    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    let genesis = store.get_chain_head().unwrap();
    let h1 = genesis.build(child_header(&genesis, REGTEST_PARAMS.pow_limit_bits, 1), &REGTEST_PARAMS).unwrap();
    assert!(h1.more_work_than(&genesis));
    store.put(&h1).unwrap();
    store.set_chain_head(&h1).unwrap();
    store.close().unwrap();

    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.get_chain_head().unwrap(), h1);
    assert_eq!(store.get(h1.hash()).unwrap(), Some(h1.clone()));
    assert_eq!(store.get(genesis.hash()).unwrap(), Some(genesis.clone()));
    assert_eq!(store.get_prev(&h1).unwrap(), Some(genesis.clone()));
    assert_eq!(store.get_prev(&genesis).unwrap(), None);
}

#[test]
fn test_reset_is_idempotent() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let genesis = store.genesis().clone();
    let chain = build_chain(&store, &genesis, 20, 1);
    store.set_chain_head(chain.last().unwrap()).unwrap();

    for _ in 0..3 {
        store.reset().unwrap();
        assert_eq!(store.get_chain_head().unwrap(), genesis);
        for record in chain.iter() {
            assert_eq!(store.get(record.hash()).unwrap(), None);
        }
    }
}

#[test]
fn test_reset_survives_reopen() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    let genesis = store.genesis().clone();
    let chain = build_chain(&store, &genesis, 5, 1);
    store.set_chain_head(&chain[4]).unwrap();
    store.reset().unwrap();
    store.close().unwrap();

    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.get_chain_head().unwrap(), genesis);
    assert_eq!(store.get(chain[0].hash()).unwrap(), None);
}

#[test]
fn test_capacity_violation_fails() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let genesis = store.genesis().clone();
    let header = child_header(&genesis, REGTEST_PARAMS.pow_limit_bits, 1);
    let record = HeaderRecord::new(header, ChainWork::from_be_bytes(&[0xff; 13]), 1);

    match store.put(&record) {
        Err(StoreError::CodecError(err)) => assert!(matches!(err.downcast_ref::<CompactError>(), Some(CompactError::ChainWorkOverflow { .. }))),
        other => panic!("expected a codec error, got {other:?}"),
    }
    assert_eq!(store.get(record.hash()).unwrap(), None);
}

#[test]
fn test_dangling_chain_head() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let genesis = store.genesis().clone();
    let unstored = genesis.build(child_header(&genesis, REGTEST_PARAMS.pow_limit_bits, 1), &REGTEST_PARAMS).unwrap();
    store.set_chain_head(&unstored).unwrap();
    assert!(matches!(store.get_chain_head(), Err(StoreError::DataInconsistency(_))));
}

#[test]
fn test_closed_store() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let genesis = store.genesis().clone();
    assert!(!store.is_closed());
    store.close().unwrap();
    store.close().unwrap();
    assert!(store.is_closed());

    assert!(matches!(store.get(genesis.hash()), Err(StoreError::StoreClosed)));
    assert!(matches!(store.put(&genesis), Err(StoreError::StoreClosed)));
    assert!(matches!(store.get_chain_head(), Err(StoreError::StoreClosed)));
    assert!(matches!(store.set_chain_head(&genesis), Err(StoreError::StoreClosed)));
    assert!(matches!(store.reset(), Err(StoreError::StoreClosed)));
}

#[test]
fn test_destroy() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    let genesis = store.genesis().clone();
    let chain = build_chain(&store, &genesis, 3, 1);
    store.set_chain_head(&chain[2]).unwrap();

    assert!(matches!(store.destroy(), Err(StoreError::StoreStillOpen(_))));
    store.close().unwrap();
    store.destroy().unwrap();
    assert!(!path.exists());

    // A store opened on the same path starts over
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.get_chain_head().unwrap(), genesis);
    assert_eq!(store.get(chain[0].hash()).unwrap(), None);
}

#[test]
fn test_open_creates_missing_parents() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("nested").join("dirs").join("headers");
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.get_chain_head().unwrap().height(), 0);
}

#[test]
fn test_open_fails_when_repair_fails() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");
    std::fs::write(&path, b"not a database").unwrap();
    assert!(matches!(HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)), Err(StoreError::DbError(_))));
}

#[test]
fn test_drop_without_close_persists() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");

    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    let genesis = store.get_chain_head().unwrap();
    let h1 = genesis.build(child_header(&genesis, REGTEST_PARAMS.pow_limit_bits, 1), &REGTEST_PARAMS).unwrap();
    store.put(&h1).unwrap();
    store.set_chain_head(&h1).unwrap();
    drop(store);

    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.get_chain_head().unwrap(), h1);
}

#[test]
fn test_open_repairs_corruption() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("headers");
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    store.close().unwrap();
    drop(store);

    // A CURRENT file without a trailing newline is reported as corruption
    std::fs::write(path.join("CURRENT"), b"garbage").unwrap();
    let store = HeaderStore::open(REGTEST_PARAMS, conn_builder(&path)).unwrap();
    assert_eq!(store.get_chain_head().unwrap().height(), 0);
}

#[test]
fn test_stores_are_independent_per_network() {
    let (_main_dir, main) = open_temp_store(MAINNET_PARAMS);
    let (_reg_dir, regtest) = open_temp_store(Params::from(REGTEST_PARAMS.net));
    assert_ne!(main.get_chain_head().unwrap().hash(), regtest.get_chain_head().unwrap().hash());
    assert_eq!(main.get(regtest.genesis().hash()).unwrap(), None);
}

#[test]
fn test_uncached_store() {
    let tempdir = tempfile::tempdir().unwrap();
    let store =
        HeaderStore::open_with_cache_policy(REGTEST_PARAMS, conn_builder(&tempdir.path().join("headers")), CachePolicy::Empty).unwrap();
    let genesis = store.genesis().clone();
    let chain = build_chain(&store, &genesis, 4, 1);
    store.set_chain_head(&chain[3]).unwrap();
    assert_eq!(store.get_chain_head().unwrap(), chain[3]);
}

#[test]
fn test_concurrent_access() {
    let (_tempdir, store) = open_temp_store(REGTEST_PARAMS);
    let store = Arc::new(store);
    let genesis = store.genesis().clone();

    let handles = (0..4u64)
        .map(|t| {
            let store = store.clone();
            let genesis = genesis.clone();
            thread::spawn(move || build_chain(&store, &genesis, 25, 1000 * (t + 1)))
        })
        .collect::<Vec<_>>();
    let chains = handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>();

    for record in chains.iter().flatten() {
        assert_eq!(store.get(record.hash()).unwrap().as_ref(), Some(record));
    }
}
