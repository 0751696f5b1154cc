use crate::{
    errors::{ChainError, ChainResult},
    header_store::ChainStore,
};
use headerdb_consensus_core::{
    header::Header,
    listener::{ChainListener, NewBlockType},
    record::HeaderRecord,
};
use headerdb_core::{debug, info};

/// Where a connected header ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectedHeader {
    /// The header was stored before, nothing changed
    AlreadyKnown(HeaderRecord),
    /// The header extends the previous chain head and is the new head
    ExtendedBestChain(HeaderRecord),
    /// The header is the new head but does not build on the previous one. The caller is
    /// responsible for reorganizing from `previous_head`.
    NewBestFork { record: HeaderRecord, previous_head: HeaderRecord },
    /// The header is stored but its chain carries no more work than the head
    SideChain(HeaderRecord),
}

impl ConnectedHeader {
    pub fn record(&self) -> &HeaderRecord {
        match self {
            ConnectedHeader::AlreadyKnown(record)
            | ConnectedHeader::ExtendedBestChain(record)
            | ConnectedHeader::NewBestFork { record, .. }
            | ConnectedHeader::SideChain(record) => record,
        }
    }

    pub fn block_type(&self) -> NewBlockType {
        match self {
            ConnectedHeader::ExtendedBestChain(_) | ConnectedHeader::NewBestFork { .. } => NewBlockType::BestChain,
            ConnectedHeader::AlreadyKnown(_) | ConnectedHeader::SideChain(_) => NewBlockType::SideChain,
        }
    }
}

/// Stores `header` as a child of its stored parent and moves the chain head to it when its chain
/// carries more work than the current head. `listener` is notified of a new head.
///
/// Calls for the same store must not run concurrently: reading the head and moving it are separate
/// store operations.
pub fn connect_header<S, L>(store: &S, header: Header, listener: &L) -> ChainResult<ConnectedHeader>
where
    S: ChainStore + ?Sized,
    L: ChainListener + ?Sized,
{
    if let Some(known) = store.get(header.hash)? {
        debug!("Header {} is already stored", header.hash);
        return Ok(ConnectedHeader::AlreadyKnown(known));
    }
    let parent = store.get(header.prev_hash)?.ok_or(ChainError::MissingParent(header.hash, header.prev_hash))?;
    let record = parent.build(header, store.params())?;
    store.put(&record)?;

    let head = store.get_chain_head()?;
    if !record.more_work_than(&head) {
        debug!("Header {} at height {} is on a side chain", record.hash(), record.height());
        return Ok(ConnectedHeader::SideChain(record));
    }

    store.set_chain_head(&record)?;
    listener.notify_new_best_block(&record)?;
    if parent.hash() == head.hash() {
        debug!("New chain head {} at height {}", record.hash(), record.height());
        Ok(ConnectedHeader::ExtendedBestChain(record))
    } else {
        info!("Chain head moved from {} to fork {} at height {}", head.hash(), record.hash(), record.height());
        Ok(ConnectedHeader::NewBestFork { record, previous_head: head })
    }
}
