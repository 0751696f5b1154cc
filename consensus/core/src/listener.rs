//! Hooks through which a chain manager reports chain progress.
//!
//! Every method has a no-op default, so implementors only override what they care about.

use crate::{errors::verification::VerificationResult, record::HeaderRecord, tx::Transaction};
use headerdb_hashes::Hash;

/// Whether a block extends the best chain or lands on a side chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NewBlockType {
    BestChain,
    SideChain,
}

pub trait ChainListener: Send + Sync {
    /// Called when `block` became the new chain head
    fn notify_new_best_block(&self, _block: &HeaderRecord) -> VerificationResult<()> {
        Ok(())
    }

    /// Called when the best chain switches branches at `split_point`. Both lists are ordered from
    /// the split point towards the tip.
    fn reorganize(
        &self,
        _split_point: &HeaderRecord,
        _old_blocks: &[HeaderRecord],
        _new_blocks: &[HeaderRecord],
    ) -> VerificationResult<()> {
        Ok(())
    }

    fn is_transaction_relevant(&self, _tx: &Transaction) -> VerificationResult<bool> {
        Ok(false)
    }

    /// Delivers a relevant transaction found in `block`. `relativity_offset` orders transactions within the block.
    fn receive_from_block(
        &self,
        _tx: &Transaction,
        _block: &HeaderRecord,
        _block_type: NewBlockType,
        _relativity_offset: i32,
    ) -> VerificationResult<()> {
        Ok(())
    }

    /// Reports that a transaction known only by its hash appears in `block`. Returns whether the listener knows it.
    fn notify_transaction_is_in_block(
        &self,
        _tx_hash: Hash,
        _block: &HeaderRecord,
        _block_type: NewBlockType,
        _relativity_offset: i32,
    ) -> VerificationResult<bool> {
        Ok(false)
    }
}

/// A listener which ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl ChainListener for NullListener {}
