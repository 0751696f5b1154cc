use crate::{
    block::Block,
    config::params::Params,
    errors::verification::{VerificationError, VerificationResult},
    header::Header,
};
use headerdb_hashes::Hash;
use headerdb_math::ChainWork;
use std::fmt::{Display, Formatter};

pub mod compact;

/// A stored header along with its position in a chain.
///
/// `chain_work` is the total work of all headers from genesis up to and including this one,
/// `height` is the number of headers before it (0 for genesis).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeaderRecord {
    header: Header,
    chain_work: ChainWork,
    height: u32,
}

impl HeaderRecord {
    pub fn new(header: Header, chain_work: ChainWork, height: u32) -> Self {
        Self { header, chain_work, height }
    }

    /// Builds a record for the header of `block`. Transactions are not retained.
    pub fn from_block(block: &Block, chain_work: ChainWork, height: u32) -> Self {
        Self::new(block.to_header(), chain_work, height)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn chain_work(&self) -> &ChainWork {
        &self.chain_work
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    /// Whether this record's chain carries strictly more work than `other`'s. Height plays no part.
    pub fn more_work_than(&self, other: &HeaderRecord) -> bool {
        self.chain_work > other.chain_work
    }

    /// Builds the record of `header` as a child of this record.
    ///
    /// Fails if `header` does not point at this record or if its difficulty bits are invalid for `params`.
    /// Proof of work itself is not checked.
    pub fn build(&self, header: Header, params: &Params) -> VerificationResult<HeaderRecord> {
        if header.prev_hash != self.hash() {
            return Err(VerificationError::ParentMismatch { block: header.hash, parent: self.hash(), prev_hash: header.prev_hash });
        }
        let target = header.target().map_err(|err| VerificationError::InvalidDifficultyBits(header.hash, err))?;
        if target > params.pow_limit()? {
            return Err(VerificationError::TargetAbovePowLimit(header.hash, header.bits));
        }
        let chain_work = &self.chain_work + &target.to_work();
        Ok(HeaderRecord::new(header, chain_work, self.height + 1))
    }

    /// Parses `bytes` as a header of `params`' network and builds it as a child of this record
    pub fn build_from_bytes(&self, bytes: &[u8], params: &Params) -> VerificationResult<HeaderRecord> {
        let header = params.parse_header(bytes)?;
        self.build(header, params)
    }
}

impl Display for HeaderRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block {} at height {}: {}", self.hash(), self.height, self.header)
    }
}
