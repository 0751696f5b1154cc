use crate::errors::header::{HeaderError, HeaderResult};
use headerdb_hashes::{BlockHash, HASH_SIZE, Hash, Hasher};
use headerdb_math::{ChainWork, Target, TargetError};
use std::fmt::{Display, Formatter};

/// Serialized size of a block header
pub const HEADER_SIZE: usize = 80;

/// A block header, without transactions.
///
/// Serialized as: version (i32 LE), previous block hash (32 bytes, digest order), merkle root (32 bytes,
/// digest order), timestamp (u32 LE), difficulty bits (u32 LE), nonce (u32 LE).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    pub hash: Hash, // cached hash
    pub version: i32,
    pub prev_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn new(version: i32, prev_hash: Hash, merkle_root: Hash, timestamp: u32, bits: u32, nonce: u32) -> Self {
        let mut header = Self { hash: Hash::ZERO, version, prev_hash, merkle_root, timestamp, bits, nonce };
        header.finalize();
        header
    }

    /// Recomputes the cached hash. Must be called after any field is modified.
    pub fn finalize(&mut self) {
        self.hash = BlockHash::hash(self.to_bytes());
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.to_wire_bytes());
        bytes[36..68].copy_from_slice(&self.merkle_root.to_wire_bytes());
        bytes[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Parses exactly [`HEADER_SIZE`] bytes. The hash is computed from the parsed bytes.
    pub fn from_bytes(bytes: &[u8]) -> HeaderResult<Self> {
        if bytes.len() != HEADER_SIZE {
            return Err(HeaderError::InvalidLength { expected: HEADER_SIZE, actual: bytes.len() });
        }
        let u32_at = |pos: usize| u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]);
        let hash_at = |pos: usize| {
            let mut wire = [0u8; HASH_SIZE];
            wire.copy_from_slice(&bytes[pos..pos + HASH_SIZE]);
            Hash::from_wire_bytes(wire)
        };
        Ok(Self {
            hash: BlockHash::hash(bytes),
            version: u32_at(0) as i32,
            prev_hash: hash_at(4),
            merkle_root: hash_at(36),
            timestamp: u32_at(68),
            bits: u32_at(72),
            nonce: u32_at(76),
        })
    }

    pub fn target(&self) -> Result<Target, TargetError> {
        Target::from_compact_bits(self.bits)
    }

    /// The work represented by this header alone
    pub fn work(&self) -> Result<ChainWork, TargetError> {
        Ok(self.target()?.to_work())
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "v{} prev {} merkle {} time {} bits {:#010x} nonce {}",
            self.version, self.prev_hash, self.merkle_root, self.timestamp, self.bits, self.nonce
        )
    }
}
