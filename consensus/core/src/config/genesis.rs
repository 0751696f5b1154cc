use crate::header::Header;
use headerdb_hashes::Hash;

/// The constant fields of a genesis block
#[derive(Clone, Debug)]
pub struct GenesisBlock {
    pub hash: Hash,
    pub version: i32,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisBlock {
    pub fn build_genesis_header(&self) -> Header {
        Header::new(self.version, Hash::ZERO, self.merkle_root, self.timestamp, self.bits, self.nonce)
    }
}

impl From<&GenesisBlock> for Header {
    fn from(genesis: &GenesisBlock) -> Self {
        genesis.build_genesis_header()
    }
}

/// All networks share the merkle root of the single coinbase transaction
const GENESIS_MERKLE_ROOT: Hash = Hash::from_bytes([
    0x4a, 0x5e, 0x1e, 0x4b, 0xaa, 0xb8, 0x9f, 0x3a, 0x32, 0x51, 0x8a, 0x88, 0xc3, 0x1b, 0xc8, 0x7f,
    0x61, 0x8f, 0x76, 0x67, 0x3e, 0x2c, 0xc7, 0x7a, 0xb2, 0x12, 0x7b, 0x7a, 0xfd, 0xed, 0xa3, 0x3b,
]);

pub const GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes([
        0x00, 0x00, 0x00, 0x00, 0x00, 0x19, 0xd6, 0x68, 0x9c, 0x08, 0x5a, 0xe1, 0x65, 0x83, 0x1e, 0x93,
        0x4f, 0xf7, 0x63, 0xae, 0x46, 0xa2, 0xa6, 0xc1, 0x72, 0xb3, 0xf1, 0xb6, 0x0a, 0x8c, 0xe2, 0x6f,
    ]),
    version: 1,
    merkle_root: GENESIS_MERKLE_ROOT,
    timestamp: 1231006505,
    bits: 0x1d00ffff,
    nonce: 2083236893,
};

pub const TESTNET_GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes([
        0x00, 0x00, 0x00, 0x00, 0x09, 0x33, 0xea, 0x01, 0xad, 0x0e, 0xe9, 0x84, 0x20, 0x97, 0x79, 0xba,
        0xae, 0xc3, 0xce, 0xd9, 0x0f, 0xa3, 0xf4, 0x08, 0x71, 0x95, 0x26, 0xf8, 0xd7, 0x7f, 0x49, 0x43,
    ]),
    version: 1,
    merkle_root: GENESIS_MERKLE_ROOT,
    timestamp: 1296688602,
    bits: 0x1d00ffff,
    nonce: 414098458,
};

pub const REGTEST_GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes([
        0x0f, 0x91, 0x88, 0xf1, 0x3c, 0xb7, 0xb2, 0xc7, 0x1f, 0x2a, 0x33, 0x5e, 0x3a, 0x4f, 0xc3, 0x28,
        0xbf, 0x5b, 0xeb, 0x43, 0x60, 0x12, 0xaf, 0xca, 0x59, 0x0b, 0x1a, 0x11, 0x46, 0x6e, 0x22, 0x06,
    ]),
    version: 1,
    merkle_root: GENESIS_MERKLE_ROOT,
    timestamp: 1296688602,
    bits: 0x207fffff,
    nonce: 2,
};
