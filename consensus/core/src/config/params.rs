use super::genesis::{GENESIS, GenesisBlock, REGTEST_GENESIS, TESTNET_GENESIS};
use crate::{
    errors::{
        header::HeaderResult,
        verification::{VerificationError, VerificationResult},
    },
    header::{HEADER_SIZE, Header},
    network::NetworkType,
    record::HeaderRecord,
};
use headerdb_math::Target;

/// Consensus parameters of a network, as far as header storage is concerned
#[derive(Clone, Debug)]
pub struct Params {
    pub net: NetworkType,
    pub genesis: GenesisBlock,
    /// Compact form of the easiest target a header may carry
    pub pow_limit_bits: u32,
}

impl Params {
    pub fn genesis_header(&self) -> Header {
        self.genesis.build_genesis_header()
    }

    /// The record an empty store is initialized with: height 0 and the genesis work as chain work
    pub fn genesis_record(&self) -> VerificationResult<HeaderRecord> {
        let header = self.genesis_header();
        let work = header.work().map_err(|err| VerificationError::InvalidDifficultyBits(header.hash, err))?;
        Ok(HeaderRecord::new(header, work, 0))
    }

    /// Serialized size of the headers of this network
    pub const fn header_size(&self) -> usize {
        HEADER_SIZE
    }

    /// Parses a header serialized by this network
    pub fn parse_header(&self, bytes: &[u8]) -> HeaderResult<Header> {
        Header::from_bytes(bytes)
    }

    pub fn pow_limit(&self) -> VerificationResult<Target> {
        Target::from_compact_bits(self.pow_limit_bits).map_err(|_| VerificationError::InvalidPowLimit(self.pow_limit_bits))
    }
}

impl From<NetworkType> for Params {
    fn from(value: NetworkType) -> Self {
        match value {
            NetworkType::Mainnet => MAINNET_PARAMS,
            NetworkType::Testnet => TESTNET_PARAMS,
            NetworkType::Regtest => REGTEST_PARAMS,
        }
    }
}

pub const MAINNET_PARAMS: Params = Params { net: NetworkType::Mainnet, genesis: GENESIS, pow_limit_bits: 0x1d00ffff };

pub const TESTNET_PARAMS: Params = Params { net: NetworkType::Testnet, genesis: TESTNET_GENESIS, pow_limit_bits: 0x1d00ffff };

pub const REGTEST_PARAMS: Params = Params { net: NetworkType::Regtest, genesis: REGTEST_GENESIS, pow_limit_bits: 0x207fffff };
