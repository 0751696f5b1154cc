//! Fixed width binary form of a [`HeaderRecord`].
//!
//! Layout, [`COMPACT_SIZE`] bytes in total:
//!
//! | bytes   | content                                               |
//! |---------|-------------------------------------------------------|
//! | 0..12   | chain work, unsigned big-endian, zero padded on the left |
//! | 12..16  | height, signed 32 bit big-endian                      |
//! | 16..96  | the serialized header, without a transaction count    |

use super::HeaderRecord;
use crate::{
    config::params::Params,
    errors::compact::{CompactError, CompactResult},
    header::HEADER_SIZE,
};
use headerdb_math::ChainWork;

/// Room for chain work. 12 bytes hold more work than the whole network produces in many centuries.
pub const CHAIN_WORK_BYTES: usize = 12;
pub const HEIGHT_BYTES: usize = 4;
pub const COMPACT_SIZE: usize = CHAIN_WORK_BYTES + HEIGHT_BYTES + HEADER_SIZE;

const HEIGHT_OFFSET: usize = CHAIN_WORK_BYTES;
const HEADER_OFFSET: usize = CHAIN_WORK_BYTES + HEIGHT_BYTES;

/// Encodes `record`. Fails rather than truncate when its chain work or height exceed the layout.
pub fn encode(record: &HeaderRecord) -> CompactResult<[u8; COMPACT_SIZE]> {
    let chain_work = record.chain_work.to_be_bytes_padded::<CHAIN_WORK_BYTES>().ok_or(CompactError::ChainWorkOverflow {
        needed: record.chain_work.byte_len(),
        capacity: CHAIN_WORK_BYTES,
    })?;
    let height = i32::try_from(record.height).map_err(|_| CompactError::HeightOverflow(record.height))?;

    let mut bytes = [0u8; COMPACT_SIZE];
    bytes[..HEIGHT_OFFSET].copy_from_slice(&chain_work);
    bytes[HEIGHT_OFFSET..HEADER_OFFSET].copy_from_slice(&height.to_be_bytes());
    bytes[HEADER_OFFSET..].copy_from_slice(&record.header.to_bytes());
    Ok(bytes)
}

/// Decodes a record produced by [`encode`], parsing the header with `params`
pub fn decode(bytes: &[u8], params: &Params) -> CompactResult<HeaderRecord> {
    let expected = HEADER_OFFSET + params.header_size();
    if bytes.len() != expected {
        return Err(CompactError::InvalidLength { expected, actual: bytes.len() });
    }
    let chain_work = ChainWork::from_be_bytes(&bytes[..HEIGHT_OFFSET]);
    let mut height = [0u8; HEIGHT_BYTES];
    height.copy_from_slice(&bytes[HEIGHT_OFFSET..HEADER_OFFSET]);
    let height = i32::from_be_bytes(height);
    let height = u32::try_from(height).map_err(|_| CompactError::NegativeHeight(height))?;
    let header = params.parse_header(&bytes[HEADER_OFFSET..])?;
    Ok(HeaderRecord::new(header, chain_work, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::params::{MAINNET_PARAMS, REGTEST_PARAMS},
        network::NetworkType,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_genesis_layout() {
        let genesis = MAINNET_PARAMS.genesis_record().unwrap();
        let bytes = encode(&genesis).unwrap();
        assert_eq!(bytes.len(), 96);
        // 0x100010001 padded to 12 bytes
        assert_eq!(&bytes[..12], &[0, 0, 0, 0, 0, 0, 0, 0x01, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(&bytes[16..], &genesis.header().to_bytes());
        assert_eq!(decode(&bytes, &MAINNET_PARAMS).unwrap(), genesis);
    }

    #[test]
    fn test_round_trip_random_records() {
        let params = REGTEST_PARAMS;
        let genesis = params.genesis_record().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let mut work_bytes = [0u8; CHAIN_WORK_BYTES];
            rng.fill(&mut work_bytes[..]);
            let height = rng.gen_range(0..=i32::MAX as u32);
            let record = HeaderRecord::new(genesis.header().clone(), ChainWork::from_be_bytes(&work_bytes), height);
            let bytes = encode(&record).unwrap();
            assert_eq!(bytes[..CHAIN_WORK_BYTES], work_bytes);
            assert_eq!(decode(&bytes, &params).unwrap(), record);
        }
    }

    #[test]
    fn test_chain_work_capacity() {
        let header = REGTEST_PARAMS.genesis_header();

        // The largest value that fits: all 96 bits set
        let max = ChainWork::from_be_bytes(&[0xff; CHAIN_WORK_BYTES]);
        let record = HeaderRecord::new(header.clone(), max.clone(), 1);
        assert_eq!(decode(&encode(&record).unwrap(), &REGTEST_PARAMS).unwrap().chain_work(), &max);

        let overflow = &max + &ChainWork::from_u64(1);
        let record = HeaderRecord::new(header, overflow, 1);
        assert_eq!(encode(&record), Err(CompactError::ChainWorkOverflow { needed: 13, capacity: CHAIN_WORK_BYTES }));
    }

    #[test]
    fn test_height_bounds() {
        let header = REGTEST_PARAMS.genesis_header();
        let record = HeaderRecord::new(header.clone(), ChainWork::from_u64(2), i32::MAX as u32 + 1);
        assert_eq!(encode(&record), Err(CompactError::HeightOverflow(i32::MAX as u32 + 1)));

        let mut bytes = encode(&HeaderRecord::new(header, ChainWork::from_u64(2), 5)).unwrap();
        bytes[HEIGHT_OFFSET..HEADER_OFFSET].copy_from_slice(&(-1i32).to_be_bytes());
        assert_eq!(decode(&bytes, &REGTEST_PARAMS), Err(CompactError::NegativeHeight(-1)));
    }

    #[test]
    fn test_decode_invalid_length() {
        for net in NetworkType::iter() {
            assert_eq!(HEADER_OFFSET + Params::from(net).header_size(), COMPACT_SIZE, "{net}");
        }
        let bytes = encode(&REGTEST_PARAMS.genesis_record().unwrap()).unwrap();
        assert_eq!(decode(&bytes[..95], &REGTEST_PARAMS), Err(CompactError::InvalidLength { expected: COMPACT_SIZE, actual: 95 }));
        let mut extended = bytes.to_vec();
        extended.push(0);
        assert!(matches!(decode(&extended, &REGTEST_PARAMS), Err(CompactError::InvalidLength { .. })));
    }
}
