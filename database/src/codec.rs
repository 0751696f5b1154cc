use crate::errors::{StoreError, StoreResult};
use headerdb_hashes::Hash;

/// Converts store values to and from their stored bytes
pub trait ValueCodec<T>: Send + Sync {
    fn encode(&self, value: &T) -> StoreResult<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> StoreResult<T>;
}

/// Stores a hash as its 32 raw bytes
#[derive(Clone, Copy, Debug, Default)]
pub struct HashCodec;

impl ValueCodec<Hash> for HashCodec {
    fn encode(&self, value: &Hash) -> StoreResult<Vec<u8>> {
        Ok(value.as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> StoreResult<Hash> {
        Hash::try_from(bytes).map_err(StoreError::codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_codec() {
        let hash = Hash::from(0xdeadbeef_u64);
        let bytes = HashCodec.encode(&hash).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(HashCodec.decode(&bytes).unwrap(), hash);
        assert!(matches!(HashCodec.decode(&bytes[1..]), Err(StoreError::CodecError(_))));
    }
}
