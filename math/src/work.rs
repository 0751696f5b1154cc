use malachite_base::num::{basic::traits::Zero, logic::traits::SignificantBits};
use malachite_nz::natural::Natural;
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Add,
};

/// Cumulative proof-of-work of a chain, from genesis up to and including some header.
///
/// An arbitrary precision unsigned integer: sums of work never overflow in memory, and the
/// width limit only applies when a value is packed into a fixed-size record.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChainWork(Natural);

impl ChainWork {
    pub const ZERO: Self = ChainWork(Natural::ZERO);

    #[inline]
    pub fn from_u64(n: u64) -> Self {
        Self(Natural::from(n))
    }

    /// Return the least number of bits needed to represent the number
    #[inline]
    pub fn bits(&self) -> u64 {
        self.0.significant_bits()
    }

    /// Return the least number of bytes needed to represent the number
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    /// Interprets `bytes` as a big-endian unsigned integer. Leading zero bytes are allowed.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let limbs: Vec<u64> = bytes
            .rchunks(8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word[8 - chunk.len()..].copy_from_slice(chunk);
                u64::from_be_bytes(word)
            })
            .collect();
        Self(Natural::from_limbs_asc(&limbs))
    }

    /// Minimal big-endian representation, empty for zero
    pub fn to_be_bytes_var(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.0.to_limbs_asc().iter().rev().flat_map(|limb| limb.to_be_bytes()).collect();
        let first_non_zero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes.drain(..first_non_zero);
        bytes
    }

    /// Big-endian representation left-padded with zeros to exactly `N` bytes, or `None`
    /// when the value needs more than `N` bytes.
    pub fn to_be_bytes_padded<const N: usize>(&self) -> Option<[u8; N]> {
        let var = self.to_be_bytes_var();
        if var.len() > N {
            return None;
        }
        let mut out = [0u8; N];
        out[N - var.len()..].copy_from_slice(&var);
        Some(out)
    }
}

impl From<Natural> for ChainWork {
    fn from(value: Natural) -> Self {
        Self(value)
    }
}

impl Add<&ChainWork> for &ChainWork {
    type Output = ChainWork;

    #[inline]
    fn add(self, rhs: &ChainWork) -> ChainWork {
        ChainWork(&self.0 + &rhs.0)
    }
}

impl Display for ChainWork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for ChainWork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainWork({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_be_bytes() {
        assert!(ChainWork::ZERO.to_be_bytes_var().is_empty());
        assert_eq!(ChainWork::ZERO.to_be_bytes_padded::<12>(), Some([0u8; 12]));

        let work = ChainWork::from_u64(0x1_0001_0001);
        assert_eq!(work.to_be_bytes_var(), vec![0x01, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!(work.byte_len(), 5);
        assert_eq!(work.to_be_bytes_padded::<12>().unwrap(), [0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1]);
        assert_eq!(ChainWork::from_be_bytes(&work.to_be_bytes_padded::<12>().unwrap()), work);

        // 2^96 does not fit in 12 bytes, 2^96 - 1 does
        let max = ChainWork::from_be_bytes(&[0xff; 12]);
        assert_eq!(max.bits(), 96);
        assert!(max.to_be_bytes_padded::<12>().is_some());
        let overflow = &max + &ChainWork::from_u64(1);
        assert_eq!(overflow.bits(), 97);
        assert_eq!(overflow.to_be_bytes_padded::<12>(), None);
        assert_eq!(overflow.to_be_bytes_var().len(), 13);
    }

    #[test]
    fn test_matches_u128_arithmetic() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let a: u64 = rng.r#gen();
            let b: u64 = rng.r#gen();
            let (wa, wb) = (ChainWork::from_u64(a), ChainWork::from_u64(b));
            let sum = &wa + &wb;
            assert_eq!(sum, ChainWork::from_be_bytes(&(a as u128 + b as u128).to_be_bytes()));
            assert_eq!(wa.cmp(&wb), a.cmp(&b));
            assert_eq!(ChainWork::from_be_bytes(&sum.to_be_bytes_var()), sum);
        }
    }

    #[test]
    fn test_format() {
        let work = &ChainWork::from_u64(2) + &ChainWork::from_u64(2);
        assert_eq!(work.to_string(), "4");
        assert!(format!("{:?}", ChainWork::from_u64(0x1_0001_0001)).starts_with("ChainWork("));
        assert_eq!(ChainWork::default(), ChainWork::ZERO);
    }
}
