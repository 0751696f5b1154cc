use crate::work::ChainWork;
use malachite_base::num::basic::traits::{One, Zero};
use malachite_nz::natural::Natural;
use thiserror::Error;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    #[error("compact bits {0:#010x} encode a negative target")]
    Negative(u32),

    #[error("compact bits {0:#010x} encode a zero target")]
    Zero(u32),
}

/// A proof-of-work target: a header hash must not exceed it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Target(Natural);

impl Target {
    /// Expands the compact `nBits` representation: a one byte exponent followed by a 23 bit mantissa
    /// and a sign bit, i.e. `mantissa * 256^(exponent - 3)`.
    pub fn from_compact_bits(bits: u32) -> Result<Self, TargetError> {
        let exponent = bits >> 24;
        let mantissa = bits & MANTISSA_MASK;
        if bits & SIGN_BIT != 0 && mantissa != 0 {
            return Err(TargetError::Negative(bits));
        }
        let target = if exponent <= 3 {
            Natural::from(mantissa >> (8 * (3 - exponent)))
        } else {
            Natural::from(mantissa) << (8 * (exponent as u64 - 3))
        };
        if target == Natural::ZERO {
            return Err(TargetError::Zero(bits));
        }
        Ok(Self(target))
    }

    /// Expected number of hashes needed to meet this target: `2^256 / (target + 1)`
    pub fn to_work(&self) -> ChainWork {
        ChainWork::from((Natural::ONE << 256u64) / (&self.0 + Natural::ONE))
    }
}
