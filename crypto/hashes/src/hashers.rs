use crate::{HASH_SIZE, Hash};
use sha2::{Digest, Sha256};

pub trait Hasher: Default {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;

    fn finalize(self) -> Hash;

    #[inline]
    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

macro_rules! double_sha256_hasher {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default)]
        pub struct $name(Sha256);

        impl $name {
            #[inline(always)]
            pub fn new() -> Self {
                Self::default()
            }

            #[inline(always)]
            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }
        }

        impl Hasher for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }

            #[inline]
            fn finalize(self) -> Hash {
                let first = self.0.finalize();
                let second = Sha256::digest(first);
                let mut out = [0u8; HASH_SIZE];
                out.copy_from_slice(&second);
                Hash::from_wire_bytes(out)
            }
        }
    };
}

double_sha256_hasher!(
    /// Hashes a serialized block header
    BlockHash
);
double_sha256_hasher!(
    /// Hashes a serialized transaction
    TransactionHash
);
