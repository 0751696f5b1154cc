use headerdb_hashes::HASH_SIZE;
use std::fmt::{Debug, Display, Formatter};

/// A raw database key.
///
/// Only used for reporting: the stores of this workspace write their keys directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DbKey(Vec<u8>);

impl DbKey {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self(key.as_ref().to_vec())
    }
}

impl Display for DbKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Record keys are hashes, anything else is a reserved name
        match std::str::from_utf8(&self.0) {
            Ok(name) if self.0.len() != HASH_SIZE && self.0.iter().all(|b| b.is_ascii_graphic()) => f.write_str(name),
            _ => f.write_str(&faster_hex::hex_string(&self.0)),
        }
    }
}

impl Debug for DbKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DbKey::new(b"chainhead").to_string(), "chainhead");
        assert_eq!(DbKey::new([0x00u8, 0xab, 0x10]).to_string(), "00ab10");
        assert_eq!(DbKey::new([]).to_string(), "");

        // A hash whose bytes all happen to be printable is still shown as hex
        let printable = [b'a'; HASH_SIZE];
        assert_eq!(DbKey::new(printable).to_string(), "61".repeat(HASH_SIZE));
    }
}
