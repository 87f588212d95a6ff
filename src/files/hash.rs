//! BLAKE3 digests for round-trip verification

use std::fmt;

/// Digest of a plaintext buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digest(blake3::Hash);

impl Digest {
    /// Digest of `data`
    pub fn of(data: &[u8]) -> Self {
        Digest(blake3::hash(data))
    }

    /// True when `data` hashes to this digest
    pub fn matches(&self, data: &[u8]) -> bool {
        self.0 == blake3::hash(data)
    }

    /// Lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
