//! Name hashing.
//!
//! The digest is only ever used as a source of indices and color bytes.
//! Switching algorithms yields a completely different avatar set for the
//! same names, so the choice is part of the compatibility contract.

use md5::Md5;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Number of leading digest bytes the pattern stage cycles through.
pub const PATTERN_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 16-byte MD5 digest.
    #[default]
    Md5,
    /// 32-byte SHA-256 digest.
    Sha256,
}

impl HashAlgorithm {
    pub fn digest(self, name: &str) -> NameDigest {
        let bytes = match self {
            HashAlgorithm::Md5 => Md5::digest(name.as_bytes()).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(name.as_bytes()).to_vec(),
        };
        NameDigest(bytes)
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

/// Hash output for a single name. Always at least [`PATTERN_BYTES`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDigest(Vec<u8>);

impl NameDigest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte used for pattern cell `index`, wrapping over the first 16 bytes.
    pub fn pattern_byte(&self, index: usize) -> u8 {
        self.0[index % PATTERN_BYTES]
    }

    /// The first three bytes, read as R, G, B.
    pub fn rgb(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}
