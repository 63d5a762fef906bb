//! Info-hash computation.
//!
//! The info-hash is the SHA-1 digest of a value's canonical bencode
//! encoding. Because the encoding is canonical, structurally equal values
//! always hash identically, and the digest changes exactly when the
//! canonical encoding changes.

use std::fmt;

use sha1::{Digest, Sha1};

use crate::codec::encode;
use crate::model::Value;

/// Byte length of an info-hash, and of each piece hash.
pub const INFO_HASH_LEN: usize = 20;

/// A 20-byte SHA-1 digest identifying an info dictionary.
///
/// # Examples
///
/// ```
/// use bencode::{decode, InfoHash};
///
/// let info = decode(b"d6:lengthi3e4:name1:a12:piece lengthi1ee").unwrap();
/// let digest = InfoHash::of(&info);
///
/// // Deterministic: the same structure always hashes the same.
/// assert_eq!(digest, InfoHash::of(&info));
/// assert_eq!(digest.to_hex().len(), 40);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; INFO_HASH_LEN]);

impl InfoHash {
    /// Computes the info-hash of a value by canonically encoding it and
    /// hashing the resulting bytes.
    pub fn of(value: &Value) -> Self {
        InfoHash(Sha1::digest(encode(value)).into())
    }

    /// Wraps an existing 20-byte digest.
    pub fn from_bytes(bytes: [u8; INFO_HASH_LEN]) -> Self {
        InfoHash(bytes)
    }

    /// Parses a 40-character hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; INFO_HASH_LEN];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(InfoHash(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; INFO_HASH_LEN] {
        &self.0
    }

    /// Lowercase hex rendering, the conventional display form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DictBuilder;

    fn sample_info() -> Value {
        DictBuilder::new()
            .insert("length", 12345)
            .insert("name", "testfile")
            .insert("piece length", 16384)
            .build()
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(InfoHash::of(&sample_info()), InfoHash::of(&sample_info()));
    }

    #[test]
    fn equal_structures_hash_identically_regardless_of_build_order() {
        let reversed = DictBuilder::new()
            .insert("piece length", 16384)
            .insert("name", "testfile")
            .insert("length", 12345)
            .build();
        assert_eq!(InfoHash::of(&sample_info()), InfoHash::of(&reversed));
    }

    #[test]
    fn single_byte_change_changes_the_digest() {
        let changed = DictBuilder::new()
            .insert("length", 12345)
            .insert("name", "testfilf")
            .insert("piece length", 16384)
            .build();
        assert_ne!(InfoHash::of(&sample_info()), InfoHash::of(&changed));
    }

    #[test]
    fn hex_roundtrip() {
        let digest = InfoHash::of(&sample_info());
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 40);
        assert!(hex.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(InfoHash::from_hex(&hex), Some(digest));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert_eq!(InfoHash::from_hex("tooshort"), None);
        assert_eq!(
            InfoHash::from_hex("zz39a3ee5e6b4b0d3255bfef95601890afd80709"),
            None
        );
    }

    #[test]
    fn display_is_lowercase_hex() {
        let digest = InfoHash::from_bytes([0xab; INFO_HASH_LEN]);
        assert_eq!(digest.to_string(), "ab".repeat(20));
        assert_eq!(format!("{:?}", digest), format!("InfoHash({})", "ab".repeat(20)));
    }
}
