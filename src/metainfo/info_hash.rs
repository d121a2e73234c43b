use super::error::MetainfoError;
use crate::bencode::{encode, BencodeError, Value};
use crate::constants::DIGEST_LEN;
use sha1::{Digest, Sha1};
use std::fmt;

/// SHA-1 of an arbitrary buffer. The one digest primitive used for both
/// piece hashes and info hashes.
pub(crate) fn sha1_digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn url_encode(bytes: &[u8]) -> String {
    urlencoding::encode_binary(bytes).into_owned()
}

/// The v1 info hash: SHA-1 of the bencoded `info` dictionary.
///
/// ```
/// use tmeta::metainfo::InfoHash;
///
/// let hash = InfoHash::from_hex("c12fe1c06bba254a9dc9f519b335aa7c1367a88a").unwrap();
/// assert_eq!(hash.as_bytes().len(), 20);
/// assert_eq!(hash.to_hex(), "c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
/// assert!(hash.to_url_encoded().starts_with("%C1%2F"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; DIGEST_LEN]);

impl InfoHash {
    /// Hashes the canonical encoding of an `info` value.
    pub fn of_info_value(info: &Value) -> Result<Self, BencodeError> {
        Ok(Self(sha1_digest(&encode(info)?)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; DIGEST_LEN] = bytes
            .try_into()
            .map_err(|_| MetainfoError::InvalidInfoHash)?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let bytes = hex::decode(s).map_err(|_| MetainfoError::InvalidInfoHash)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Percent-encoded form used in tracker announce query strings.
    pub fn to_url_encoded(&self) -> String {
        url_encode(&self.0)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Digest of one piece of content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceHash([u8; DIGEST_LEN]);

impl PieceHash {
    /// Hashes one content window.
    pub fn digest(window: &[u8]) -> Self {
        Self(sha1_digest(window))
    }

    /// Wraps an existing digest, e.g. one chunk of a `pieces` string.
    pub fn from_array(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn to_url_encoded(&self) -> String {
        url_encode(&self.0)
    }
}

impl fmt::Debug for PieceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceHash({})", self.to_hex())
    }
}
