//! Hash newtypes and lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codec::EncodingError;
use crate::config::HASH_LENGTH;
use crate::crypto::Digest;

// ---------------------------------------------------------------------------
// DeployHash
// ---------------------------------------------------------------------------

/// Identity of a deploy: the BLAKE2b-256 digest of its serialized header.
///
/// Approvals sign exactly these 32 bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployHash(Digest);

impl DeployHash {
    pub const fn new(digest: Digest) -> Self {
        Self(digest)
    }

    pub fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(Digest::from_bytes(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let bytes = hex::decode(s).map_err(|_| EncodingError::InvalidHashLength {
            expected: HASH_LENGTH,
            actual: s.len() / 2,
        })?;
        Self::try_from(bytes.as_slice())
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        self.0.as_bytes()
    }

    pub fn digest(&self) -> Digest {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl TryFrom<&[u8]> for DeployHash {
    type Error = EncodingError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Digest::try_from(slice)
            .map(Self)
            .map_err(|_| EncodingError::InvalidHashLength {
                expected: HASH_LENGTH,
                actual: slice.len(),
            })
    }
}

impl From<Digest> for DeployHash {
    fn from(digest: Digest) -> Self {
        Self(digest)
    }
}

impl fmt::Display for DeployHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for DeployHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeployHash({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// ContractHash
// ---------------------------------------------------------------------------

/// Address of a contract stored on chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractHash(Digest);

impl ContractHash {
    pub fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(Digest::from_bytes(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let bytes = hex::decode(s).map_err(|_| EncodingError::InvalidHashLength {
            expected: HASH_LENGTH,
            actual: s.len() / 2,
        })?;
        Self::try_from(bytes.as_slice())
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl TryFrom<&[u8]> for ContractHash {
    type Error = EncodingError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Digest::try_from(slice)
            .map(Self)
            .map_err(|_| EncodingError::InvalidHashLength {
                expected: HASH_LENGTH,
                actual: slice.len(),
            })
    }
}

impl fmt::Display for ContractHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ContractHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractHash({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// DeployState
// ---------------------------------------------------------------------------

/// Where a deploy is in its lifecycle.
///
/// ```text
/// Unapproved ──sign / attach──► Approved ──sign / attach / push──► Approved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployState {
    /// Assembled, no approvals yet.
    Unapproved,
    /// At least one approval attached.
    Approved,
}

impl fmt::Display for DeployState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unapproved => write!(f, "unapproved"),
            Self::Approved => write!(f, "approved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_hash_requires_32_bytes() {
        assert!(DeployHash::try_from([7u8; 32].as_slice()).is_ok());
        assert_eq!(
            DeployHash::try_from([7u8; 31].as_slice()).unwrap_err(),
            EncodingError::InvalidHashLength {
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn contract_hash_hex_roundtrip() {
        let hash = ContractHash::from_bytes([0xab; 32]);
        assert_eq!(ContractHash::from_hex(&hash.to_hex()).unwrap(), hash);
        assert!(ContractHash::from_hex("zz").is_err());
    }

    #[test]
    fn deploy_hash_serializes_as_hex_string() {
        let hash = DeployHash::from_bytes([1; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
    }
}
