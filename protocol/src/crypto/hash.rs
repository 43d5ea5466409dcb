//! # Content Hashing
//!
//! The single hash function this crate uses to give deploys their identity.
//!
//! CasperLabs addresses content with **BLAKE2b** truncated to a 256-bit
//! digest. The same unkeyed, unsalted primitive is applied to the serialized
//! deploy body (producing the header's body hash) and to the serialized
//! header (producing the deploy hash). Nothing else in the crate hashes with
//! it, so a [`Digest`] always means "identity of some canonical bytes".

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::HASH_LENGTH;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte BLAKE2b-256 digest.
///
/// Serializes as a lowercase hex string in human-readable formats (JSON),
/// matching how the node's APIs print hashes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; HASH_LENGTH]);

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Hex-encoded representation. 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex-encoded digest. The input must decode to exactly 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; HASH_LENGTH];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; HASH_LENGTH]>::try_from(slice).map(Self)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_hex().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let hex_str = String::deserialize(deserializer)?;
            Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
        } else {
            <[u8; HASH_LENGTH]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Computes the BLAKE2b-256 content hash of `data`.
///
/// Deterministic, unkeyed, and identical on every platform.
///
/// # Example
///
/// ```
/// use casperlabs_deploy::crypto::hash;
///
/// let digest = hash(b"deploy body");
/// assert_eq!(digest.as_bytes().len(), 32);
/// ```
pub fn hash(data: &[u8]) -> Digest {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let mut output = [0u8; HASH_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    Digest(output)
}
