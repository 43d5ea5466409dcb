//! # Key Material
//!
//! Thin wrappers around `ed25519-dalek` for the key pairs that approve
//! deploys.
//!
//! This crate never generates or stores keys. A key-pair provider hands us
//! the raw halves (or just the secret seed), we use them for a single
//! signing call, and the caller drops them. Key bytes are never logged.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH,
    SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors raised while loading key material.
///
/// Deliberately vague about the bytes involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: expected {SECRET_KEY_LENGTH} bytes")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("key pair validation failed: public key does not match secret key")]
    KeypairMismatch,

    #[error("invalid signature bytes: expected {SIGNATURE_LENGTH} bytes, got {0}")]
    InvalidSignatureLength(usize),
}

/// An Ed25519 key pair supplied by the caller.
///
/// Does not implement `Serialize`; exporting a secret key must be explicit.
pub struct KeyPair {
    signing_key: SigningKey,
}

/// The public half of a [`KeyPair`]: 32 bytes, validated as a curve point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A detached 64-byte Ed25519 signature.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl KeyPair {
    /// Builds a key pair from a 32-byte secret seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Builds a key pair from a secret-key slice of any provenance.
    pub fn from_secret_key_bytes(secret: &[u8]) -> Result<Self, KeyError> {
        let seed: [u8; SECRET_KEY_LENGTH] =
            secret.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Builds a key pair from both halves, as handed over by a key-pair
    /// provider, and checks that they belong together.
    ///
    /// Accepts either a 32-byte secret seed or the 64-byte `seed || public`
    /// layout some providers (NaCl, tweetnacl) emit as their "secret key".
    pub fn from_keypair_bytes(public: &[u8], secret: &[u8]) -> Result<Self, KeyError> {
        let seed = match secret.len() {
            SECRET_KEY_LENGTH => secret,
            n if n == SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH => {
                if &secret[SECRET_KEY_LENGTH..] != public {
                    return Err(KeyError::KeypairMismatch);
                }
                &secret[..SECRET_KEY_LENGTH]
            }
            _ => return Err(KeyError::InvalidSecretKey),
        };
        let keypair = Self::from_secret_key_bytes(seed)?;
        let expected = PublicKey::try_from_slice(public)?;
        if keypair.public_key() != expected {
            return Err(KeyError::KeypairMismatch);
        }
        Ok(keypair)
    }

    /// Parses a hex-encoded 32-byte secret seed.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_secret_key_bytes(&bytes)
    }

    /// Returns the public half.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Produces a detached signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Verifies a signature against this key pair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material.
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Parses and validates a 32-byte Ed25519 public key.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parses a hex-encoded public key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.trim()).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns `true` if `signature` is a valid signature of `message`.
    ///
    /// A boolean, not a `Result`: callers only need yes or no.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Accepts raw bytes from an external signer. Only the length is checked
    /// here; whether the bytes verify is a separate question.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidSignatureLength(slice.len()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
