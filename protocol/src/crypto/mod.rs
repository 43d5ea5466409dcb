//! # Cryptographic Primitives
//!
//! Everything that hashes or signs goes through this module:
//!
//! - **BLAKE2b-256** for content hashes ([`hash`]), the network's addressing
//!   function.
//! - **Ed25519** for approvals ([`sign`], [`verify`]).
//!
//! Both are thin wrappers around audited crates (`blake2`, `ed25519-dalek`).

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{hash, Digest};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
pub use signatures::{sign, verify};
