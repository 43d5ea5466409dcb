//! # Protocol Constants
//!
//! Every wire-level constant the deploy format depends on lives here. These
//! must match the node's deserializer; changing one changes every deploy
//! hash computed afterwards.

// ---------------------------------------------------------------------------
// Hashing & Signing
// ---------------------------------------------------------------------------

/// Content hash function used for body hashes and deploy hashes.
pub const HASH_FUNCTION: &str = "BLAKE2b-256";

/// Length of every content hash, deploy hash and contract hash.
pub const HASH_LENGTH: usize = 32;

/// Algorithm name written into every approval's signature record.
pub const SIGNATURE_ALGORITHM: &str = "ed25519";

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Deploy defaults
// ---------------------------------------------------------------------------

/// Gas price stamped into headers when the caller does not choose one.
pub const DEFAULT_GAS_PRICE: u64 = 1;

/// Name of the single argument carried by standard payment code.
pub const STANDARD_PAYMENT_ARG_AMOUNT: &str = "amount";

/// Maximum number of dependencies a header may list.
pub const MAX_DEPENDENCIES: usize = 10;

/// Upper bound on a serialized deploy (header + body + approvals).
///
/// Should be kept in sync with the network's `max_deploy_size`.
pub const MAX_SERIALIZED_DEPLOY_SIZE: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Wire tags
// ---------------------------------------------------------------------------

/// Code descriptor tag: raw Wasm module bytes.
pub const CODE_TAG_EXECUTABLE: u8 = 0;
/// Code descriptor tag: stored contract addressed by hash.
pub const CODE_TAG_STORED_BY_HASH: u8 = 1;
/// Code descriptor tag: stored contract addressed by named key.
pub const CODE_TAG_STORED_BY_NAME: u8 = 2;
