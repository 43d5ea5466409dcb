// Copyright (c) 2026 CasperLabs. Apache-2.0 License.
// See LICENSE for details.

//! # CasperLabs Deploy — Core Library
//!
//! Client-side assembly of deploys, the signed transactions of the
//! CasperLabs network. Given the code to run, its arguments, a payment
//! budget and a sender, this crate produces the canonical bytes the node
//! expects, hashes them into a deploy hash and attaches Ed25519 approvals.
//!
//! ## Architecture
//!
//! - **deploy** — Argument encoding, code descriptors, assembly, approvals
//!   and verification.
//! - **crypto** — BLAKE2b-256 content hashing and Ed25519 key wrappers.
//! - **config** — Wire constants and network limits.
//!
//! ## Ground rules
//!
//! 1. Encoding is deterministic. The same inputs give the same deploy hash on
//!    every platform.
//! 2. Nothing here reads the clock, the network or the filesystem. Timestamps
//!    and keys are passed in.
//! 3. Once assembled, a deploy only ever changes its approval list.
//!
//! ## Example
//!
//! ```
//! use casperlabs_deploy::crypto::KeyPair;
//! use casperlabs_deploy::deploy::{sign_deploy, ArgValue, CodeDescriptor, DeployBuilder, RuntimeArgs};
//!
//! let args = RuntimeArgs::new().with("purse_name", ArgValue::string("my_purse"));
//! let session = CodeDescriptor::stored_by_name("purse_holder", "add_named_purse", args)?;
//! let deploy = DeployBuilder::new(session, [0u8; 32], 1_600_000_000_000)
//!     .payment_amount(10_000u64)
//!     .build()?;
//!
//! let signed = sign_deploy(deploy, &KeyPair::from_seed(&[1u8; 32]));
//! assert!(signed.is_approved());
//! # Ok::<(), casperlabs_deploy::deploy::DeployError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod deploy;
