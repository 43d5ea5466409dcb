//! # Deploy Module
//!
//! Assembly, hashing, signing and verification of CasperLabs deploys.
//!
//! ## Architecture
//!
//! ```text
//! codec.rs        — Canonical byte writer/reader shared by everything below
//! args.rs         — Typed arguments (ArgValue, RuntimeArgs) and their encoding
//! code.rs         — CodeDescriptor: session and payment code with arguments
//! types.rs        — DeployHash, ContractHash, DeployState
//! builder.rs      — Body, Header, Deploy, assemble() and DeployBuilder
//! signing.rs      — Approvals: sign_deploy, attach_approval
//! verification.rs — Hash-chain and approval checks
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Describe** — build session and payment [`CodeDescriptor`]s.
//! 2. **Assemble** — [`assemble`] or [`DeployBuilder`] hashes the body, then
//!    the header. The deploy hash is fixed from here on.
//! 3. **Approve** — [`sign_deploy`] with a local key, or [`attach_approval`]
//!    with a signature produced elsewhere.
//! 4. **Submit** — hand the JSON to an RPC client, unmodified.
//!
//! Only step 3 touches the deploy after assembly, and it only touches the
//! approval list.

pub mod args;
pub mod builder;
pub mod code;
pub mod codec;
pub mod signing;
pub mod types;
pub mod verification;

pub use args::{decode_args, encode_args, Arg, ArgValue, BigUintWidth, Key, RuntimeArgs};
pub use builder::{assemble, Body, Deploy, DeployBuilder, DeployError, Header};
pub use code::{standard_payment_args, CodeDescriptor, InvalidCodeDescriptor};
pub use codec::{EncodingError, ToBytes};
pub use signing::{attach_approval, sign_deploy, Approval, ApprovalSignature, SigningError};
pub use types::{ContractHash, DeployHash, DeployState};
pub use verification::{verify_approval, verify_deploy, VerificationError};
