//! # CasperLabs Contract Presets
//!
//! Ready-made [`CodeDescriptor`](casperlabs_deploy::deploy::CodeDescriptor)s for the contracts a client talks to most.
//! Each preset knows its contract's stored name or entry point and the
//! argument names the contract reads, so callers only supply values:
//!
//! - **payment** — standard payment and payment from a named purse.
//! - **purse_holder** — create named purses through the stored purse holder.
//! - **bonding** — bond and unbond validator stake.
//! - **transfer** — account and purse-to-purse transfers.
//! - **faucet** — the explorer faucet.
//!
//! [`ContractOutcome`] interprets the numeric result a contract returns.
//!
//! Amounts are token motes and are always sent as `U512`.

use casperlabs_deploy::deploy::ArgValue;

pub mod bonding;
pub mod faucet;
pub mod outcome;
pub mod payment;
pub mod purse_holder;
pub mod transfer;

pub use outcome::ContractOutcome;
pub use payment::standard_payment;

/// Argument name every amount-taking contract reads.
pub const ARG_AMOUNT: &str = "amount";

pub(crate) fn amount(value: u128) -> ArgValue {
    ArgValue::u512(value)
}
