//! The explorer faucet.
//!
//! Sends a fixed [`TRANSFER_AMOUNT`] to an account that has never been
//! funded by it before. Failures come back as user return codes.

use casperlabs_deploy::deploy::{
    ArgValue, CodeDescriptor, InvalidCodeDescriptor, Key, RuntimeArgs,
};

use crate::ContractOutcome;

/// Motes sent per successful call.
pub const TRANSFER_AMOUNT: u128 = 10_000_000;

pub const ARG_ACCOUNT: &str = "account";

/// The account was funded by the faucet before.
pub const ALREADY_FUNDED: u32 = 1;
/// The transfer itself failed.
pub const TRANSFER_FAILED: u32 = 2;

pub fn fund(
    wasm: impl Into<Vec<u8>>,
    account: [u8; 32],
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let args = RuntimeArgs::new().with(ARG_ACCOUNT, ArgValue::Key(Key::Account(account)));
    CodeDescriptor::executable(wasm, args)
}

/// Human-readable reason for a faucet failure, if the code is one it uses.
pub fn describe(outcome: ContractOutcome) -> Option<&'static str> {
    match outcome {
        ContractOutcome::Failure(ALREADY_FUNDED) => Some("account already funded"),
        ContractOutcome::Failure(TRANSFER_FAILED) => Some("transfer failed"),
        _ => None,
    }
}
