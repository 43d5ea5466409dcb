//! Token transfers.

use casperlabs_deploy::deploy::{
    ArgValue, CodeDescriptor, InvalidCodeDescriptor, Key, RuntimeArgs,
};

use crate::{amount, ARG_AMOUNT};

pub const ARG_TARGET: &str = "target";
pub const ARG_SOURCE_PURSE: &str = "source_purse";
pub const ARG_TARGET_PURSE: &str = "target_purse";

/// Transfers from the sender's main purse to the account `target`,
/// creating the account if it does not exist yet.
pub fn to_account(
    wasm: impl Into<Vec<u8>>,
    target: [u8; 32],
    motes: u128,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let args = RuntimeArgs::new()
        .with(ARG_TARGET, ArgValue::Key(Key::Account(target)))
        .with(ARG_AMOUNT, amount(motes));
    CodeDescriptor::executable(wasm, args)
}

/// Transfers between two purses held under named keys of the sender.
pub fn purse_to_purse(
    wasm: impl Into<Vec<u8>>,
    source_purse: &str,
    target_purse: &str,
    motes: u128,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let args = RuntimeArgs::new()
        .with(ARG_SOURCE_PURSE, ArgValue::string(source_purse))
        .with(ARG_TARGET_PURSE, ArgValue::string(target_purse))
        .with(ARG_AMOUNT, amount(motes));
    CodeDescriptor::executable(wasm, args)
}
