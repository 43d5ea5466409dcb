//! Payment code.

use casperlabs_deploy::deploy::{ArgValue, CodeDescriptor, InvalidCodeDescriptor, RuntimeArgs};

use crate::{amount, ARG_AMOUNT};

pub const ARG_PURSE_NAME: &str = "purse_name";

/// The network's built-in payment, paying `motes` from the main purse.
pub fn standard_payment(motes: u128) -> CodeDescriptor {
    CodeDescriptor::standard_payment(motes)
}

/// Pays from a purse stored under `purse_name` in the sender's named keys,
/// refunding any remainder to the same purse.
pub fn named_purse(
    wasm: impl Into<Vec<u8>>,
    purse_name: &str,
    motes: u128,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let args = RuntimeArgs::new()
        .with(ARG_PURSE_NAME, ArgValue::string(purse_name))
        .with(ARG_AMOUNT, amount(motes));
    CodeDescriptor::executable(wasm, args)
}
