//! Validator bonding and unbonding.
//!
//! Both are session Wasm supplied by the caller. Bonding moves `amount`
//! motes into the proof-of-stake contract; unbonding withdraws either a
//! given amount or, with `None`, the whole stake.

use casperlabs_deploy::deploy::{ArgValue, CodeDescriptor, InvalidCodeDescriptor, RuntimeArgs};

use crate::{amount, ARG_AMOUNT};

pub fn bond(
    wasm: impl Into<Vec<u8>>,
    motes: u128,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let args = RuntimeArgs::new().with(ARG_AMOUNT, amount(motes));
    CodeDescriptor::executable(wasm, args)
}

pub fn unbond(
    wasm: impl Into<Vec<u8>>,
    motes: Option<u128>,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    let value = ArgValue::Option(motes.map(|m| Box::new(amount(m))));
    let args = RuntimeArgs::new().with(ARG_AMOUNT, value);
    CodeDescriptor::executable(wasm, args)
}
