//! The stored purse holder contract.
//!
//! Installed once per account under the named key [`CONTRACT_NAME`]; its
//! [`ENTRY_POINT_ADD_NAMED_PURSE`] entry point creates a purse and stores it
//! under the given name.

use casperlabs_deploy::deploy::{
    ArgValue, CodeDescriptor, ContractHash, InvalidCodeDescriptor, RuntimeArgs,
};

pub const CONTRACT_NAME: &str = "purse_holder";
pub const ENTRY_POINT_ADD_NAMED_PURSE: &str = "add_named_purse";
pub const ARG_PURSE_NAME: &str = "purse_name";

fn args(purse_name: &str) -> RuntimeArgs {
    RuntimeArgs::new().with(ARG_PURSE_NAME, ArgValue::string(purse_name))
}

/// Calls the purse holder through the sender's named key.
pub fn add_named_purse(purse_name: &str) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    CodeDescriptor::stored_by_name(CONTRACT_NAME, ENTRY_POINT_ADD_NAMED_PURSE, args(purse_name))
}

/// Calls a purse holder installed by another account, by contract hash.
pub fn add_named_purse_at(
    hash: ContractHash,
    purse_name: &str,
) -> Result<CodeDescriptor, InvalidCodeDescriptor> {
    CodeDescriptor::stored_by_hash(hash, ENTRY_POINT_ADD_NAMED_PURSE, args(purse_name))
}
