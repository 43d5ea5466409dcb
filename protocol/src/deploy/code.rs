//! Code descriptors: what a deploy runs for its session and its payment.
//!
//! A descriptor names the code (raw Wasm, or a contract already stored on
//! chain) together with the arguments it is called with. The three shapes
//! are a closed set, so they are an enum rather than a family of optional
//! fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::args::{decode_args, ArgValue, BigUintWidth, RuntimeArgs};
use super::codec::{hex_bytes, write_bytes, write_string, EncodingError, ToBytes};
use super::types::ContractHash;
use crate::config::{
    CODE_TAG_EXECUTABLE, CODE_TAG_STORED_BY_HASH, CODE_TAG_STORED_BY_NAME,
    STANDARD_PAYMENT_ARG_AMOUNT,
};

/// A descriptor violates its shape rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCodeDescriptor {
    #[error("executable code must carry non-empty module bytes")]
    EmptyModuleBytes,

    #[error("stored contract call is missing its entry point")]
    MissingEntryPoint,

    #[error("stored contract name must not be empty")]
    EmptyContractName,
}

/// Code to execute, with its call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeDescriptor {
    /// Raw Wasm shipped inside the deploy.
    Executable {
        #[serde(with = "hex_bytes")]
        module_bytes: Vec<u8>,
        args: RuntimeArgs,
    },
    /// A stored contract addressed by its hash.
    StoredByHash {
        hash: ContractHash,
        entry_point: String,
        args: RuntimeArgs,
    },
    /// A stored contract addressed by a named key in the caller's account.
    StoredByName {
        name: String,
        entry_point: String,
        args: RuntimeArgs,
    },
}

impl CodeDescriptor {
    pub fn executable(
        module_bytes: impl Into<Vec<u8>>,
        args: RuntimeArgs,
    ) -> Result<Self, InvalidCodeDescriptor> {
        let module_bytes = module_bytes.into();
        if module_bytes.is_empty() {
            return Err(InvalidCodeDescriptor::EmptyModuleBytes);
        }
        Ok(Self::Executable { module_bytes, args })
    }

    pub fn stored_by_hash(
        hash: ContractHash,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Result<Self, InvalidCodeDescriptor> {
        let entry_point = entry_point.into();
        if entry_point.is_empty() {
            return Err(InvalidCodeDescriptor::MissingEntryPoint);
        }
        Ok(Self::StoredByHash {
            hash,
            entry_point,
            args,
        })
    }

    pub fn stored_by_name(
        name: impl Into<String>,
        entry_point: impl Into<String>,
        args: RuntimeArgs,
    ) -> Result<Self, InvalidCodeDescriptor> {
        let name = name.into();
        let entry_point = entry_point.into();
        if name.is_empty() {
            return Err(InvalidCodeDescriptor::EmptyContractName);
        }
        if entry_point.is_empty() {
            return Err(InvalidCodeDescriptor::MissingEntryPoint);
        }
        Ok(Self::StoredByName {
            name,
            entry_point,
            args,
        })
    }

    /// The network's built-in payment: empty module bytes plus a single
    /// `amount: U512` argument. The only `Executable` allowed to be empty.
    pub fn standard_payment(amount: impl Into<u128>) -> Self {
        Self::Executable {
            module_bytes: Vec::new(),
            args: standard_payment_args(amount.into()),
        }
    }

    /// Replaces the arguments with an already-encoded list.
    ///
    /// The bytes are decoded and checked, so a malformed list is rejected
    /// here rather than when the deploy is hashed.
    pub fn with_encoded_args(self, encoded: &[u8]) -> Result<Self, EncodingError> {
        let args = decode_args(encoded)?;
        Ok(self.with_args(args))
    }

    pub fn with_args(mut self, new_args: RuntimeArgs) -> Self {
        match &mut self {
            Self::Executable { args, .. }
            | Self::StoredByHash { args, .. }
            | Self::StoredByName { args, .. } => *args = new_args,
        }
        self
    }

    pub fn args(&self) -> &RuntimeArgs {
        match self {
            Self::Executable { args, .. }
            | Self::StoredByHash { args, .. }
            | Self::StoredByName { args, .. } => args,
        }
    }

    pub fn entry_point(&self) -> Option<&str> {
        match self {
            Self::Executable { .. } => None,
            Self::StoredByHash { entry_point, .. } | Self::StoredByName { entry_point, .. } => {
                Some(entry_point)
            }
        }
    }

    /// Wire tag of this variant.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Executable { .. } => CODE_TAG_EXECUTABLE,
            Self::StoredByHash { .. } => CODE_TAG_STORED_BY_HASH,
            Self::StoredByName { .. } => CODE_TAG_STORED_BY_NAME,
        }
    }

    /// `true` for the empty-bytes payment built by [`standard_payment`](Self::standard_payment).
    pub fn is_standard_payment(&self) -> bool {
        match self {
            Self::Executable { module_bytes, args } => {
                module_bytes.is_empty()
                    && args.len() == 1
                    && matches!(
                        args.get(STANDARD_PAYMENT_ARG_AMOUNT),
                        Some(ArgValue::BigUint {
                            width: BigUintWidth::U512,
                            ..
                        })
                    )
            }
            _ => false,
        }
    }

    /// Re-checks the shape rules for the session slot.
    ///
    /// Variants are public, so values built by hand or deserialized from JSON
    /// go through this before they are hashed. Session code always needs
    /// module bytes, even when the arguments look like standard payment.
    pub fn validate_session(&self) -> Result<(), InvalidCodeDescriptor> {
        match self {
            Self::Executable { module_bytes, .. } if module_bytes.is_empty() => {
                Err(InvalidCodeDescriptor::EmptyModuleBytes)
            }
            _ => self.validate_stored(),
        }
    }

    /// Re-checks the shape rules for the payment slot, where the empty
    /// standard-payment executable is allowed.
    pub fn validate_payment(&self) -> Result<(), InvalidCodeDescriptor> {
        match self {
            Self::Executable { module_bytes, .. }
                if module_bytes.is_empty() && !self.is_standard_payment() =>
            {
                Err(InvalidCodeDescriptor::EmptyModuleBytes)
            }
            _ => self.validate_stored(),
        }
    }

    fn validate_stored(&self) -> Result<(), InvalidCodeDescriptor> {
        match self {
            Self::Executable { .. } => Ok(()),
            Self::StoredByHash { entry_point, .. } if entry_point.is_empty() => {
                Err(InvalidCodeDescriptor::MissingEntryPoint)
            }
            Self::StoredByHash { .. } => Ok(()),
            Self::StoredByName { name, .. } if name.is_empty() => {
                Err(InvalidCodeDescriptor::EmptyContractName)
            }
            Self::StoredByName { entry_point, .. } if entry_point.is_empty() => {
                Err(InvalidCodeDescriptor::MissingEntryPoint)
            }
            Self::StoredByName { .. } => Ok(()),
        }
    }
}

impl ToBytes for CodeDescriptor {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        buf.push(self.tag());
        match self {
            Self::Executable { module_bytes, args } => {
                write_bytes(buf, module_bytes)?;
                args.write_bytes(buf)
            }
            Self::StoredByHash {
                hash,
                entry_point,
                args,
            } => {
                buf.extend_from_slice(hash.as_bytes());
                write_string(buf, entry_point)?;
                args.write_bytes(buf)
            }
            Self::StoredByName {
                name,
                entry_point,
                args,
            } => {
                write_string(buf, name)?;
                write_string(buf, entry_point)?;
                args.write_bytes(buf)
            }
        }
    }
}

/// The single-argument list carried by payment code.
pub fn standard_payment_args(amount: u128) -> RuntimeArgs {
    RuntimeArgs::new().with(STANDARD_PAYMENT_ARG_AMOUNT, ArgValue::u512(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::args::encode_args;

    #[test]
    fn executable_rejects_empty_bytes() {
        assert_eq!(
            CodeDescriptor::executable(Vec::<u8>::new(), RuntimeArgs::new()).unwrap_err(),
            InvalidCodeDescriptor::EmptyModuleBytes
        );
    }

    #[test]
    fn stored_variants_require_entry_point() {
        let hash = ContractHash::from_bytes([9; 32]);
        assert_eq!(
            CodeDescriptor::stored_by_hash(hash, "", RuntimeArgs::new()).unwrap_err(),
            InvalidCodeDescriptor::MissingEntryPoint
        );
        assert_eq!(
            CodeDescriptor::stored_by_name("purse_holder", "", RuntimeArgs::new()).unwrap_err(),
            InvalidCodeDescriptor::MissingEntryPoint
        );
        assert_eq!(
            CodeDescriptor::stored_by_name("", "call", RuntimeArgs::new()).unwrap_err(),
            InvalidCodeDescriptor::EmptyContractName
        );
    }

    #[test]
    fn standard_payment_shape() {
        let payment = CodeDescriptor::standard_payment(10_000u64);
        assert!(payment.is_standard_payment());
        assert!(payment.validate_payment().is_ok());
        assert_eq!(payment.args().len(), 1);
        assert_eq!(payment.args().get("amount"), Some(&ArgValue::u512(10_000u64)));
    }

    #[test]
    fn hand_built_empty_executable_fails_validation() {
        let code = CodeDescriptor::Executable {
            module_bytes: Vec::new(),
            args: RuntimeArgs::new().with("amount", ArgValue::U64(1)),
        };
        assert_eq!(code.validate_payment(), Err(InvalidCodeDescriptor::EmptyModuleBytes));
    }

    #[test]
    fn standard_payment_shape_is_not_a_valid_session() {
        let code = CodeDescriptor::standard_payment(5u64);
        assert_eq!(code.validate_session(), Err(InvalidCodeDescriptor::EmptyModuleBytes));
        assert!(code.validate_payment().is_ok());
    }

    #[test]
    fn hand_built_stored_call_is_rechecked_in_both_slots() {
        let code = CodeDescriptor::StoredByName {
            name: "purse_holder".into(),
            entry_point: String::new(),
            args: RuntimeArgs::new(),
        };
        assert_eq!(code.validate_session(), Err(InvalidCodeDescriptor::MissingEntryPoint));
        assert_eq!(code.validate_payment(), Err(InvalidCodeDescriptor::MissingEntryPoint));
    }

    #[test]
    fn stored_by_name_wire_layout() {
        let code = CodeDescriptor::stored_by_name("ab", "c", RuntimeArgs::new()).unwrap();
        assert_eq!(
            code.to_bytes().unwrap(),
            vec![
                CODE_TAG_STORED_BY_NAME,
                2, 0, 0, 0, b'a', b'b',
                1, 0, 0, 0, b'c',
                0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn stored_by_hash_writes_raw_hash() {
        let code =
            CodeDescriptor::stored_by_hash(ContractHash::from_bytes([5; 32]), "x", RuntimeArgs::new())
                .unwrap();
        let bytes = code.to_bytes().unwrap();
        assert_eq!(bytes[0], CODE_TAG_STORED_BY_HASH);
        assert_eq!(&bytes[1..33], &[5; 32]);
        assert_eq!(&bytes[33..], &[1, 0, 0, 0, b'x', 0, 0, 0, 0]);
    }

    #[test]
    fn encoded_args_match_typed_args() {
        let args = RuntimeArgs::new().with("purse_name", ArgValue::string("my_purse"));
        let encoded = encode_args(args.as_slice()).unwrap();

        let typed = CodeDescriptor::stored_by_name("purse_holder", "add_named_purse", args).unwrap();
        let pre_encoded =
            CodeDescriptor::stored_by_name("purse_holder", "add_named_purse", RuntimeArgs::new())
                .unwrap()
                .with_encoded_args(&encoded)
                .unwrap();

        assert_eq!(typed.to_bytes().unwrap(), pre_encoded.to_bytes().unwrap());
    }

    #[test]
    fn malformed_encoded_args_are_rejected() {
        let code = CodeDescriptor::standard_payment(1u64);
        assert!(code.with_encoded_args(&[1, 0, 0]).is_err());
    }
}
