//! Contract return codes.
//!
//! A contract reports its result as a number: `0` for success and a
//! positive, contract-defined code for a failure. What each failure code
//! means is up to the contract (see [`crate::faucet`] for an example).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classified result of a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractOutcome {
    Success,
    /// Failure with the contract's own code, always non-zero.
    Failure(u32),
}

/// A failed contract call, for callers that want a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("contract failed with code {0}")]
pub struct ContractFailure(pub u32);

impl ContractOutcome {
    pub fn from_return_code(code: u32) -> Self {
        match code {
            0 => Self::Success,
            code => Self::Failure(code),
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn into_result(self) -> Result<(), ContractFailure> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(code) => Err(ContractFailure(code)),
        }
    }
}

impl fmt::Display for ContractOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure(code) => write!(f, "failure (code {code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_success() {
        assert_eq!(ContractOutcome::from_return_code(0), ContractOutcome::Success);
        assert!(ContractOutcome::from_return_code(0).into_result().is_ok());
    }

    #[test]
    fn positive_is_failure_with_code() {
        let outcome = ContractOutcome::from_return_code(2);
        assert_eq!(outcome, ContractOutcome::Failure(2));
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_result(), Err(ContractFailure(2)));
        assert_eq!(outcome.to_string(), "failure (code 2)");
    }
}
