//! Deploy verification: hash-chain consistency and approval signatures.
//!
//! A deploy that arrives as JSON can claim any hashes it likes.
//! [`verify_deploy`] recomputes both links of the chain and checks every
//! approval, cheapest checks first.

use thiserror::Error;

use super::builder::Deploy;
use super::codec::{EncodingError, ToBytes};
use super::signing::Approval;
use super::types::DeployHash;
use crate::config::{MAX_SERIALIZED_DEPLOY_SIZE, SIGNATURE_ALGORITHM};
use crate::crypto::{verify, Digest};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a deploy fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("body hash mismatch: header says {expected}, body hashes to {actual}")]
    BodyHashMismatch { expected: Digest, actual: Digest },

    #[error("deploy hash mismatch: deploy says {expected}, header hashes to {actual}")]
    DeployHashMismatch {
        expected: DeployHash,
        actual: DeployHash,
    },

    #[error("deploy could not be re-encoded: {0}")]
    Encoding(#[from] EncodingError),

    #[error("serialized deploy is {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("deploy has no approvals")]
    NoApprovals,

    #[error("approval {index} uses unsupported algorithm {algorithm:?}")]
    UnsupportedAlgorithm { index: usize, algorithm: String },

    #[error("approval {index} from {signer} does not verify")]
    InvalidApproval { index: usize, signer: String },
}

/// Checks a deploy end to end.
///
/// In order:
///
/// 1. the body hashes to the header's body hash;
/// 2. the header hashes to the deploy hash;
/// 3. the full encoding fits in [`MAX_SERIALIZED_DEPLOY_SIZE`];
/// 4. there is at least one approval;
/// 5. every approval is `ed25519` and verifies over the deploy hash.
pub fn verify_deploy(deploy: &Deploy) -> Result<(), VerificationError> {
    check_hash_chain(deploy)?;

    let size = deploy.to_bytes()?.len();
    if size > MAX_SERIALIZED_DEPLOY_SIZE {
        return Err(VerificationError::TooLarge {
            size,
            max: MAX_SERIALIZED_DEPLOY_SIZE,
        });
    }

    if deploy.approvals().is_empty() {
        return Err(VerificationError::NoApprovals);
    }

    for (index, approval) in deploy.approvals().iter().enumerate() {
        if approval.signature.algorithm != SIGNATURE_ALGORITHM {
            return Err(VerificationError::UnsupportedAlgorithm {
                index,
                algorithm: approval.signature.algorithm.clone(),
            });
        }
        if !verify_approval(deploy.deploy_hash(), approval) {
            return Err(VerificationError::InvalidApproval {
                index,
                signer: approval.signer_public_key.to_hex(),
            });
        }
    }

    Ok(())
}

/// Recomputes the body hash and the deploy hash and compares them with the
/// stored ones. Also run whenever a deploy is deserialized.
pub(crate) fn check_hash_chain(deploy: &Deploy) -> Result<(), VerificationError> {
    let actual_body_hash = deploy.body().hash()?;
    if actual_body_hash != *deploy.header().body_hash() {
        return Err(VerificationError::BodyHashMismatch {
            expected: *deploy.header().body_hash(),
            actual: actual_body_hash,
        });
    }

    let actual_deploy_hash = deploy.header().hash()?;
    if actual_deploy_hash != *deploy.deploy_hash() {
        return Err(VerificationError::DeployHashMismatch {
            expected: *deploy.deploy_hash(),
            actual: actual_deploy_hash,
        });
    }
    Ok(())
}

/// Returns `true` if `approval` is a valid ed25519 signature over `deploy_hash`.
pub fn verify_approval(deploy_hash: &DeployHash, approval: &Approval) -> bool {
    approval.signature.algorithm == SIGNATURE_ALGORITHM
        && verify(
            &approval.signer_public_key,
            deploy_hash.as_bytes(),
            &approval.signature(),
        )
}
