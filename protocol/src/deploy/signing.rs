//! Approvals: Ed25519 signatures over a deploy hash.
//!
//! Signing is separate from assembly because the key may not be available
//! when the deploy is built (hardware wallet, remote signer, a second party
//! co-signing). The signed message is always the raw 32 bytes of the deploy
//! hash, never the hex string and never the body.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::builder::Deploy;
use super::codec::{hex_array, write_bytes, write_string, EncodingError, ToBytes};
use crate::config::{SIGNATURE_ALGORITHM, SIGNATURE_LENGTH};
use crate::crypto::{sign, KeyError, KeyPair, PublicKey, Signature};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// An approval could not be produced or attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

/// Signature record inside an [`Approval`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalSignature {
    /// Always `"ed25519"` for approvals produced by this crate.
    pub algorithm: String,
    #[serde(with = "hex_array")]
    pub bytes: [u8; SIGNATURE_LENGTH],
}

/// One party's consent to a deploy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Approval {
    pub signer_public_key: PublicKey,
    pub signature: ApprovalSignature,
}

impl Approval {
    pub fn new(signer_public_key: PublicKey, signature: &Signature) -> Self {
        Self {
            signer_public_key,
            signature: ApprovalSignature {
                algorithm: SIGNATURE_ALGORITHM.to_string(),
                bytes: *signature.as_bytes(),
            },
        }
    }

    /// The signature bytes as a verifiable [`Signature`].
    pub fn signature(&self) -> Signature {
        Signature::from_bytes(self.signature.bytes)
    }
}

impl ToBytes for Approval {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_bytes(buf, self.signer_public_key.as_bytes())?;
        write_string(buf, &self.signature.algorithm)?;
        write_bytes(buf, &self.signature.bytes)
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signs the deploy hash with `keypair`.
///
/// The approval list is replaced by the single new approval. The deploy
/// hash, header and body are untouched.
///
/// # Example
///
/// ```
/// use casperlabs_deploy::crypto::KeyPair;
/// use casperlabs_deploy::deploy::{sign_deploy, verify_deploy, CodeDescriptor, DeployBuilder, RuntimeArgs};
///
/// let session = CodeDescriptor::stored_by_name("purse_holder", "add_named_purse", RuntimeArgs::new()).unwrap();
/// let deploy = DeployBuilder::new(session, [0u8; 32], 1_600_000_000_000)
///     .payment_amount(10_000u64)
///     .build()
///     .unwrap();
///
/// let keypair = KeyPair::from_seed(&[7u8; 32]);
/// let signed = sign_deploy(deploy, &keypair);
/// assert_eq!(signed.approvals().len(), 1);
/// assert!(verify_deploy(&signed).is_ok());
/// ```
pub fn sign_deploy(deploy: Deploy, keypair: &KeyPair) -> Deploy {
    let signature = sign(keypair, deploy.deploy_hash().as_bytes());
    let approval = Approval::new(keypair.public_key(), &signature);
    debug!(
        deploy_hash = %deploy.deploy_hash(),
        signer = %approval.signer_public_key,
        "signed deploy"
    );
    deploy.replace_approvals(approval)
}

/// Attaches a signature produced elsewhere over the deploy hash.
///
/// Only the shapes are checked: the public key must be a valid 32-byte
/// Ed25519 point and the signature exactly 64 bytes. Whether it verifies is
/// left to [`verify_deploy`](super::verify_deploy). Like [`sign_deploy`],
/// this replaces any existing approvals.
pub fn attach_approval(
    deploy: Deploy,
    signature_bytes: &[u8],
    public_key_bytes: &[u8],
) -> Result<Deploy, SigningError> {
    let public_key = PublicKey::try_from_slice(public_key_bytes)?;
    let signature = Signature::try_from_slice(signature_bytes)?;
    let approval = Approval::new(public_key, &signature);
    debug!(
        deploy_hash = %deploy.deploy_hash(),
        signer = %public_key,
        "attached external approval"
    );
    Ok(deploy.replace_approvals(approval))
}
