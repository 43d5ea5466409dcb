//! # Detached Signatures
//!
//! Free-function entry points for Ed25519 signing and verification. Every
//! approval in the crate is produced and checked through here, so this is the
//! one place to audit.
//!
//! Verification uses `ed25519-dalek`'s default (cofactorless) check, which is
//! what the node applies when it validates approvals.

use super::keys::{KeyPair, PublicKey, Signature};

/// Signs `message` with `keypair`.
///
/// # Example
///
/// ```
/// use casperlabs_deploy::crypto::{sign, verify, KeyPair};
///
/// let keypair = KeyPair::from_seed(&[42u8; 32]);
/// let signature = sign(&keypair, b"deploy hash");
/// assert!(verify(&keypair.public_key(), b"deploy hash", &signature));
/// ```
pub fn sign(keypair: &KeyPair, message: &[u8]) -> Signature {
    keypair.sign(message)
}

/// Returns `true` if `signature` over `message` verifies under `public_key`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let sig = sign(&kp, b"hello");
        assert!(verify(&kp.public_key(), b"hello", &sig));
        assert!(!verify(&kp.public_key(), b"hell0", &sig));
    }

    #[test]
    fn signature_is_bound_to_key() {
        let kp1 = KeyPair::from_seed(&[3u8; 32]);
        let kp2 = KeyPair::from_seed(&[4u8; 32]);
        let sig = sign(&kp1, b"one");
        assert!(!verify(&kp2.public_key(), b"one", &sig));
    }
}
