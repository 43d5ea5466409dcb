//! Deploy assembly and the two-stage hash chain.
//!
//! [`assemble`] turns a session descriptor, a payment descriptor and the
//! header fields into a [`Deploy`]:
//!
//! ```text
//! serialize(Body{session, payment}) ──hash──► body_hash
//! serialize(Header{sender, timestamp, body_hash, gas_price, deps}) ──hash──► deploy_hash
//! ```
//!
//! The body hash commits the header to the body, and the deploy hash commits
//! everything to the header. The builder does not sign; see
//! [`super::signing`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::code::{CodeDescriptor, InvalidCodeDescriptor};
use super::codec::{write_bytes, write_len, write_u64, EncodingError, ToBytes};
use super::signing::{Approval, SigningError};
use super::types::{DeployHash, DeployState};
use super::verification::{check_hash_chain, VerificationError};
use crate::config::{DEFAULT_GAS_PRICE, MAX_DEPENDENCIES, MAX_SERIALIZED_DEPLOY_SIZE};
use crate::crypto::{hash, Digest};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Any failure while building, signing or checking a deploy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    InvalidCode(#[from] InvalidCodeDescriptor),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("too many dependencies: {count} (max {max})")]
    TooManyDependencies { count: usize, max: usize },

    #[error("serialized deploy is {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// The code a deploy runs: session logic plus the payment that funds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    session: CodeDescriptor,
    payment: CodeDescriptor,
}

impl Body {
    pub fn session(&self) -> &CodeDescriptor {
        &self.session
    }

    pub fn payment(&self) -> &CodeDescriptor {
        &self.payment
    }

    /// Hash of the serialized body.
    pub fn hash(&self) -> Result<Digest, EncodingError> {
        Ok(hash(&self.to_bytes()?))
    }
}

impl ToBytes for Body {
    /// Session first, then payment.
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.session.write_bytes(buf)?;
        self.payment.write_bytes(buf)
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Metadata committed to by the deploy hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(with = "super::codec::hex_bytes")]
    sender_identity_hash: Vec<u8>,
    timestamp_millis: u64,
    body_hash: Digest,
    gas_price: u64,
    dependencies: Vec<DeployHash>,
}

impl Header {
    pub fn sender_identity_hash(&self) -> &[u8] {
        &self.sender_identity_hash
    }

    pub fn timestamp_millis(&self) -> u64 {
        self.timestamp_millis
    }

    pub fn body_hash(&self) -> &Digest {
        &self.body_hash
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn dependencies(&self) -> &[DeployHash] {
        &self.dependencies
    }

    /// Hash of the serialized header, i.e. the deploy hash.
    pub fn hash(&self) -> Result<DeployHash, EncodingError> {
        Ok(DeployHash::new(hash(&self.to_bytes()?)))
    }
}

impl ToBytes for Header {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_bytes(buf, &self.sender_identity_hash)?;
        write_u64(buf, self.timestamp_millis);
        buf.extend_from_slice(self.body_hash.as_bytes());
        write_u64(buf, self.gas_price);
        write_len(buf, self.dependencies.len())?;
        for dependency in &self.dependencies {
            buf.extend_from_slice(dependency.as_bytes());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Deploy
// ---------------------------------------------------------------------------

/// An assembled deploy.
///
/// Header, body and deploy hash are fixed at assembly. The only thing that
/// changes afterwards is the approval list, and approvals do not feed into
/// the deploy hash.
///
/// Deserializing recomputes both hashes, so a `Deploy` loaded from JSON whose
/// body or header no longer matches its deploy hash is rejected on load and
/// can never be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedDeploy")]
pub struct Deploy {
    deploy_hash: DeployHash,
    header: Header,
    body: Body,
    approvals: Vec<Approval>,
}

/// Wire shape of a [`Deploy`] whose hash chain has not been checked yet.
#[derive(Deserialize)]
struct UncheckedDeploy {
    deploy_hash: DeployHash,
    header: Header,
    body: Body,
    approvals: Vec<Approval>,
}

impl TryFrom<UncheckedDeploy> for Deploy {
    type Error = VerificationError;

    fn try_from(raw: UncheckedDeploy) -> Result<Self, Self::Error> {
        let deploy = Self {
            deploy_hash: raw.deploy_hash,
            header: raw.header,
            body: raw.body,
            approvals: raw.approvals,
        };
        check_hash_chain(&deploy)?;
        Ok(deploy)
    }
}

impl Deploy {
    pub fn deploy_hash(&self) -> &DeployHash {
        &self.deploy_hash
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    pub fn state(&self) -> DeployState {
        if self.approvals.is_empty() {
            DeployState::Unapproved
        } else {
            DeployState::Approved
        }
    }

    pub fn is_approved(&self) -> bool {
        self.state() == DeployState::Approved
    }

    /// Appends an approval, keeping the existing ones.
    ///
    /// For collaborators that merge co-signatures. Order is preserved and
    /// duplicates are kept.
    pub fn push_approval(&mut self, approval: Approval) {
        debug!(
            deploy_hash = %self.deploy_hash,
            signer = %approval.signer_public_key,
            "appended approval"
        );
        self.approvals.push(approval);
    }

    pub(crate) fn replace_approvals(mut self, approval: Approval) -> Self {
        self.approvals = vec![approval];
        self
    }

    /// Size of the full wire encoding: header, body, then approvals.
    pub fn serialized_size(&self) -> Result<usize, EncodingError> {
        Ok(self.to_bytes()?.len())
    }
}

impl ToBytes for Deploy {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.header.write_bytes(buf)?;
        self.body.write_bytes(buf)?;
        write_len(buf, self.approvals.len())?;
        for approval in &self.approvals {
            approval.write_bytes(buf)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Builds an unapproved deploy.
///
/// Steps, in order: serialize the body (session then payment) and hash it;
/// build the header around that body hash, serialize and hash it; wrap both
/// with an empty approval list.
///
/// `timestamp_millis` is supplied by the caller; nothing here reads a clock.
/// Dependencies are kept in the given order, duplicates included.
///
/// # Errors
///
/// - [`DeployError::InvalidCode`] if either descriptor breaks its shape rules.
///   Empty module bytes are only allowed in the payment slot, as standard
///   payment.
/// - [`DeployError::Encoding`] if an argument cannot be encoded.
/// - [`DeployError::TooManyDependencies`] past [`MAX_DEPENDENCIES`].
/// - [`DeployError::TooLarge`] past [`MAX_SERIALIZED_DEPLOY_SIZE`].
pub fn assemble(
    session: CodeDescriptor,
    payment: CodeDescriptor,
    sender_identity_hash: impl Into<Vec<u8>>,
    timestamp_millis: u64,
    gas_price: u64,
    dependencies: Vec<DeployHash>,
) -> Result<Deploy, DeployError> {
    session.validate_session()?;
    payment.validate_payment()?;
    if dependencies.len() > MAX_DEPENDENCIES {
        return Err(DeployError::TooManyDependencies {
            count: dependencies.len(),
            max: MAX_DEPENDENCIES,
        });
    }

    let body = Body { session, payment };
    let body_bytes = body.to_bytes()?;
    let body_hash = hash(&body_bytes);

    let header = Header {
        sender_identity_hash: sender_identity_hash.into(),
        timestamp_millis,
        body_hash,
        gas_price,
        dependencies,
    };
    let header_bytes = header.to_bytes()?;
    let deploy_hash = DeployHash::new(hash(&header_bytes));

    // No approvals yet, so the wire size is header + body + empty list prefix.
    let size = header_bytes.len() + body_bytes.len() + 4;
    if size > MAX_SERIALIZED_DEPLOY_SIZE {
        return Err(DeployError::TooLarge {
            size,
            max: MAX_SERIALIZED_DEPLOY_SIZE,
        });
    }

    debug!(
        %deploy_hash,
        %body_hash,
        timestamp_millis,
        gas_price,
        size,
        "assembled deploy"
    );

    Ok(Deploy {
        deploy_hash,
        header,
        body,
        approvals: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// DeployBuilder
// ---------------------------------------------------------------------------

/// Fluent front end to [`assemble`].
///
/// Payment defaults to the network's standard payment carrying
/// `payment_amount`. Supplying payment Wasm wraps it as an `Executable` with
/// the same single `amount` argument.
///
/// # Usage
///
/// ```
/// use casperlabs_deploy::deploy::{ArgValue, CodeDescriptor, DeployBuilder, RuntimeArgs};
///
/// let args = RuntimeArgs::new().with("purse_name", ArgValue::string("my_purse"));
/// let session = CodeDescriptor::stored_by_name("purse_holder", "add_named_purse", args).unwrap();
///
/// let deploy = DeployBuilder::new(session, [0u8; 32], 1_600_000_000_000)
///     .payment_amount(10_000u64)
///     .build()
///     .unwrap();
/// assert!(deploy.body().payment().is_standard_payment());
/// ```
#[derive(Debug, Clone)]
pub struct DeployBuilder {
    session: CodeDescriptor,
    sender_identity_hash: Vec<u8>,
    timestamp_millis: u64,
    payment: Option<CodeDescriptor>,
    payment_wasm: Option<Vec<u8>>,
    payment_amount: u128,
    gas_price: u64,
    dependencies: Vec<DeployHash>,
}

impl DeployBuilder {
    pub fn new(
        session: CodeDescriptor,
        sender_identity_hash: impl Into<Vec<u8>>,
        timestamp_millis: u64,
    ) -> Self {
        Self {
            session,
            sender_identity_hash: sender_identity_hash.into(),
            timestamp_millis,
            payment: None,
            payment_wasm: None,
            payment_amount: 0,
            gas_price: DEFAULT_GAS_PRICE,
            dependencies: Vec::new(),
        }
    }

    /// Token budget passed to payment code as its `amount` argument.
    pub fn payment_amount(mut self, amount: impl Into<u128>) -> Self {
        self.payment_amount = amount.into();
        self
    }

    /// Custom payment Wasm, called with the `amount` argument.
    pub fn payment_wasm(mut self, wasm: impl Into<Vec<u8>>) -> Self {
        self.payment_wasm = Some(wasm.into());
        self
    }

    /// A fully specified payment descriptor. Overrides `payment_wasm` and
    /// `payment_amount`.
    pub fn payment(mut self, payment: CodeDescriptor) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn dependency(mut self, dependency: DeployHash) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = DeployHash>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn build(self) -> Result<Deploy, DeployError> {
        let payment = match (self.payment, self.payment_wasm) {
            (Some(payment), _) => payment,
            (None, Some(wasm)) => CodeDescriptor::executable(
                wasm,
                super::code::standard_payment_args(self.payment_amount),
            )?,
            (None, None) => CodeDescriptor::standard_payment(self.payment_amount),
        };
        assemble(
            self.session,
            payment,
            self.sender_identity_hash,
            self.timestamp_millis,
            self.gas_price,
            self.dependencies,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
