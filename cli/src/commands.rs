//! Subcommand implementations.
//!
//! Each command reads its inputs, calls into `casperlabs_deploy`, and writes
//! JSON to a file or stdout. The pure parts (`make_deploy`, `summarize`) take
//! everything as arguments so they can be tested without a terminal.

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};
use std::fs;
use std::io::Write;
use std::path::Path;

use casperlabs_deploy::crypto::KeyPair;
use casperlabs_deploy::deploy::{
    attach_approval, sign_deploy, verify_deploy, CodeDescriptor, ContractHash, Deploy,
    DeployBuilder, DeployHash, RuntimeArgs,
};

use crate::arg_parser::parse_session_args;
use crate::cli::{AttachSignatureArgs, InputArgs, MakeArgs, SignArgs};

// ---------------------------------------------------------------------------
// I/O helpers
// ---------------------------------------------------------------------------

pub fn read_deploy(path: &Path) -> Result<Deploy> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read deploy from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid deploy", path.display()))
}

pub fn write_deploy(deploy: &Deploy, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(deploy).context("failed to serialize deploy")?;
    match output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write deploy to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write deploy to stdout")
        }
    }
}

fn decode_hex(label: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).with_context(|| format!("{label} is not valid hex"))
}

// ---------------------------------------------------------------------------
// make
// ---------------------------------------------------------------------------

/// Builds the session descriptor named by `--session-path`, `--session-hash`
/// or `--session-name`.
fn session_from_args(args: &MakeArgs) -> Result<CodeDescriptor> {
    let typed = parse_session_args(&args.session_args)?;
    let entry_point = args.session_entry_point.clone().unwrap_or_default();

    let session = if let Some(path) = &args.session_path {
        let wasm = fs::read(path)
            .with_context(|| format!("failed to read session Wasm {}", path.display()))?;
        CodeDescriptor::executable(wasm, typed)?
    } else if let Some(hash) = &args.session_hash {
        let hash = ContractHash::from_hex(hash.trim()).context("invalid --session-hash")?;
        CodeDescriptor::stored_by_hash(hash, entry_point, typed)?
    } else if let Some(name) = &args.session_name {
        CodeDescriptor::stored_by_name(name.clone(), entry_point, typed)?
    } else {
        bail!("one of --session-path, --session-hash or --session-name is required");
    };

    let Some(encoded) = &args.session_args_hex else {
        return Ok(session);
    };
    let encoded = decode_hex("--session-args-hex", encoded)?;
    session
        .with_encoded_args(&encoded)
        .context("invalid --session-args-hex")
}

/// Assembles the deploy described by `args`. `now_millis` is used when no
/// `--timestamp` is given.
pub fn make_deploy(args: &MakeArgs, now_millis: u64) -> Result<Deploy> {
    let session = session_from_args(args)?;
    let sender = decode_hex("--sender", &args.sender)?;
    let dependencies = args
        .dependencies
        .iter()
        .map(|d| DeployHash::from_hex(d.trim()).with_context(|| format!("invalid --dependency {d}")))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = DeployBuilder::new(session, sender, args.timestamp.unwrap_or(now_millis))
        .payment_amount(args.payment_amount)
        .gas_price(args.gas_price)
        .dependencies(dependencies);
    if let Some(path) = &args.payment_path {
        let wasm = fs::read(path)
            .with_context(|| format!("failed to read payment Wasm {}", path.display()))?;
        builder = builder.payment_wasm(wasm);
    }

    Ok(builder.build()?)
}

pub fn make(args: MakeArgs) -> Result<()> {
    let now = u64::try_from(Utc::now().timestamp_millis()).context("system clock before 1970")?;
    let deploy = make_deploy(&args, now)?;
    tracing::info!(deploy_hash = %deploy.deploy_hash(), "deploy assembled");
    write_deploy(&deploy, args.output.as_deref())
}

// ---------------------------------------------------------------------------
// sign / attach-signature
// ---------------------------------------------------------------------------

pub fn load_keypair(secret_key_hex: &str, public_key_hex: Option<&str>) -> Result<KeyPair> {
    let secret = decode_hex("secret key", secret_key_hex)?;
    let keypair = match public_key_hex {
        Some(public) => {
            let public = decode_hex("public key", public)?;
            KeyPair::from_keypair_bytes(&public, &secret)?
        }
        None if secret.len() == 64 => KeyPair::from_keypair_bytes(&secret[32..], &secret)?,
        None => KeyPair::from_secret_key_bytes(&secret)?,
    };
    Ok(keypair)
}

pub fn sign(args: SignArgs) -> Result<()> {
    let deploy = read_deploy(&args.input)?;
    let keypair = load_keypair(&args.secret_key, args.public_key.as_deref())?;
    let signed = sign_deploy(deploy, &keypair);
    tracing::info!(
        deploy_hash = %signed.deploy_hash(),
        signer = %keypair.public_key(),
        "deploy signed"
    );
    write_deploy(&signed, args.output.as_deref())
}

pub fn attach_signature(args: AttachSignatureArgs) -> Result<()> {
    let deploy = read_deploy(&args.input)?;
    let signature = decode_hex("--signature", &args.signature)?;
    let public_key = decode_hex("--public-key", &args.public_key)?;
    let signed = attach_approval(deploy, &signature, &public_key)?;
    tracing::info!(deploy_hash = %signed.deploy_hash(), "signature attached");
    write_deploy(&signed, args.output.as_deref())
}

// ---------------------------------------------------------------------------
// verify / inspect
// ---------------------------------------------------------------------------

pub fn verify(args: InputArgs) -> Result<()> {
    let deploy = read_deploy(&args.input)?;
    verify_deploy(&deploy)
        .with_context(|| format!("deploy {} failed verification", deploy.deploy_hash()))?;
    println!("deploy {} is valid", deploy.deploy_hash());
    Ok(())
}

/// Human-readable summary of a deploy.
pub fn summarize(deploy: &Deploy) -> String {
    let header = deploy.header();
    let timestamp = i64::try_from(header.timestamp_millis())
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "out of range".to_string());

    let mut out = String::new();
    out.push_str(&format!("deploy hash : {}\n", deploy.deploy_hash()));
    out.push_str(&format!("body hash   : {}\n", header.body_hash()));
    out.push_str(&format!("sender      : {}\n", hex::encode(header.sender_identity_hash())));
    out.push_str(&format!("timestamp   : {} ({timestamp})\n", header.timestamp_millis()));
    out.push_str(&format!("gas price   : {}\n", header.gas_price()));
    out.push_str(&format!("session     : {}\n", describe_code(deploy.body().session())));
    out.push_str(&format!("payment     : {}\n", describe_code(deploy.body().payment())));
    for dependency in header.dependencies() {
        out.push_str(&format!("depends on  : {dependency}\n"));
    }
    out.push_str(&format!("state       : {}\n", deploy.state()));
    for approval in deploy.approvals() {
        out.push_str(&format!(
            "approval    : {} ({})\n",
            approval.signer_public_key, approval.signature.algorithm
        ));
    }
    out
}

fn describe_code(code: &CodeDescriptor) -> String {
    let args = describe_args(code.args());
    match code {
        CodeDescriptor::Executable { .. } if code.is_standard_payment() => {
            format!("standard payment [{args}]")
        }
        CodeDescriptor::Executable { module_bytes, .. } => {
            format!("wasm ({} bytes) [{args}]", module_bytes.len())
        }
        CodeDescriptor::StoredByHash {
            hash, entry_point, ..
        } => format!("stored {hash} :: {entry_point} [{args}]"),
        CodeDescriptor::StoredByName {
            name, entry_point, ..
        } => format!("stored '{name}' :: {entry_point} [{args}]"),
    }
}

fn describe_args(args: &RuntimeArgs) -> String {
    args.iter()
        .map(|arg| arg.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn inspect(args: InputArgs) -> Result<()> {
    let deploy = read_deploy(&args.input)?;
    print!("{}", summarize(&deploy));
    Ok(())
}
