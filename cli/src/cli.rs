//! # CLI Interface
//!
//! Argument structure for `casperlabs-deploy-cli`, via `clap` derive. Every
//! subcommand reads or writes a deploy as JSON.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Make, sign and check CasperLabs deploys offline.
///
/// Nothing here talks to a node. The output of `make` and `sign` is the JSON
/// an RPC client submits unchanged.
#[derive(Parser, Debug)]
#[command(
    name = "casperlabs-deploy-cli",
    about = "Make, sign and check CasperLabs deploys",
    version,
    propagate_version = true
)]
pub struct DeployCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "CASPERLABS_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble an unsigned deploy.
    Make(MakeArgs),
    /// Sign a deploy with a local secret key, replacing existing approvals.
    Sign(SignArgs),
    /// Attach a signature produced elsewhere, replacing existing approvals.
    AttachSignature(AttachSignatureArgs),
    /// Check hashes and approvals of a deploy.
    Verify(InputArgs),
    /// Print a summary of a deploy.
    Inspect(InputArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `make` subcommand.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("session")
        .required(true)
        .args(["session_path", "session_hash", "session_name"])
))]
pub struct MakeArgs {
    /// Session Wasm file.
    #[arg(long)]
    pub session_path: Option<PathBuf>,

    /// Hex hash of a stored session contract.
    #[arg(long)]
    pub session_hash: Option<String>,

    /// Named key of a stored session contract.
    #[arg(long)]
    pub session_name: Option<String>,

    /// Entry point of the stored session contract. Not allowed with
    /// `--session-path`.
    #[arg(
        long,
        required_unless_present = "session_path",
        conflicts_with = "session_path"
    )]
    pub session_entry_point: Option<String>,

    /// Session argument as `name:type='value'`. Repeatable, order is kept.
    #[arg(long = "session-arg", conflicts_with = "session_args_hex")]
    pub session_args: Vec<String>,

    /// Already-encoded session arguments, hex.
    #[arg(long)]
    pub session_args_hex: Option<String>,

    /// Custom payment Wasm file. Standard payment is used when omitted.
    #[arg(long)]
    pub payment_path: Option<PathBuf>,

    /// Motes passed to payment code as `amount`.
    #[arg(long)]
    pub payment_amount: u128,

    /// Hex account hash of the sender.
    #[arg(long, env = "CASPERLABS_SENDER")]
    pub sender: String,

    #[arg(long, default_value_t = casperlabs_deploy::config::DEFAULT_GAS_PRICE)]
    pub gas_price: u64,

    /// Hex hash of a deploy that must execute first. Repeatable.
    #[arg(long = "dependency")]
    pub dependencies: Vec<String>,

    /// Milliseconds since the Unix epoch. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// Output file. Stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Deploy JSON to sign.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Hex Ed25519 secret key, 32-byte seed or 64-byte `seed || public`.
    #[arg(long, env = "CASPERLABS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Hex public key. When given, it must match the secret key.
    #[arg(long)]
    pub public_key: Option<String>,

    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `attach-signature` subcommand.
#[derive(Args, Debug)]
pub struct AttachSignatureArgs {
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Hex 64-byte Ed25519 signature over the deploy hash.
    #[arg(long)]
    pub signature: String,

    /// Hex 32-byte public key of the signer.
    #[arg(long)]
    pub public_key: String,

    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// A single deploy JSON input.
#[derive(Args, Debug)]
pub struct InputArgs {
    #[arg(long, short = 'i')]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        DeployCli::command().debug_assert();
    }

    #[test]
    fn make_requires_a_session_source() {
        let result = DeployCli::try_parse_from([
            "casperlabs-deploy-cli",
            "make",
            "--payment-amount",
            "10",
            "--sender",
            "00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn make_collects_repeated_args_in_order() {
        let cli = DeployCli::try_parse_from([
            "casperlabs-deploy-cli",
            "make",
            "--session-name",
            "purse_holder",
            "--session-entry-point",
            "add_named_purse",
            "--session-arg",
            "purse_name:string='a'",
            "--session-arg",
            "count:u32='2'",
            "--payment-amount",
            "10000",
            "--sender",
            "00",
        ])
        .unwrap();
        match cli.command {
            Commands::Make(args) => {
                assert_eq!(args.session_args, vec!["purse_name:string='a'", "count:u32='2'"]);
                assert_eq!(args.payment_amount, 10_000);
                assert_eq!(args.gas_price, 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn wasm_session_rejects_entry_point() {
        let result = DeployCli::try_parse_from([
            "casperlabs-deploy-cli",
            "make",
            "--session-path",
            "session.wasm",
            "--session-entry-point",
            "call",
            "--payment-amount",
            "1",
            "--sender",
            "00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn stored_session_needs_entry_point() {
        let result = DeployCli::try_parse_from([
            "casperlabs-deploy-cli",
            "make",
            "--session-name",
            "purse_holder",
            "--payment-amount",
            "1",
            "--sender",
            "00",
        ]);
        assert!(result.is_err());
    }
}
