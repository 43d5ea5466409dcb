// Copyright (c) 2026 CasperLabs. Apache-2.0 License.
// See LICENSE for details.

//! # casperlabs-deploy-cli
//!
//! Entry point for the `casperlabs-deploy-cli` binary. Parses arguments,
//! initializes logging and runs one subcommand:
//!
//! - `make`             — assemble an unsigned deploy
//! - `sign`             — approve with a local secret key
//! - `attach-signature` — approve with a signature made elsewhere
//! - `verify`           — check hashes and approvals
//! - `inspect`          — print a summary
//! - `version`          — print build version information

mod arg_parser;
mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, DeployCli};

fn main() -> Result<()> {
    let cli = DeployCli::parse();
    logging::init_logging("casperlabs_deploy=info,casperlabs_deploy_cli=info", cli.log_format);

    match cli.command {
        Commands::Make(args) => commands::make(args),
        Commands::Sign(args) => commands::sign(args),
        Commands::AttachSignature(args) => commands::attach_signature(args),
        Commands::Verify(args) => commands::verify(args),
        Commands::Inspect(args) => commands::inspect(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_version() {
    println!("casperlabs-deploy-cli {}", env!("CARGO_PKG_VERSION"));
    println!(
        "hash      {}",
        casperlabs_deploy::config::HASH_FUNCTION
    );
    println!(
        "signature {}",
        casperlabs_deploy::config::SIGNATURE_ALGORITHM
    );
}
