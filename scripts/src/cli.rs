//! Definitions of CLI arguments and commands for deploy scripts

use std::{path::PathBuf, process::ExitCode};

use alloy_primitives::utils::parse_ether;
use clap::{Args, Parser, Subcommand};

use crate::{
    constants::{
        DEFAULT_ARTIFACT_PATH, DEFAULT_MIN_BALANCE_ETHER, DEFAULT_NETWORK, DEFAULT_OUT_DIR,
        DEFAULT_RPC_URL,
    },
    errors::ScriptError,
    types::{DeployVariant, TestnetOptions},
};

/// Deploys the VEGA Bio-PoS contract
#[derive(Parser)]
#[command(name = "vega-deploy")]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Name of the target network, recorded in the deployment info
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Chain ID the node is expected to report
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Path to the contract's compilation artifact
    #[arg(short, long, env = "VEGA_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    /// The deployment flow to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deployment flows
#[derive(Subcommand)]
pub enum Command {
    /// Deploy and check that code exists at the contract address
    Basic,
    /// Check the deployer balance, deploy, verify and save the deployment info
    Testnet(TestnetArgs),
}

impl Command {
    /// Resolves the command into the deployment flow it selects
    pub fn into_variant(self) -> Result<DeployVariant, ScriptError> {
        match self {
            Command::Basic => Ok(DeployVariant::Basic),
            Command::Testnet(args) => {
                let min_balance = parse_ether(&args.min_balance).map_err(|e| {
                    ScriptError::InvalidConfig(format!("min balance {}: {}", args.min_balance, e))
                })?;

                Ok(DeployVariant::Testnet(TestnetOptions {
                    min_balance,
                    out_dir: args.out_dir,
                }))
            }
        }
    }
}

/// The exit code for a failed argument parse.
///
/// `--help` and `--version` surface as errors but are not failures; everything
/// else (missing key, bad value, unknown flag) exits with 1 like any other
/// failed run.
pub fn exit_code_for(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Arguments of the testnet deployment
#[derive(Args)]
pub struct TestnetArgs {
    /// Minimum deployer balance, in ether
    #[arg(long, default_value = DEFAULT_MIN_BALANCE_ETHER)]
    pub min_balance: String,

    /// Directory in which `deployment-<network>.json` is written
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}
