use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vega_scripts::{
    cli::{exit_code_for, Cli},
    client::AlloyClient,
    commands::deploy,
    constants::DEFAULT_LOG_FILTER,
    errors::ScriptError,
    reporter::TracingReporter,
    types::DeployConfig,
    utils::load_artifact,
    verify::CodeVerifier,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return exit_code_for(&e);
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().pretty().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Deployment failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the deployment config and collaborators from the CLI and runs the
/// selected flow
async fn run(cli: Cli) -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        chain_id,
        artifact,
        command,
    } = cli;

    let config = DeployConfig {
        network,
        expected_chain_id: chain_id,
        artifact: load_artifact(&artifact)?,
        variant: command.into_variant()?,
    };

    info!("Running the {} deployment", config.variant);

    let client = AlloyClient::new(&priv_key, &rpc_url)?;
    let verifier = CodeVerifier::from_artifact(&config.artifact);

    deploy(&config, &client, &verifier, &TracingReporter).await?;

    Ok(())
}
