//! Implementations of the deploy flows

use alloy_primitives::{utils::format_ether, Address, U256};

use crate::{
    client::DeployClient,
    errors::ScriptError,
    reporter::{DeployEvent, Reporter},
    types::{DeployConfig, DeployVariant, DeploymentInfo, TestnetOptions},
    utils::write_deployment_info,
    verify::DeploymentVerifier,
};

/// Runs the deployment flow selected by the config, returning the deployment record
pub async fn deploy(
    config: &DeployConfig,
    client: &impl DeployClient,
    verifier: &impl DeploymentVerifier,
    reporter: &impl Reporter,
) -> Result<DeploymentInfo, ScriptError> {
    match &config.variant {
        DeployVariant::Basic => deploy_basic(config, client, reporter).await,
        DeployVariant::Testnet(opts) => {
            deploy_testnet(config, opts, client, verifier, reporter).await
        }
    }
}

/// Deploys the contract and aborts unless code is found at the new address.
///
/// The balance is read and reported but no minimum is enforced.
pub async fn deploy_basic(
    config: &DeployConfig,
    client: &impl DeployClient,
    reporter: &impl Reporter,
) -> Result<DeploymentInfo, ScriptError> {
    report_start(config, reporter);
    let chain_id = check_chain_id(config, client).await?;
    let (deployer, _) = read_deployer(client, reporter).await?;

    reporter.report(DeployEvent::Deploying);
    let receipt = client.deploy(&config.artifact).await?;
    reporter.report(DeployEvent::Confirmed(receipt.clone()));

    let address = receipt.contract_address;
    let code = client.get_code(address).await?;
    if code.is_empty() {
        reporter.report(DeployEvent::VerificationFailed {
            address,
            reason: "no code at address".to_string(),
        });
        return Err(ScriptError::EmptyBytecode(format!("{address:#x}")));
    }
    reporter.report(DeployEvent::CodeVerified(address));

    let info = DeploymentInfo::new(&config.network, Some(chain_id), deployer, &receipt, None);
    reporter.report(DeployEvent::Summary(info.clone()));
    reporter.report(DeployEvent::Completed);

    Ok(info)
}

/// Deploys the contract after checking the deployer can afford it, verifies the
/// deployment and writes the record to `deployment-<network>.json`.
///
/// Verification failures are recorded in the record rather than aborting.
pub async fn deploy_testnet(
    config: &DeployConfig,
    opts: &TestnetOptions,
    client: &impl DeployClient,
    verifier: &impl DeploymentVerifier,
    reporter: &impl Reporter,
) -> Result<DeploymentInfo, ScriptError> {
    report_start(config, reporter);
    let chain_id = check_chain_id(config, client).await?;
    let (deployer, balance) = read_deployer(client, reporter).await?;
    check_min_balance(balance, opts.min_balance)?;

    reporter.report(DeployEvent::Deploying);
    let receipt = client.deploy(&config.artifact).await?;
    reporter.report(DeployEvent::Confirmed(receipt.clone()));

    let verified = verify(receipt.contract_address, client, verifier, reporter).await;

    let info = DeploymentInfo::new(
        &config.network,
        Some(chain_id),
        deployer,
        &receipt,
        Some(verified),
    );
    reporter.report(DeployEvent::Summary(info.clone()));

    let path = write_deployment_info(&opts.out_dir, &info)?;
    reporter.report(DeployEvent::Saved(path));
    reporter.report(DeployEvent::Completed);

    Ok(info)
}

/// Fails with [`ScriptError::InsufficientFunds`] if `balance` is below `min_balance`
pub fn check_min_balance(balance: U256, min_balance: U256) -> Result<(), ScriptError> {
    if balance < min_balance {
        return Err(ScriptError::InsufficientFunds(format!(
            "balance of {} ETH is below the required {} ETH",
            format_ether(balance),
            format_ether(min_balance)
        )));
    }

    Ok(())
}

/// Reports the start of a run
fn report_start(config: &DeployConfig, reporter: &impl Reporter) {
    reporter.report(DeployEvent::Started {
        contract: config.artifact.contract_name.clone(),
        network: config.network.clone(),
    });
}

/// Fetches the node's chain ID, checking it against the expected one if pinned
async fn check_chain_id(
    config: &DeployConfig,
    client: &impl DeployClient,
) -> Result<u64, ScriptError> {
    let chain_id = client.chain_id().await?;
    match config.expected_chain_id {
        Some(expected) if expected != chain_id => Err(ScriptError::ChainIdMismatch(format!(
            "network {} expects chain {}, node reports {}",
            config.network, expected, chain_id
        ))),
        _ => Ok(chain_id),
    }
}

/// Reads and reports the deployer's address and balance
async fn read_deployer(
    client: &impl DeployClient,
    reporter: &impl Reporter,
) -> Result<(Address, U256), ScriptError> {
    let address = client.deployer_address();
    let balance = client.get_balance(address).await?;
    reporter.report(DeployEvent::Deployer { address, balance });

    Ok((address, balance))
}

/// Reads the code at the address once and, if present, hands it to the verifier,
/// folding every failure into `false`
async fn verify(
    address: Address,
    client: &impl DeployClient,
    verifier: &impl DeploymentVerifier,
    reporter: &impl Reporter,
) -> bool {
    let reason = match client.get_code(address).await {
        Ok(code) if code.is_empty() => "no code at address".to_string(),
        Err(e) => e.to_string(),
        Ok(code) => {
            reporter.report(DeployEvent::CodeVerified(address));
            match verifier.verify_deployment(address, &code).await {
                Ok(true) => return true,
                Ok(false) => "verifier rejected the deployment".to_string(),
                Err(e) => e.to_string(),
            }
        }
    };

    reporter.report(DeployEvent::VerificationFailed { address, reason });
    false
}
