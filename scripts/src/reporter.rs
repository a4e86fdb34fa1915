//! Reporting of deployment progress

use std::path::PathBuf;

use alloy_primitives::{utils::format_ether, Address, U256};
use tracing::{error, info, warn};

use crate::types::{DeploymentInfo, DeploymentReceipt};

/// The status events emitted over the course of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// A deployment run has begun
    Started {
        /// The name of the contract being deployed
        contract: String,
        /// The target network
        network: String,
    },
    /// The deployer account and its balance were read
    Deployer {
        /// The deployer's address
        address: Address,
        /// The deployer's balance, in wei
        balance: U256,
    },
    /// The creation transaction is about to be submitted
    Deploying,
    /// The creation transaction was confirmed
    Confirmed(DeploymentReceipt),
    /// Code was found at the deployed address
    CodeVerified(Address),
    /// The deployed contract could not be verified
    VerificationFailed {
        /// The deployed address
        address: Address,
        /// Why verification failed
        reason: String,
    },
    /// The final deployment record
    Summary(DeploymentInfo),
    /// The deployment record was written to disk
    Saved(PathBuf),
    /// The run finished successfully
    Completed,
}

/// A sink for deployment events
pub trait Reporter: Send + Sync {
    /// Report a single event
    fn report(&self, event: DeployEvent);
}

/// A [`Reporter`] that emits each event as a `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started { contract, network } => {
                info!("Deploying {contract} to {network}")
            }
            DeployEvent::Deployer { address, balance } => {
                info!("Deployer: {address:#x}");
                info!("Balance: {} ETH", format_ether(balance));
            }
            DeployEvent::Deploying => info!("Deploying contract..."),
            DeployEvent::Confirmed(receipt) => {
                info!("Contract deployed to: {:#x}", receipt.contract_address);
                info!("Transaction hash: {:#x}", receipt.transaction_hash);
                match receipt.block_number {
                    Some(block) => info!("Block number: {block}"),
                    None => info!("Block number: unknown"),
                }
            }
            DeployEvent::CodeVerified(address) => {
                info!("Contract code present at {address:#x}, deployed successfully")
            }
            DeployEvent::VerificationFailed { address, reason } => {
                warn!("Verification of {address:#x} failed: {reason}")
            }
            DeployEvent::Summary(info) => match serde_json::to_string_pretty(&info) {
                Ok(json) => info!("Deployment info:\n{json}"),
                Err(e) => error!("Could not serialize deployment info: {e}"),
            },
            DeployEvent::Saved(path) => info!("Deployment info saved to {}", path.display()),
            DeployEvent::Completed => info!("Deployment completed successfully"),
        }
    }
}
