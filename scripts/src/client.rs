//! The chain client used by the deploy scripts.
//!
//! [`DeployClient`] is the seam between the deployment flows and the network;
//! [`AlloyClient`] implements it over an alloy provider with a local signer.

use std::str::FromStr;

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    constants::NUM_DEPLOY_CONFIRMATIONS,
    errors::ScriptError,
    types::{ContractArtifact, DeploymentReceipt},
};

/// The chain operations a deployment needs
#[async_trait]
pub trait DeployClient: Send + Sync {
    /// The address of the account signing transactions
    fn deployer_address(&self) -> Address;

    /// The chain ID reported by the node
    async fn chain_id(&self) -> Result<u64, ScriptError>;

    /// The balance of the given account, in wei
    async fn get_balance(&self, address: Address) -> Result<U256, ScriptError>;

    /// Submits the creation transaction for the artifact and waits for it to be
    /// confirmed
    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentReceipt, ScriptError>;

    /// The code stored at the given address
    async fn get_code(&self, address: Address) -> Result<Bytes, ScriptError>;
}

/// A [`DeployClient`] backed by an alloy HTTP provider
pub struct AlloyClient {
    /// The type-erased provider, with the deployer's wallet attached
    provider: DynProvider,
    /// The address of the deployer's wallet
    deployer: Address,
}

impl AlloyClient {
    /// Sets up a client signing with the given private key against the given RPC url
    pub fn new(priv_key: &str, rpc_url: &str) -> Result<Self, ScriptError> {
        let url =
            Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let signer = PrivateKeySigner::from_str(priv_key)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let deployer = signer.address();

        let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

        Ok(Self {
            provider: DynProvider::new(provider),
            deployer,
        })
    }
}

#[async_trait]
impl DeployClient for AlloyClient {
    fn deployer_address(&self) -> Address {
        self.deployer
    }

    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ChainIdFetching(e.to_string()))
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ScriptError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ScriptError::BalanceFetching(e.to_string()))
    }

    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentReceipt, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(artifact.bytecode.clone());

        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        debug!(
            "Deployment transaction {:#x} sent, waiting for confirmation",
            pending_tx.tx_hash()
        );

        let receipt = pending_tx
            .with_required_confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "transaction {:#x} reverted",
                receipt.transaction_hash
            )));
        }

        let contract_address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt for {:#x} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeploymentReceipt {
            contract_address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used),
        })
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::CodeFetching(e.to_string()))
    }
}
