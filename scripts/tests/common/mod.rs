//! Mock collaborators for the deployment flow tests

#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy_primitives::{address, b256, bytes, utils::parse_ether, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use vega_scripts::{
    client::DeployClient,
    errors::ScriptError,
    reporter::{DeployEvent, Reporter},
    types::{ContractArtifact, DeployConfig, DeployVariant, DeploymentReceipt, TestnetOptions},
    verify::DeploymentVerifier,
};

/// The address the mocked factory deploys to
pub const CONTRACT_ADDRESS: Address = address!("abc0000000000000000000000000000000000123");
/// The hash of the mocked deployment transaction
pub const TX_HASH: TxHash =
    b256!("dead00000000000000000000000000000000000000000000000000000000beef");
/// The mocked deployer
pub const DEPLOYER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// The block the mocked deployment lands in
pub const BLOCK_NUMBER: u64 = 42;
/// The mocked chain ID
pub const CHAIN_ID: u64 = 11155111;
/// The mocked network name
pub const NETWORK: &str = "sepolia";

/// A chain client returning canned responses
pub struct MockClient {
    pub balance: U256,
    pub receipt: DeploymentReceipt,
    pub code: Bytes,
    pub fail_deploy: bool,
    pub deploy_calls: AtomicUsize,
    pub get_code_calls: AtomicUsize,
}

impl MockClient {
    /// A client with 1 ether whose deployment succeeds and leaves code behind
    pub fn new() -> Self {
        Self {
            balance: parse_ether("1.0").unwrap(),
            receipt: DeploymentReceipt {
                contract_address: CONTRACT_ADDRESS,
                transaction_hash: TX_HASH,
                block_number: Some(BLOCK_NUMBER),
                gas_used: Some(1_234_567),
            },
            code: runtime_code(),
            fail_deploy: false,
            deploy_calls: AtomicUsize::new(0),
            get_code_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_balance(mut self, ether: &str) -> Self {
        self.balance = parse_ether(ether).unwrap();
        self
    }

    pub fn with_code(mut self, code: Bytes) -> Self {
        self.code = code;
        self
    }

    pub fn with_block_number(mut self, block_number: Option<u64>) -> Self {
        self.receipt.block_number = block_number;
        self
    }

    pub fn failing_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    pub fn deploy_calls(&self) -> usize {
        self.deploy_calls.load(Ordering::SeqCst)
    }

    pub fn get_code_calls(&self) -> usize {
        self.get_code_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeployClient for MockClient {
    fn deployer_address(&self) -> Address {
        DEPLOYER
    }

    async fn chain_id(&self) -> Result<u64, ScriptError> {
        Ok(CHAIN_ID)
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, ScriptError> {
        Ok(self.balance)
    }

    async fn deploy(&self, _artifact: &ContractArtifact) -> Result<DeploymentReceipt, ScriptError> {
        self.deploy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deploy {
            return Err(ScriptError::ContractDeployment("transaction reverted".to_string()));
        }

        Ok(self.receipt.clone())
    }

    async fn get_code(&self, _address: Address) -> Result<Bytes, ScriptError> {
        self.get_code_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.clone())
    }
}

/// A verifier returning a canned result
pub struct MockVerifier {
    pub result: Result<bool, ScriptError>,
    pub calls: AtomicUsize,
}

impl MockVerifier {
    pub fn returning(result: Result<bool, ScriptError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeploymentVerifier for MockVerifier {
    async fn verify_deployment(
        &self,
        _address: Address,
        _code: &Bytes,
    ) -> Result<bool, ScriptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// A reporter that records every event
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<DeployEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Whether any recorded event satisfies the predicate
    pub fn saw(&self, pred: impl Fn(&DeployEvent) -> bool) -> bool {
        self.events().iter().any(pred)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// The runtime code the mocked deployment leaves behind
pub fn runtime_code() -> Bytes {
    bytes!("6080604052348015600f57600080fd5b50")
}

pub fn artifact() -> ContractArtifact {
    ContractArtifact {
        contract_name: "VEGABioPoS".to_string(),
        abi: serde_json::Value::Array(vec![]),
        bytecode: bytes!("6080604052348015600f57600080fd5b5060"),
        deployed_bytecode: Some(runtime_code()),
        immutable_references: Default::default(),
    }
}

pub fn basic_config() -> DeployConfig {
    DeployConfig {
        network: NETWORK.to_string(),
        expected_chain_id: None,
        artifact: artifact(),
        variant: DeployVariant::Basic,
    }
}

pub fn testnet_config(out_dir: &Path) -> DeployConfig {
    DeployConfig {
        network: NETWORK.to_string(),
        expected_chain_id: Some(CHAIN_ID),
        artifact: artifact(),
        variant: DeployVariant::Testnet(TestnetOptions {
            min_balance: parse_ether("0.01").unwrap(),
            out_dir: out_dir.to_path_buf(),
        }),
    }
}
