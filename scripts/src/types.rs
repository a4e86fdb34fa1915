//! Type definitions used throughout the scripts

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    path::PathBuf,
};

use alloy_primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::utils::iso8601_now;

/// A Hardhat-style compilation artifact, from which the contract is deployed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the compiled contract
    pub contract_name: String,
    /// The contract ABI, kept opaque since the scripts never call into it
    #[serde(default)]
    pub abi: serde_json::Value,
    /// The contract creation code
    pub bytecode: Bytes,
    /// The runtime code expected at the deployed address, if compiled
    #[serde(default)]
    pub deployed_bytecode: Option<Bytes>,
    /// Byte ranges of the runtime code holding immutables, keyed by AST node id
    #[serde(default)]
    pub immutable_references: BTreeMap<String, Vec<ImmutableReference>>,
}

/// A byte range of the runtime code filled in with an immutable at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImmutableReference {
    /// Offset of the first byte
    pub start: usize,
    /// Number of bytes
    pub length: usize,
}

impl ContractArtifact {
    /// The expected runtime code, treating an empty `deployedBytecode` as absent
    pub fn expected_runtime_code(&self) -> Option<Bytes> {
        self.deployed_bytecode
            .as_ref()
            .filter(|code| !code.is_empty())
            .cloned()
    }

    /// All immutable ranges of the runtime code
    pub fn immutable_ranges(&self) -> Vec<ImmutableReference> {
        self.immutable_references.values().flatten().copied().collect()
    }
}

/// The outcome of a confirmed deployment transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
    /// The address at which the contract was created
    pub contract_address: Address,
    /// The hash of the deployment transaction
    pub transaction_hash: TxHash,
    /// The block in which the transaction was mined, if known
    pub block_number: Option<u64>,
    /// The gas used by the transaction, if known
    pub gas_used: Option<u64>,
}

/// The record emitted at the end of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    /// The name of the target network
    pub network: String,
    /// The numeric chain identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// The deployed contract's address
    pub contract_address: Address,
    /// The account that signed the deployment transaction
    pub deployer_address: Address,
    /// The hash of the deployment transaction
    pub transaction_hash: TxHash,
    /// The block in which the deployment was mined, `null` if unknown
    pub block_number: Option<u64>,
    /// The gas used by the deployment, stringified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<String>,
    /// ISO-8601 wall-clock time at which the record was created
    pub timestamp: String,
    /// Whether post-deploy verification succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl DeploymentInfo {
    /// Assemble the record for a confirmed deployment, stamped with the current time
    pub fn new(
        network: &str,
        chain_id: Option<u64>,
        deployer_address: Address,
        receipt: &DeploymentReceipt,
        verified: Option<bool>,
    ) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            contract_address: receipt.contract_address,
            deployer_address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used.map(|gas| gas.to_string()),
            timestamp: iso8601_now(),
            verified,
        }
    }
}

/// Options specific to the testnet deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestnetOptions {
    /// The minimum deployer balance, in wei
    pub min_balance: U256,
    /// The directory in which `deployment-<network>.json` is written
    pub out_dir: PathBuf,
}

/// The deployment flows supported by the scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployVariant {
    /// Deploy, check for code at the address and report
    Basic,
    /// Enforce a minimum balance, deploy, verify and persist the record
    Testnet(TestnetOptions),
}

impl Display for DeployVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployVariant::Basic => write!(f, "basic"),
            DeployVariant::Testnet(_) => write!(f, "testnet"),
        }
    }
}

/// Everything a deployment run needs besides its collaborators
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// The name of the target network
    pub network: String,
    /// The chain ID the node is expected to report, if pinned
    pub expected_chain_id: Option<u64>,
    /// The artifact of the contract to deploy
    pub artifact: ContractArtifact,
    /// Which deployment flow to run
    pub variant: DeployVariant,
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, bytes};
    use serde_json::Value;

    use super::{ContractArtifact, DeploymentInfo, DeploymentReceipt, ImmutableReference};

    fn dummy_receipt(block_number: Option<u64>, gas_used: Option<u64>) -> DeploymentReceipt {
        DeploymentReceipt {
            contract_address: address!("abc0000000000000000000000000000000000123"),
            transaction_hash: b256!(
                "dead00000000000000000000000000000000000000000000000000000000beef"
            ),
            block_number,
            gas_used,
        }
    }

    #[test]
    fn test_info_uses_camel_case_keys() {
        let receipt = dummy_receipt(Some(42), Some(1_500_000));
        let info = DeploymentInfo::new(
            "sepolia",
            Some(11155111),
            address!("1000000000000000000000000000000000000001"),
            &receipt,
            Some(true),
        );

        let json: Value = serde_json::to_value(&info).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "network",
            "chainId",
            "contractAddress",
            "deployerAddress",
            "transactionHash",
            "blockNumber",
            "gasUsed",
            "timestamp",
            "verified",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["gasUsed"], Value::String("1500000".to_string()));
        assert_eq!(obj["blockNumber"], Value::from(42));
    }

    #[test]
    fn test_info_omits_absent_optionals() {
        let receipt = dummy_receipt(None, None);
        let info = DeploymentInfo::new(
            "localhost",
            None,
            address!("1000000000000000000000000000000000000001"),
            &receipt,
            None,
        );

        let json: Value = serde_json::to_value(&info).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("chainId"));
        assert!(!obj.contains_key("gasUsed"));
        assert!(!obj.contains_key("verified"));
        // An unknown block is still reported, as `null`
        assert_eq!(obj["blockNumber"], Value::Null);
    }

    #[test]
    fn test_artifact_empty_runtime_code_is_absent() {
        let artifact: ContractArtifact = serde_json::from_str(
            r#"{"contractName":"VEGABioPoS","abi":[],"bytecode":"0x6080","deployedBytecode":"0x"}"#,
        )
        .unwrap();

        assert_eq!(artifact.bytecode, bytes!("6080"));
        assert_eq!(artifact.expected_runtime_code(), None);
        assert!(artifact.immutable_ranges().is_empty());
    }

    #[test]
    fn test_artifact_immutable_ranges() {
        let artifact: ContractArtifact = serde_json::from_str(
            r#"{
                "contractName": "VEGABioPoS",
                "bytecode": "0x6080",
                "deployedBytecode": "0x6080",
                "immutableReferences": {
                    "7": [{"start": 2, "length": 32}],
                    "9": [{"start": 40, "length": 32}, {"start": 90, "length": 20}]
                }
            }"#,
        )
        .unwrap();

        let ranges = artifact.immutable_ranges();
        assert_eq!(ranges.len(), 3);
        assert!(ranges.contains(&ImmutableReference {
            start: 90,
            length: 20
        }));
    }
}
