//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The deployer's balance is below the required minimum
    InsufficientFunds(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error fetching the chain ID from the node
    ChainIdFetching(String),
    /// The node reports a different chain than the one expected
    ChainIdMismatch(String),
    /// Error fetching the balance of the deployer
    BalanceFetching(String),
    /// Error reading or parsing a compilation artifact
    ArtifactParsing(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error fetching the code at an address
    CodeFetching(String),
    /// No code is present at the deployed address
    EmptyBytecode(String),
    /// Error writing the deployment record
    WriteDeployment(String),
    /// Error de/serializing the deployment record
    Serde(String),
    /// Invalid configuration value
    InvalidConfig(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::InsufficientFunds(s) => {
                write!(f, "insufficient balance for deployment: {}", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ChainIdFetching(s) => write!(f, "error fetching chain id: {}", s),
            ScriptError::ChainIdMismatch(s) => write!(f, "chain id mismatch: {}", s),
            ScriptError::BalanceFetching(s) => write!(f, "error fetching balance: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::CodeFetching(s) => write!(f, "error fetching contract code: {}", s),
            ScriptError::EmptyBytecode(s) => write!(f, "no contract code at {}", s),
            ScriptError::WriteDeployment(s) => write!(f, "error writing deployment info: {}", s),
            ScriptError::Serde(s) => write!(f, "error de/serializing deployment info: {}", s),
            ScriptError::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
        }
    }
}

impl Error for ScriptError {}
