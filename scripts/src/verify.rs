//! Post-deploy verification of the contract code

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::{
    errors::ScriptError,
    types::{ContractArtifact, ImmutableReference},
};

/// Verifies a deployed contract, e.g. against a block explorer
#[async_trait]
pub trait DeploymentVerifier: Send + Sync {
    /// Whether the contract at `address`, whose non-empty runtime code has already
    /// been read as `code`, is the one that was meant to be deployed
    async fn verify_deployment(&self, address: Address, code: &Bytes)
        -> Result<bool, ScriptError>;
}

/// Verifies a deployment by comparing the code stored at the address with the
/// artifact's runtime code.
///
/// Immutable slots are zero-filled in compiled runtime code, so the ranges given
/// by the artifact's `immutableReferences` are masked before comparing. Artifacts
/// without that field (e.g. plain Hardhat artifacts) cannot describe the slots,
/// and a contract with immutables will then fail to match. When no runtime code
/// is known any non-empty code passes.
#[derive(Debug, Clone, Default)]
pub struct CodeVerifier {
    /// The runtime code the deployment should have left behind
    expected_code: Option<Bytes>,
    /// Byte ranges of the runtime code holding immutable values
    immutable_ranges: Vec<ImmutableReference>,
}

impl CodeVerifier {
    /// Constructor
    pub fn new(expected_code: Option<Bytes>) -> Self {
        Self {
            expected_code,
            immutable_ranges: Vec::new(),
        }
    }

    /// A verifier expecting the runtime code of the given artifact
    pub fn from_artifact(artifact: &ContractArtifact) -> Self {
        Self::new(artifact.expected_runtime_code())
            .with_immutable_references(artifact.immutable_ranges())
    }

    /// Sets the byte ranges masked out before comparing code
    pub fn with_immutable_references(mut self, ranges: Vec<ImmutableReference>) -> Self {
        self.immutable_ranges = ranges;
        self
    }

    /// Zeroes the immutable slots of the given code
    fn mask_immutables(&self, code: &Bytes) -> Vec<u8> {
        let mut masked = code.to_vec();
        for ImmutableReference { start, length } in &self.immutable_ranges {
            let end = start.saturating_add(*length).min(masked.len());
            if *start < end {
                masked[*start..end].fill(0);
            }
        }

        masked
    }
}

#[async_trait]
impl DeploymentVerifier for CodeVerifier {
    async fn verify_deployment(
        &self,
        _address: Address,
        code: &Bytes,
    ) -> Result<bool, ScriptError> {
        if code.is_empty() {
            return Ok(false);
        }

        Ok(match &self.expected_code {
            Some(expected) => self.mask_immutables(code) == self.mask_immutables(expected),
            None => true,
        })
    }
}
