//! Utilities for the deploy scripts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};

use crate::{
    constants::{DEPLOYMENT_FILE_EXTENSION, DEPLOYMENT_FILE_PREFIX},
    errors::ScriptError,
    types::{ContractArtifact, DeploymentInfo},
};

/// Reads and parses the compilation artifact at the given path.
///
/// The artifact must carry non-empty creation code.
pub fn load_artifact(file_path: &Path) -> Result<ContractArtifact, ScriptError> {
    let file_contents = fs::read_to_string(file_path).map_err(|e| {
        ScriptError::ArtifactParsing(format!("{}: {}", file_path.display(), e))
    })?;

    let artifact: ContractArtifact = serde_json::from_str(&file_contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", file_path.display(), e)))?;

    if artifact.bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "artifact for {} has no creation bytecode",
            artifact.contract_name
        )));
    }

    Ok(artifact)
}

/// The path of the deployment record for the given network
pub fn deployment_file_path(out_dir: &Path, network: &str) -> PathBuf {
    out_dir.join(format!(
        "{DEPLOYMENT_FILE_PREFIX}{network}.{DEPLOYMENT_FILE_EXTENSION}"
    ))
}

/// Writes the deployment record as pretty-printed JSON, replacing any previous
/// record for the same network. Returns the path written to.
pub fn write_deployment_info(
    out_dir: &Path,
    info: &DeploymentInfo,
) -> Result<PathBuf, ScriptError> {
    let file_path = deployment_file_path(out_dir, &info.network);
    let contents =
        serde_json::to_string_pretty(info).map_err(|e| ScriptError::Serde(e.to_string()))?;

    fs::write(&file_path, contents).map_err(|e| {
        ScriptError::WriteDeployment(format!("{}: {}", file_path.display(), e))
    })?;

    Ok(file_path)
}

/// The current UTC time in ISO-8601 form with millisecond precision,
/// e.g. `2024-05-01T12:00:00.000Z`
pub fn iso8601_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
