//! Constants used in the deploy scripts

/// The name of the contract deployed by the scripts
pub const CONTRACT_NAME: &str = "VEGABioPoS";

/// The default path of the Hardhat compilation artifact for the contract
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/VEGABioPoS.sol/VEGABioPoS.json";

/// The default network name, matching Hardhat's local node
pub const DEFAULT_NETWORK: &str = "localhost";

/// The default RPC URL, matching Hardhat's local node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The minimum deployer balance, in ether, required by the testnet deployment
pub const DEFAULT_MIN_BALANCE_ETHER: &str = "0.01";

/// The default directory in which the testnet deployment record is written
pub const DEFAULT_OUT_DIR: &str = ".";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The prefix of the deployment record file name, followed by the network name
pub const DEPLOYMENT_FILE_PREFIX: &str = "deployment-";

/// The extension of the deployment record file
pub const DEPLOYMENT_FILE_EXTENSION: &str = "json";

/// The log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
