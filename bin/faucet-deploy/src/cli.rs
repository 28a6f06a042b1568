use clap::Parser;
use faucet_deploy::{
    DEFAULT_CONSTANTS_PATH, DEFAULT_CONTRACT_NAME, DEFAULT_CONTRACT_PATH, DEFAULT_ENDPOINT,
    DEFAULT_PURSE_PETNAME,
};
use tracing::level_filters::LevelFilter;

/// Where the home objects are served.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum HomeEndpoint {
    /// The local client started by the dapp tooling.
    Local,
    #[strum(default)]
    Custom(String),
}

impl HomeEndpoint {
    pub fn to_url(&self) -> String {
        match self {
            HomeEndpoint::Local => DEFAULT_ENDPOINT.to_string(),
            HomeEndpoint::Custom(url) => url.clone(),
        }
    }
}

#[derive(Parser)]
#[command(name = "deploy-faucet")]
#[command(
    author,
    version,
    about = "Install the fungible faucet contract and generate its UI constants"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "FAUCET_DEPLOY_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// The home JSON-RPC endpoint.
    ///
    /// `local` points at the client started by the dapp tooling on this machine.
    #[arg(long, alias = "rpc", env = "FAUCET_DEPLOY_ENDPOINT", default_value_t = HomeEndpoint::Local)]
    pub endpoint: HomeEndpoint,

    /// The dapp project directory. Relative paths are resolved against it.
    #[arg(long, alias = "dir", env = "FAUCET_DEPLOY_PROJECT_DIR", default_value = ".")]
    pub project_dir: String,

    /// The contract entry module.
    #[arg(long, env = "FAUCET_DEPLOY_CONTRACT", default_value = DEFAULT_CONTRACT_PATH)]
    pub contract: String,

    /// The contract name published in the generated constants.
    #[arg(long, alias = "name", env = "FAUCET_DEPLOY_CONTRACT_NAME", default_value = DEFAULT_CONTRACT_NAME)]
    pub contract_name: String,

    /// Petname of the wallet purse whose whole balance funds the faucet fee purse.
    #[arg(long, env = "FAUCET_DEPLOY_PURSE", default_value = DEFAULT_PURSE_PETNAME)]
    pub purse: String,

    /// Where the generated constants module is written.
    #[arg(long, alias = "out", env = "FAUCET_DEPLOY_CONSTANTS_OUT", default_value = DEFAULT_CONSTANTS_PATH)]
    pub constants_out: String,

    /// Per-request timeout in seconds.
    ///
    /// If not provided, remote calls wait indefinitely.
    #[arg(long, env = "FAUCET_DEPLOY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to an existing FaucetDeploy.toml configuration file to load.
    ///
    /// When provided, the deploy uses the configuration from this file
    /// instead of the other arguments.
    #[arg(long, alias = "conf", env = "FAUCET_DEPLOY_CONFIG")]
    pub config: Option<String>,

    /// Save the configuration to FaucetDeploy.toml in the project directory before deploying.
    #[arg(long, env = "FAUCET_DEPLOY_SAVE_CONFIG")]
    pub save_config: bool,
}
