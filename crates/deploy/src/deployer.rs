use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    Board, ContractHost, DappConstants, Faucet, Home, Wallet, constants, fs::FsHandler, funder,
    installer, rpc,
};

/// The default name for the deploy configuration file.
pub const DEPLOYCONF_FILENAME: &str = "FaucetDeploy.toml";

/// The default contract name published in the generated constants.
pub const DEFAULT_CONTRACT_NAME: &str = "fungibleFaucet";

/// The default petname of the purse that funds the faucet.
pub const DEFAULT_PURSE_PETNAME: &str = "Agoric RUN currency";

/// The default contract entry module, relative to the project directory.
pub const DEFAULT_CONTRACT_PATH: &str = "contract/src/contract.js";

/// The default location of the generated constants, relative to the project directory.
pub const DEFAULT_CONSTANTS_PATH: &str = "ui/public/conf/installationConstants.js";

/// The default home RPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/rpc";

/// Deploys the faucet contract and writes the constants the UI needs.
///
/// This struct contains all the configuration needed for a deploy and can be
/// serialized to/from TOML format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployer {
    /// URL of the home JSON-RPC endpoint.
    pub endpoint: String,
    /// Directory relative paths are resolved against.
    pub project_dir: PathBuf,
    /// Name published as `CONTRACT_NAME`.
    pub contract_name: String,
    /// Path of the contract entry module.
    pub contract_path: PathBuf,
    /// Petname of the wallet purse that funds the fee purse.
    pub purse_petname: String,
    /// Where the generated constants module is written.
    pub constants_path: PathBuf,
    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Deployer {
    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize deploy config to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Load the configuration from a TOML file, or from the default file
    /// inside a directory.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file or directory not found: {}",
                path.display()
            ));
        }

        let config_path = if path.is_dir() {
            path.join(DEPLOYCONF_FILENAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config from {}", config_path.display()))?;
        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file as TOML")?;

        // A relative project dir is relative to the file it was saved in.
        if config.project_dir.is_relative() {
            if let Some(config_dir) = config_path.parent() {
                config.project_dir = FsHandler::resolve(config_dir, &config.project_dir);
            }
        }

        config
            .validate()
            .with_context(|| format!("Invalid config in {}", config_path.display()))?;
        tracing::info!(
            path = %config_path.display(),
            project_dir = %config.project_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check the endpoint is an http(s) URL and the contract name is set.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid home endpoint: {}", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Home endpoint must be http or https, got '{}'", url.scheme());
        }

        if self.contract_name.trim().is_empty() {
            anyhow::bail!("Contract name must not be empty");
        }

        Ok(())
    }

    /// Save the configuration to the default location (FaucetDeploy.toml in the project dir).
    pub fn save_config(&self) -> Result<PathBuf> {
        let config_path = self.project_dir.join(DEPLOYCONF_FILENAME);
        self.save_to_file(&config_path)?;
        Ok(config_path)
    }

    /// The contract entry module, resolved against the project directory.
    pub fn contract_entry(&self) -> PathBuf {
        FsHandler::resolve(&self.project_dir, &self.contract_path)
    }

    /// The constants output path, resolved against the project directory.
    pub fn constants_output(&self) -> PathBuf {
        FsHandler::resolve(&self.project_dir, &self.constants_path)
    }

    /// Run the deploy against the home served at [`Deployer::endpoint`].
    pub async fn deploy(&self) -> Result<DappConstants> {
        let home = rpc::connect_home(
            &self.endpoint,
            self.request_timeout_secs.map(Duration::from_secs),
        )
        .context("Failed to connect to home endpoint")?;

        tracing::info!(endpoint = %self.endpoint, "Connected to home endpoint");

        self.deploy_to(&home).await
    }

    /// Run the deploy against `home`.
    ///
    /// Steps run strictly in order: fund the fee purse, install and register
    /// the contract, write the constants. The constants file is only written
    /// once every remote call has succeeded.
    pub async fn deploy_to<Z, B, W, F>(&self, home: &Home<Z, B, W, F>) -> Result<DappConstants>
    where
        Z: ContractHost,
        B: Board,
        W: Wallet,
        F: Faucet,
    {
        tracing::info!(contract = %self.contract_name, "Starting deployment process...");

        funder::send_deposit(&home.wallet, &home.faucet, &self.purse_petname)
            .await
            .context("Failed to fund the faucet fee purse")?;

        let contract_entry = self.contract_entry();
        let (contract_name, board_id) = installer::install_bundle(
            &self.contract_name,
            &contract_entry,
            &home.zoe,
            &home.board,
        )
        .await?;

        let dapp_constants = DappConstants::new(contract_name, board_id.to_string());
        let output = self.constants_output();
        constants::write_constants(&dapp_constants, &output, &contract_entry)?;

        tracing::info!("✓ Deployment complete!");
        tracing::info!("Contract name:          {}", dapp_constants.contract_name);
        tracing::info!("Installation board id:  {}", dapp_constants.installation_board_id);
        tracing::info!("Constants written to:   {}", output.display());

        Ok(dapp_constants)
    }
}
