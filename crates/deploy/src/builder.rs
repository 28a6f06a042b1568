//! Builder module for creating a [`Deployer`] configuration.
//!
//! [`DeployerBuilder`] fills in the defaults of a standard dapp layout and
//! validates the home endpoint before anything touches the network.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    DEFAULT_CONSTANTS_PATH, DEFAULT_CONTRACT_NAME, DEFAULT_CONTRACT_PATH, DEFAULT_ENDPOINT,
    DEFAULT_PURSE_PETNAME, Deployer,
};

/// Builder for creating a [`Deployer`] configuration.
///
/// # Example
///
/// ```no_run
/// use faucet_deploy::DeployerBuilder;
///
/// # async fn example() -> anyhow::Result<()> {
/// let deployer = DeployerBuilder::new()
///     .endpoint("http://127.0.0.1:8000/rpc")
///     .project_dir("dapp-fungible-faucet")
///     .build()?;
/// deployer.deploy().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeployerBuilder {
    endpoint: Option<String>,
    project_dir: Option<PathBuf>,
    contract_name: Option<String>,
    contract_path: Option<PathBuf>,
    purse_petname: Option<String>,
    constants_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

impl DeployerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the home JSON-RPC endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the directory relative paths are resolved against.
    pub fn project_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(path.into());
        self
    }

    pub fn contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = Some(name.into());
        self
    }

    /// Set the contract entry module.
    pub fn contract_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.contract_path = Some(path.into());
        self
    }

    /// Set the petname of the purse funding the faucet.
    pub fn purse_petname(mut self, petname: impl Into<String>) -> Self {
        self.purse_petname = Some(petname.into());
        self
    }

    /// Set where the constants module is written.
    pub fn constants_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.constants_path = Some(path.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Build the [`Deployer`] configuration.
    pub fn build(self) -> Result<Deployer> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let contract_name = self
            .contract_name
            .unwrap_or_else(|| DEFAULT_CONTRACT_NAME.to_string());

        let deployer = Deployer {
            endpoint,
            project_dir: self.project_dir.unwrap_or_else(|| PathBuf::from(".")),
            contract_name,
            contract_path: self
                .contract_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACT_PATH)),
            purse_petname: self
                .purse_petname
                .unwrap_or_else(|| DEFAULT_PURSE_PETNAME.to_string()),
            constants_path: self
                .constants_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONSTANTS_PATH)),
            request_timeout_secs: self.request_timeout_secs,
        };

        deployer.validate()?;
        tracing::debug!(deployer = ?deployer, "Deploy configuration built");

        Ok(deployer)
    }
}
