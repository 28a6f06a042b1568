//! deploy-faucet installs the fungible faucet contract and writes the constants its UI needs.

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use faucet_deploy::{Deployer, DeployerBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    // If a config file is provided, load it and deploy
    if let Some(config_path) = &cli.config {
        let config_path = PathBuf::from(config_path);
        let deployer = Deployer::load_from_file(&config_path)?;

        tracing::info!(
            config_path = %config_path.display(),
            endpoint = %deployer.endpoint,
            contract = %deployer.contract_name,
            "Loading deployment from config file..."
        );

        deployer.deploy().await?;

        return Ok(());
    }

    // Otherwise, create the deployment from CLI arguments
    let mut builder = DeployerBuilder::new()
        .endpoint(cli.endpoint.to_url())
        .project_dir(PathBuf::from(&cli.project_dir))
        .contract_path(PathBuf::from(&cli.contract))
        .contract_name(&cli.contract_name)
        .purse_petname(&cli.purse)
        .constants_path(PathBuf::from(&cli.constants_out));

    if let Some(timeout) = cli.timeout {
        builder = builder.request_timeout_secs(timeout);
    }

    let deployer = builder.build()?;

    if cli.save_config {
        deployer.save_config()?;
    }

    deployer.deploy().await?;

    Ok(())
}
