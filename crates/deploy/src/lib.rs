//! faucet-deploy - Deployment library for the fungible faucet dapp.
//!
//! This crate funds the faucet's fee purse, installs the contract bundle,
//! registers it on the board and writes the constants the UI is built against.

mod builder;
pub use builder::DeployerBuilder;

mod deployer;
pub use deployer::{
    DEFAULT_CONSTANTS_PATH, DEFAULT_CONTRACT_NAME, DEFAULT_CONTRACT_PATH, DEFAULT_ENDPOINT,
    DEFAULT_PURSE_PETNAME, DEPLOYCONF_FILENAME, Deployer,
};

mod bundle;
pub use bundle::{Bundle, ModuleFormat, bundle_source};

pub mod constants;
pub use constants::DappConstants;

mod fs;
pub mod funder;
pub mod installer;

mod remote;
pub use remote::{
    Amount, Board, BoardId, ContractHost, Faucet, Home, InstallationHandle, Payment, Purse,
    RemoteRef, Wallet,
};

pub mod rpc;
pub use rpc::{RemoteHome, connect_home};

#[cfg(test)]
mod testing;
