//! Installs the contract bundle and publishes its handle on the board.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{Board, BoardId, ContractHost, bundle::bundle_source};

/// Bundle the contract at `bundle_path`, install it and register the
/// installation handle on the board.
///
/// Returns the contract name together with the board id of the installation.
/// Nothing is rolled back on failure: a bundle that was installed but could
/// not be registered stays installed.
pub async fn install_bundle<Z, B>(
    contract_name: &str,
    bundle_path: &Path,
    zoe: &Z,
    board: &B,
) -> Result<(String, BoardId)>
where
    Z: ContractHost,
    B: Board,
{
    let bundle = bundle_source(bundle_path)
        .with_context(|| format!("Failed to bundle {}", bundle_path.display()))?;

    tracing::info!(
        contract = contract_name,
        path = %bundle_path.display(),
        sha512 = %bundle.archive_sha512,
        "Installing contract bundle..."
    );

    let installation = zoe
        .install(&bundle)
        .await
        .context("Failed to install contract bundle")?;

    let board_id = board
        .get_id(&installation)
        .await
        .context("Failed to register installation on the board")?;

    tracing::info!(
        contract = contract_name,
        board_id = %board_id,
        "Contract installed and registered"
    );

    Ok((contract_name.to_string(), board_id))
}
