//! Generated installation constants consumed by the dapp UI.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fs::FsHandler;

/// Marker preceding the JSON record in a generated constants module.
const EXPORT_PREFIX: &str = "export default ";

/// Identifiers the UI needs to find the installed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappConstants {
    #[serde(rename = "CONTRACT_NAME")]
    pub contract_name: String,
    #[serde(rename = "INSTALLATION_BOARD_ID")]
    pub installation_board_id: String,
}

impl DappConstants {
    pub fn new(contract_name: impl Into<String>, installation_board_id: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            installation_board_id: installation_board_id.into(),
        }
    }
}

/// Render the constants as a JavaScript module.
pub fn render_constants(constants: &DappConstants, generated_from: &Path) -> Result<String> {
    let json = serde_json::to_string_pretty(constants)
        .context("Failed to serialize installation constants")?;

    Ok(format!(
        "// GENERATED FROM {}\n{}{};\n",
        generated_from.display(),
        EXPORT_PREFIX,
        json
    ))
}

/// Write the constants module to `path`, creating its directory if needed.
///
/// Any existing file at `path` is overwritten.
pub fn write_constants(constants: &DappConstants, path: &Path, generated_from: &Path) -> Result<()> {
    let content = render_constants(constants, generated_from)?;

    tracing::info!(path = %path.display(), "Writing installation constants");
    FsHandler::write_file(path, &content).context("Failed to write installation constants")
}

/// Parse a constants module produced by [`write_constants`].
pub fn parse_constants(content: &str) -> Result<DappConstants> {
    let start = content
        .find(EXPORT_PREFIX)
        .context("Missing default export in constants module")?;

    let json = content[start + EXPORT_PREFIX.len()..]
        .trim_end()
        .strip_suffix(';')
        .context("Constants module must end with ';'")?;

    serde_json::from_str(json).context("Failed to parse installation constants")
}
