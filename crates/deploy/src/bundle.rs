//! Contract bundling.
//!
//! A bundle packs the directory holding the contract entry module into a
//! gzipped tar archive, base64-encoded so it can travel inside a JSON request.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use flate2::{Compression, write::GzEncoder};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Encoding of the packaged contract code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ModuleFormat {
    #[default]
    TarGzBase64,
}

/// Packaged, deployable representation of contract source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub module_format: ModuleFormat,
    /// Path of the entry module inside the archive.
    pub entry: String,
    pub archive_base64: String,
    /// Hex SHA-512 of `archive_base64`.
    pub archive_sha512: String,
}

/// Bundle the contract whose entry module lives at `entry_path`.
///
/// Every file under the entry's directory is included, except dot-entries
/// other than the entry itself.
/// Archive metadata is normalised so identical trees give identical bundles.
pub fn bundle_source(entry_path: &Path) -> Result<Bundle> {
    let metadata = std::fs::metadata(entry_path)
        .with_context(|| format!("Contract entry not found: {}", entry_path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Contract entry is not a file: {}", entry_path.display());
    }

    let root = entry_path
        .parent()
        .context("Contract entry must have a parent directory")?;
    let entry = entry_path
        .file_name()
        .context("Contract entry must have a file name")?
        .to_string_lossy()
        .to_string();

    let mut files = Vec::new();
    collect_files(root, entry_path, &mut files)?;
    files.sort();

    let mut archive = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for path in &files {
        let relative = path
            .strip_prefix(root)
            .context("Bundled file escaped the source root")?;
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        header.set_cksum();

        archive
            .append_data(&mut header, relative, content.as_slice())
            .with_context(|| format!("Failed to add {} to bundle", relative.display()))?;
        tracing::trace!(file = %relative.display(), size = content.len(), "Bundled file");
    }

    let mut encoder = archive
        .into_inner()
        .context("Failed to finish bundle archive")?;
    encoder.flush().context("Failed to flush bundle archive")?;
    let compressed = encoder.finish().context("Failed to compress bundle")?;

    let archive_base64 = BASE64.encode(&compressed);
    let archive_sha512 = hex::encode(Sha512::digest(archive_base64.as_bytes()));

    tracing::debug!(
        root = %root.display(),
        entry = %entry,
        files = files.len(),
        size = archive_base64.len(),
        "Contract bundled"
    );

    Ok(Bundle {
        module_format: ModuleFormat::TarGzBase64,
        entry,
        archive_base64,
        archive_sha512,
    })
}

fn collect_files(dir: &Path, entry_path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') && path != entry_path {
            continue;
        }

        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if file_type.is_dir() {
            collect_files(&path, entry_path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }

    Ok(())
}
