//! File system utils.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub struct FsHandler;

impl FsHandler {
    /// Resolve `path` against `base`. Absolute paths are returned unchanged.
    pub fn resolve(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Create the parent directory of `path` (and its ancestors) if missing.
    pub fn create_parent_directory(path: &Path) -> anyhow::Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        tracing::debug!("Ensured output directory: {}", parent.display());

        Ok(())
    }

    /// Write `content` to `path`, replacing any previous file.
    pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
        Self::create_parent_directory(path)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
