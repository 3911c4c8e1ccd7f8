// src/core/fs_ops.rs
//! Shared file system helpers

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FsOps;

impl FsOps {
    pub fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub fn read_file_safe(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub fn read_bytes_safe(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Absolute paths are kept, relative ones hang off `base`
    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    /// Storage key -> single safe file name component.
    ///
    /// Separators, dots and anything non-alphanumeric collapse into `-`,
    /// so a key can never point outside its directory.
    pub fn normalize_key(key: &str) -> String {
        let normalized = key
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        if normalized.is_empty() {
            "slot".to_string()
        } else {
            normalized
        }
    }
}
