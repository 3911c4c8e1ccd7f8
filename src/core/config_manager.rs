// src/core/config_manager.rs
//! Application configuration: defaults, optional YAML file, resolved paths

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::FsOps;
use crate::export::PdfOptions;
use crate::labels::Locale;
use crate::storage::DEFAULT_SLOT_KEY;

pub const CONFIG_ENV_VAR: &str = "CV_BUILDER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "cv-builder.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory backing the durable slot
    pub storage_dir: PathBuf,
    pub slot_key: String,
    /// Where exported artifacts land
    pub output_dir: PathBuf,
    pub locale: Locale,
    /// TOML table overriding built-in labels
    pub labels_file: Option<PathBuf>,
    pub typst_binary: PathBuf,
    pub saved_indicator_ms: u64,
    pub log_file: Option<PathBuf>,
    pub pdf: PdfOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".cv-builder"),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            output_dir: PathBuf::from("out"),
            locale: Locale::En,
            labels_file: None,
            typst_binary: PathBuf::from("typst"),
            saved_indicator_ms: 1000,
            log_file: None,
            pdf: PdfOptions::default(),
        }
    }
}

impl AppConfig {
    /// Anchor every relative path at `base`. The Typst binary is left
    /// alone unless it names a path, so a bare `typst` still goes through PATH.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.storage_dir = FsOps::normalize_path(base, &self.storage_dir);
        self.output_dir = FsOps::normalize_path(base, &self.output_dir);
        self.labels_file = self.labels_file.map(|p| FsOps::normalize_path(base, &p));
        self.log_file = self.log_file.map(|p| FsOps::normalize_path(base, &p));
        if self.typst_binary.components().count() > 1 {
            self.typst_binary = FsOps::normalize_path(base, &self.typst_binary);
        }
        self
    }

    /// How long the "Saved" indicator stays up; huge values saturate
    pub fn saved_hold(&self) -> Duration {
        i64::try_from(self.saved_indicator_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.storage_dir)?;
        FsOps::ensure_dir_exists(&self.output_dir)?;
        if let Some(parent) = self.log_file.as_deref().and_then(Path::parent) {
            FsOps::ensure_dir_exists(parent)?;
        }
        Ok(())
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration. `explicit` wins over `CV_BUILDER_CONFIG`, which
    /// wins over `./cv-builder.yaml`; with none of them the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from(explicit, env_path.as_deref(), &cwd)
    }

    fn load_from(explicit: Option<&Path>, env_path: Option<&Path>, cwd: &Path) -> Result<AppConfig> {
        let candidate = match (explicit, env_path) {
            (Some(path), _) => Some(FsOps::normalize_path(cwd, path)),
            (None, Some(path)) => Some(FsOps::normalize_path(cwd, path)),
            (None, None) => {
                let default = cwd.join(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let config = match candidate {
            Some(path) => {
                let config = Self::parse_file(&path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                info!("No configuration file found, using defaults");
                AppConfig::default()
            }
        };

        Ok(config.resolve_paths(cwd))
    }

    fn parse_file(path: &Path) -> Result<AppConfig> {
        let content = FsOps::read_file_safe(path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration: {}", path.display()))
    }
}
