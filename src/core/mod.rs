// src/core/mod.rs
//! Core services shared by every front end

pub mod config_manager;
pub mod fs_ops;

pub use config_manager::{AppConfig, ConfigManager};
pub use fs_ops::FsOps;
