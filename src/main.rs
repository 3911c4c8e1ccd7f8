// src/main.rs
use anyhow::Result;
use clap::Parser;
use cv_builder::cli::{handle_command, Cli};
use cv_builder::core::ConfigManager;
use cv_builder::logging;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ConfigManager::load(cli.config.as_deref())?;
    logging::init(config.log_file.as_deref())?;
    config.ensure_directories()?;

    info!("Storage: {}", config.storage_dir.display());
    info!("Output: {}", config.output_dir.display());

    handle_command(cli, config).await
}
