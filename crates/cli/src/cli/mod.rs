//! menu-translator cli definition and entrypoint.
mod check;
mod path;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use menu_translator_core::config::{StorageConfig, get_config};
use menu_translator_core::platform::PlatformBindings;

use crate::log::setup_logging;

/// Checks and initializes the on-device translation model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show verbose logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default one.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the model is installed and initialize it.
    Check {
        /// Model to check, must be defined in the config.
        #[arg(short, long)]
        model: Option<String>,
        /// Directory holding the model, overrides the platform default.
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print where the model file is expected.
    Path {
        /// Model to locate, must be defined in the config.
        #[arg(short, long)]
        model: Option<String>,
        /// Directory holding the model, overrides the platform default.
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

/// Runs the main CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        setup_logging().context("Failed to set up logging")?;
    }

    let config = get_config(cli.config.clone()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Check { model, dir, json } => {
            check::execute(model.as_deref(), dir, json, &config).await
        }
        Commands::Path { model, dir } => path::execute(model.as_deref(), dir, &config),
    }
}

/// Storage bindings for the configured platform, with `dir` taking precedence.
fn platform_bindings(storage: &StorageConfig, dir: Option<PathBuf>) -> PlatformBindings {
    match dir {
        Some(dir) => PlatformBindings::from_config(&StorageConfig {
            platform: storage.platform,
            dir: Some(dir),
        }),
        None => PlatformBindings::from_config(storage),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::path::{Path, PathBuf};

    use menu_translator_core::config::{Config, get_config};

    /// Writes a desktop config whose single model uses `initializer`.
    pub fn load_config(dir: &Path, initializer: &str) -> Config {
        let config_path: PathBuf = dir.join("menu-translator.yml");
        let content = format!(
            r#"
models:
  gemma-2b-it:
    filename: gemma-2b-it-cpu-int4.bin
    initializer: {initializer}
model: gemma-2b-it
storage:
  platform: desktop
"#
        );
        std::fs::write(&config_path, content).unwrap();
        get_config(Some(config_path)).unwrap()
    }
}
