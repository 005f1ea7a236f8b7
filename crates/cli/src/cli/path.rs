use std::path::PathBuf;

use anyhow::Result;
use menu_translator_core::{config::Config, model::ModelAsset};

use crate::cli::platform_bindings;

pub fn execute(model: Option<&str>, dir: Option<PathBuf>, config: &Config) -> Result<()> {
    let model_config = config.resolve_model(model)?;
    let asset = platform_bindings(&config.storage, dir).model_asset(&model_config.filename)?;
    println!("{}", describe(&asset));
    Ok(())
}

fn describe(asset: &ModelAsset) -> String {
    let state = if asset.exists() { "present" } else { "missing" };
    format!("{} ({state})", asset.path().display())
}
