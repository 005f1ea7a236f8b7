use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::{
    assets::{default_config, get_config_dir},
    model::ModelConfig,
    storage::Platform,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File system error: {0}")]
    IO(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub platform: Platform,
    /// Overrides the platform's default model directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub models: HashMap<String, ModelConfig>,
    pub model: ModelConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Looks up a model by name, falling back to the selected model.
    pub fn resolve_model(&self, name: Option<&str>) -> Result<ModelConfig, ConfigError> {
        match name {
            Some(name) => self
                .models
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::Config(format!("Model '{name}' not found"))),
            None => Ok(self.model.clone()),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StringOrObject<T> {
    String(String),
    Object(T),
}

#[derive(Deserialize, Debug)]
struct RawConfig {
    #[serde(default)]
    models: HashMap<String, ModelConfig>,
    model: StringOrObject<ModelConfig>,
    #[serde(default)]
    storage: StorageConfig,
}

impl RawConfig {
    #[instrument]
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut models_with_names = HashMap::new();
        for (k, v) in &self.models {
            let model_name = if v.name.is_empty() {
                k.clone()
            } else {
                v.name.clone()
            };
            let model = ModelConfig {
                name: model_name,
                ..v.clone()
            };
            models_with_names.insert(k.clone(), model);
        }

        let model = match &self.model {
            StringOrObject::String(s) => models_with_names
                .get(s)
                .cloned()
                .ok_or_else(|| ConfigError::Config(format!("Model '{s}' not found")))?,
            StringOrObject::Object(m) => m.clone(),
        };

        if self.storage.platform == Platform::Android && self.storage.dir.is_none() {
            return Err(ConfigError::Config(
                "android storage requires an explicit 'dir'".to_string(),
            ));
        }

        Ok(Config {
            models: models_with_names,
            model,
            storage: self.storage.clone(),
        })
    }
}

const CONFIG_FILE_NAME: &str = "menu-translator.yml";

/// `<config dir>/menu-translator.yml`, honoring `XDG_CONFIG_HOME`.
fn default_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Seeds `path` with the bundled config unless something is already there.
///
/// Returns whether the file was written. Parent directories are created.
fn ensure_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_config())?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(true)
}

/// Loads the config at `config_path`, or the default location when `None`.
#[instrument(skip(config_path))]
pub fn get_config(config_path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let path = config_path.unwrap_or_else(default_config_path);
    ensure_config_file(&path)?;
    let raw: RawConfig = serde_yaml::from_str(&fs::read_to_string(&path)?)?;
    raw.to_config()
}
