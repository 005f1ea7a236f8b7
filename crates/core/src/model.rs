use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Filename the model manager installs the Gemma weights under.
pub const DEFAULT_MODEL_FILENAME: &str = "gemma-2b-it-cpu-int4.bin";

/// Model configuration for the app.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default, alias = "type")]
    pub initializer: InitializerKind,
    #[serde(default, flatten)]
    pub settings: HashMap<String, serde_yaml::Value>,
}

fn default_filename() -> String {
    DEFAULT_MODEL_FILENAME.to_string()
}

impl ModelConfig {
    /// Reads an initializer setting. Absent is `Ok(None)`, a value of the
    /// wrong type is an error.
    pub fn get_setting<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, serde_yaml::Error> {
        self.settings
            .get(key)
            .map(|v| serde_yaml::from_value(v.clone()))
            .transpose()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            filename: default_filename(),
            initializer: InitializerKind::default(),
            settings: HashMap::new(),
        }
    }
}

/// Built-in initializers (serialized as lowercase strings).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InitializerKind {
    #[default]
    File,
    Noop,
}

impl InitializerKind {
    pub fn as_str(&self) -> &'static str {
        match &self {
            InitializerKind::File => "file",
            InitializerKind::Noop => "noop",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMetrics {
    pub init_latency_ms: f32,
    pub size_bytes: u64,
}

/// The on-device weight file, located by directory and filename.
///
/// The absolute path is derived on each call and existence is never cached,
/// so a file placed by the model manager is picked up on the next check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAsset {
    base_dir: PathBuf,
    filename: String,
}

impl ModelAsset {
    pub fn new(base_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(&self.filename)
    }

    /// Single stat-like query against the filesystem.
    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}
