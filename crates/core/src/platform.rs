//! Per-platform wiring of storage and diagnostics around the shared guard.
use crate::config::StorageConfig;
use crate::diagnostics::{DiagnosticSink, StdoutSink};
use crate::guard::{InitializationOutcome, check_and_initialize};
use crate::initializer::ModelInitializer;
use crate::model::ModelAsset;
use crate::storage::{
    DataDirectory, DocumentsDirectory, FixedDirectory, Platform, StorageDirectory, StorageError,
};
use std::path::PathBuf;
use tracing::instrument;

pub type BoxedStorage = Box<dyn StorageDirectory + Send + Sync>;
pub type BoxedSink = Box<dyn DiagnosticSink + Send + Sync>;

/// What a platform shell contributes: where models live and where
/// diagnostics go.
pub struct PlatformBindings {
    platform: Platform,
    storage: BoxedStorage,
    sink: BoxedSink,
}

impl PlatformBindings {
    pub fn new(platform: Platform, storage: BoxedStorage, sink: BoxedSink) -> Self {
        Self {
            platform,
            storage,
            sink,
        }
    }

    /// Android hands over its internal files directory from the activity.
    pub fn android(files_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Platform::Android,
            Box::new(FixedDirectory::new(files_dir)),
            Box::new(StdoutSink),
        )
    }

    pub fn ios() -> Self {
        Self::new(
            Platform::Ios,
            Box::new(DocumentsDirectory),
            Box::new(StdoutSink),
        )
    }

    pub fn desktop() -> Self {
        Self::new(
            Platform::Desktop,
            Box::new(DataDirectory),
            Box::new(StdoutSink),
        )
    }

    /// An explicit `dir` wins over the platform default. Android has no
    /// default, config validation rejects it without `dir`.
    pub fn from_config(config: &StorageConfig) -> Self {
        match (&config.dir, config.platform) {
            (Some(dir), platform) => Self::new(
                platform,
                Box::new(FixedDirectory::new(dir)),
                Box::new(StdoutSink),
            ),
            (None, Platform::Ios) => Self::ios(),
            (None, _) => Self::desktop(),
        }
    }

    pub fn with_sink(mut self, sink: BoxedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn storage_dir(&self) -> Result<PathBuf, StorageError> {
        self.storage.resolve()
    }

    pub fn model_asset(&self, filename: &str) -> Result<ModelAsset, StorageError> {
        Ok(ModelAsset::new(self.storage_dir()?, filename))
    }

    /// Resolves the storage directory, then runs the guard.
    ///
    /// Only a directory that cannot be resolved is an error, every guard
    /// result comes back as an outcome.
    #[instrument(skip(self, initializer), fields(platform = self.platform.as_str()))]
    pub fn init_model(
        &self,
        filename: &str,
        initializer: &mut dyn ModelInitializer,
    ) -> Result<InitializationOutcome, StorageError> {
        let base_dir = self.storage_dir()?;
        Ok(check_and_initialize(
            &base_dir,
            filename,
            initializer,
            self.sink.as_ref(),
        ))
    }
}
