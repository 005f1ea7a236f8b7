//! Model initializers the guard can hand a present asset to.
use crate::model::{InitializerKind, ModelConfig, ModelMetrics};
use anyhow::Result;
use std::path::Path;
use tracing::instrument;

mod file;

pub use file::FileInitializer;

/// Loads a model that is known to be present on disk.
///
/// Errors are reported back to the caller as a failed initialization, they
/// never abort the host.
pub trait ModelInitializer {
    fn initialize(&mut self, model_path: &Path) -> Result<()>;

    fn metrics(&self) -> ModelMetrics {
        ModelMetrics::default()
    }
}

impl<F> ModelInitializer for F
where
    F: FnMut(&Path) -> Result<()>,
{
    fn initialize(&mut self, model_path: &Path) -> Result<()> {
        self(model_path)
    }
}

/// Accepts any present asset without reading it.
#[derive(Debug, Default)]
pub struct NoopInitializer;

impl ModelInitializer for NoopInitializer {
    fn initialize(&mut self, _model_path: &Path) -> Result<()> {
        Ok(())
    }
}

#[instrument(skip(model_config), fields(initializer = model_config.initializer.as_str()))]
pub fn get_initializer(model_config: &ModelConfig) -> Result<Box<dyn ModelInitializer + Send>> {
    match model_config.initializer {
        InitializerKind::File => Ok(Box::new(FileInitializer::new(model_config)?)),
        InitializerKind::Noop => Ok(Box::new(NoopInitializer)),
    }
}
