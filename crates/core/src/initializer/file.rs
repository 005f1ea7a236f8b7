use crate::initializer::ModelInitializer;
use crate::model::{ModelConfig, ModelMetrics};
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::instrument;

const DEFAULT_MIN_SIZE_BYTES: u64 = 1;

/// Checks that the model file is a readable regular file of a plausible size.
///
/// Nothing is parsed. This only proves the bytes are reachable before a
/// runtime is pointed at them.
#[derive(Debug)]
pub struct FileInitializer {
    min_size_bytes: u64,
    metrics: ModelMetrics,
}

impl FileInitializer {
    pub fn new(model_config: &ModelConfig) -> Result<Self> {
        let min_size_bytes = model_config
            .get_setting::<u64>("min_size_bytes")
            .context("'min_size_bytes' must be a non-negative integer")?
            .unwrap_or(DEFAULT_MIN_SIZE_BYTES);
        Ok(Self {
            min_size_bytes,
            metrics: ModelMetrics::default(),
        })
    }
}

impl ModelInitializer for FileInitializer {
    #[instrument(skip(self))]
    fn initialize(&mut self, model_path: &Path) -> Result<()> {
        let start_time = Instant::now();

        let mut file = File::open(model_path)
            .with_context(|| format!("cannot open {}", model_path.display()))?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(anyhow!("{} is not a regular file", model_path.display()));
        }
        let size_bytes = metadata.len();
        if size_bytes < self.min_size_bytes {
            return Err(anyhow!(
                "model file is {size_bytes} bytes, expected at least {}",
                self.min_size_bytes
            ));
        }

        // Touch the first page so unreadable storage fails here
        let mut head = [0u8; 4096];
        let head_bytes = file
            .read(&mut head)
            .with_context(|| format!("cannot read {}", model_path.display()))?;

        self.metrics = ModelMetrics {
            init_latency_ms: start_time.elapsed().as_secs_f32() * 1000.0,
            size_bytes,
        };
        tracing::debug!(size_bytes, head_bytes, "model file readable");
        Ok(())
    }

    fn metrics(&self) -> ModelMetrics {
        self.metrics.clone()
    }
}
