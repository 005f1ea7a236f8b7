//! Check-then-initialize guard for the on-device model.
//!
//! The guard looks for the model file once, hands it to an initializer when
//! present and turns every failure into a logged [`InitializationOutcome`].
//! Nothing is ever propagated to the caller, including initializer panics.
use crate::diagnostics::{DiagnosticSink, MODEL_NOT_INSTALLED, init_failed_message};
use crate::initializer::ModelInitializer;
use crate::model::ModelAsset;
use serde::Serialize;
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Once;
use tracing::instrument;

/// Terminal result of one initialization attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InitializationOutcome {
    /// The model file was not found, the initializer was not called.
    Skipped,
    Succeeded,
    /// The initializer failed with the given message.
    Failed { message: String },
}

impl InitializationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitializationOutcome::Skipped => "skipped",
            InitializationOutcome::Succeeded => "succeeded",
            InitializationOutcome::Failed { .. } => "failed",
        }
    }
}

/// Binds an initializer and a diagnostic sink for repeated checks.
pub struct ModelAvailabilityGuard<I, S> {
    initializer: I,
    sink: S,
}

impl<I, S> ModelAvailabilityGuard<I, S>
where
    I: ModelInitializer,
    S: DiagnosticSink,
{
    pub fn new(initializer: I, sink: S) -> Self {
        Self { initializer, sink }
    }

    pub fn check_and_initialize(
        &mut self,
        base_dir: &Path,
        model_filename: &str,
    ) -> InitializationOutcome {
        check_and_initialize(base_dir, model_filename, &mut self.initializer, &self.sink)
    }
}

/// Runs the guard once for `base_dir/model_filename`.
#[instrument(skip(initializer, sink))]
pub fn check_and_initialize<I, S>(
    base_dir: &Path,
    model_filename: &str,
    initializer: &mut I,
    sink: &S,
) -> InitializationOutcome
where
    I: ModelInitializer + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let asset = ModelAsset::new(base_dir, model_filename);
    let model_path = asset.path();

    if !asset.exists() {
        tracing::info!(
            path = %model_path.display(),
            "model file not present, skipping initialization"
        );
        sink.write(MODEL_NOT_INSTALLED);
        return InitializationOutcome::Skipped;
    }

    let result = call_quietly(|| initializer.initialize(&model_path));
    let message = match result {
        Ok(Ok(())) => {
            tracing::info!(path = %model_path.display(), "model initialized");
            return InitializationOutcome::Succeeded;
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    tracing::error!(
        path = %model_path.display(),
        error = %message,
        "model initialization failed"
    );
    sink.write(&init_failed_message(&message));
    InitializationOutcome::Failed { message }
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static PANIC_HOOK: Once = Once::new();

/// Wraps the process panic hook once so panics raised on a thread inside
/// [`call_quietly`] are not printed. Other threads keep the previous hook.
fn install_quiet_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Catches a panic from `f` without the default "thread panicked" report,
/// the failure is logged through the sink instead.
fn call_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    install_quiet_panic_hook();
    let was_quiet = QUIET_PANICS.with(|quiet| quiet.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(was_quiet));
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "initializer panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::initializer::NoopInitializer;
    use crate::model::DEFAULT_MODEL_FILENAME;
    use crate::test_utils::create_model_file;
    use anyhow::{Result, anyhow};

    #[test]
    fn test_missing_model_is_skipped() {
        let sink = MemorySink::new();
        let mut calls = 0;
        let mut init = |_: &Path| -> Result<()> {
            calls += 1;
            Ok(())
        };

        let outcome = check_and_initialize(
            Path::new("/data/app/files"),
            DEFAULT_MODEL_FILENAME,
            &mut init,
            &sink,
        );

        assert_eq!(outcome, InitializationOutcome::Skipped);
        assert_eq!(
            sink.lines(),
            vec!["Gemma model is not installed yet. Use the model manager to load model first"]
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_present_model_succeeds_silently() {
        let dir = tempfile::tempdir().unwrap();
        let expected = create_model_file(dir.path(), DEFAULT_MODEL_FILENAME, b"weights");
        let sink = MemorySink::new();
        let mut seen = None;
        let mut init = |path: &Path| -> Result<()> {
            seen = Some(path.to_path_buf());
            Ok(())
        };

        let outcome = check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME, &mut init, &sink);

        assert_eq!(outcome, InitializationOutcome::Succeeded);
        assert!(sink.lines().is_empty());
        assert_eq!(seen, Some(expected));
    }

    #[test]
    fn test_initializer_error_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        create_model_file(dir.path(), DEFAULT_MODEL_FILENAME, b"weights");
        let sink = MemorySink::new();
        let mut init = |_: &Path| -> Result<()> { Err(anyhow!("out of memory")) };

        let outcome = check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME, &mut init, &sink);

        assert_eq!(
            outcome,
            InitializationOutcome::Failed {
                message: "out of memory".to_string()
            }
        );
        assert_eq!(
            sink.lines(),
            vec!["Failed to Initialize AI model: out of memory"]
        );
    }

    #[test]
    fn test_initializer_panic_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        create_model_file(dir.path(), DEFAULT_MODEL_FILENAME, b"weights");
        let sink = MemorySink::new();
        let mut init = |_: &Path| -> Result<()> { panic!("delegate crashed") };

        let outcome = check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME, &mut init, &sink);

        assert_eq!(
            outcome,
            InitializationOutcome::Failed {
                message: "delegate crashed".to_string()
            }
        );
        assert_eq!(
            sink.lines(),
            vec!["Failed to Initialize AI model: delegate crashed"]
        );
    }

    #[test]
    fn test_contained_panic_restores_hook_state() {
        let dir = tempfile::tempdir().unwrap();
        create_model_file(dir.path(), DEFAULT_MODEL_FILENAME, b"weights");
        let sink = MemorySink::new();
        let mut init = |_: &Path| -> Result<()> { panic!("delegate crashed") };

        assert!(!QUIET_PANICS.with(Cell::get));
        check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME, &mut init, &sink);
        assert!(!QUIET_PANICS.with(Cell::get));

        let nested = call_quietly(|| call_quietly(|| 7));
        assert_eq!(nested.unwrap().unwrap(), 7);
        assert!(!QUIET_PANICS.with(Cell::get));
    }

    #[test]
    fn test_formatted_panic_payload() {
        let dir = tempfile::tempdir().unwrap();
        create_model_file(dir.path(), "m.bin", b"weights");
        let sink = MemorySink::new();
        let code = 7;
        let mut init = |_: &Path| -> Result<()> { panic!("delegate exited with {code}") };

        let outcome = check_and_initialize(dir.path(), "m.bin", &mut init, &sink);

        assert_eq!(
            outcome,
            InitializationOutcome::Failed {
                message: "delegate exited with 7".to_string()
            }
        );
    }

    #[test]
    fn test_repeated_checks_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let sink = MemorySink::new();
        let mut guard = ModelAvailabilityGuard::new(NoopInitializer, &sink);

        let first = guard.check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME);
        let second = guard.check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME);
        assert_eq!(first, InitializationOutcome::Skipped);
        assert_eq!(first, second);

        create_model_file(dir.path(), DEFAULT_MODEL_FILENAME, b"weights");
        let third = guard.check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME);
        let fourth = guard.check_and_initialize(dir.path(), DEFAULT_MODEL_FILENAME);
        assert_eq!(third, InitializationOutcome::Succeeded);
        assert_eq!(third, fourth);

        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_outcome_serialization() {
        let failed = InitializationOutcome::Failed {
            message: "out of memory".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&failed).unwrap(),
            r#"{"status":"failed","message":"out of memory"}"#
        );
        assert_eq!(
            serde_json::to_string(&InitializationOutcome::Skipped).unwrap(),
            r#"{"status":"skipped"}"#
        );
        assert_eq!(failed.as_str(), "failed");
    }
}
