//! Destinations for the human readable lines the guard emits.
use std::sync::{Arc, Mutex};

/// Logged when the model file is absent.
pub const MODEL_NOT_INSTALLED: &str =
    "Gemma model is not installed yet. Use the model manager to load model first";

/// Formats the line logged when the initializer fails.
pub fn init_failed_message(error: &str) -> String {
    format!("Failed to Initialize AI model: {error}")
}

/// Receives diagnostic lines. Implementations must not panic.
pub trait DiagnosticSink {
    fn write(&self, message: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn write(&self, message: &str) {
        println!("{message}");
    }
}

/// Keeps every line in memory, in order of arrival.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn write(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn write(&self, message: &str) {
        (**self).write(message)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn write(&self, message: &str) {
        (**self).write(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_failed_message() {
        assert_eq!(
            init_failed_message("out of memory"),
            "Failed to Initialize AI model: out of memory"
        );
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.write("first");
        sink.write("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_borrowed_sink_forwards() {
        let sink = MemorySink::new();
        {
            let boxed: Box<dyn DiagnosticSink + '_> = Box::new(&sink);
            boxed.write(MODEL_NOT_INSTALLED);
        }
        assert_eq!(sink.lines(), vec![MODEL_NOT_INSTALLED]);
    }

    #[test]
    fn test_shared_sink_forwards() {
        let sink = Arc::new(MemorySink::new());
        let shared: Box<dyn DiagnosticSink + Send + Sync> = Box::new(sink.clone());
        shared.write("first");
        assert_eq!(sink.lines(), vec!["first"]);
    }
}
