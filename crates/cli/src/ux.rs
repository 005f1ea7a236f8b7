use console::{Style, StyledObject, style};
use menu_translator_core::{InitializationOutcome, model::ModelMetrics};

/// Represents the type of a status line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Warning,
    /// An error message.
    Error,
}

/// Styles a string of text according to the specified `MessageType`.
pub fn style_text(text: &str, kind: MessageType) -> StyledObject<&str> {
    let style_obj = match kind {
        MessageType::Success => Style::new().green(),
        MessageType::Warning => Style::new().yellow(),
        MessageType::Error => Style::new().red().bold(),
    };
    style_obj.apply_to(text)
}

/// Summarizes an outcome for the footer, without styling.
pub fn format_outcome(
    model_name: &str,
    outcome: &InitializationOutcome,
    metrics: &ModelMetrics,
) -> String {
    match outcome {
        InitializationOutcome::Skipped => format!("◼ Skipped {model_name}: model not installed."),
        InitializationOutcome::Failed { .. } => format!("◼ Failed to initialize {model_name}."),
        InitializationOutcome::Succeeded => {
            let mut footer = format!("◼ Initialized {model_name}.");
            let mut details = Vec::new();
            if metrics.size_bytes > 0 {
                details.push(format_size(metrics.size_bytes));
            }
            if metrics.init_latency_ms > 0.0 {
                details.push(format!("{:.2}ms", metrics.init_latency_ms));
            }
            if !details.is_empty() {
                footer.push_str(&format!(" {}", details.join(". ")));
            }
            footer
        }
    }
}

pub fn outcome_message_type(outcome: &InitializationOutcome) -> MessageType {
    match outcome {
        InitializationOutcome::Skipped => MessageType::Warning,
        InitializationOutcome::Succeeded => MessageType::Success,
        InitializationOutcome::Failed { .. } => MessageType::Error,
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

pub fn present_error(error: anyhow::Error) {
    let error_text = style("ERROR:").red().bold();
    eprintln!("\n{error_text} {error:#}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_styles() {
        let styled = style_text("test", MessageType::Error);
        assert_eq!(
            styled.force_styling(true).to_string(),
            "\u{1b}[31m\u{1b}[1mtest\u{1b}[0m"
        );
    }

    #[test]
    fn test_format_outcome() {
        let metrics = ModelMetrics {
            init_latency_ms: 3.5,
            size_bytes: 3 * 1024 * 1024,
        };

        let ok = format_outcome("gemma", &InitializationOutcome::Succeeded, &metrics);
        assert_eq!(ok, "◼ Initialized gemma. 3.00 MB. 3.50ms");

        let bare = format_outcome(
            "gemma",
            &InitializationOutcome::Succeeded,
            &ModelMetrics::default(),
        );
        assert_eq!(bare, "◼ Initialized gemma.");

        let skipped = format_outcome("gemma", &InitializationOutcome::Skipped, &metrics);
        assert_eq!(skipped, "◼ Skipped gemma: model not installed.");

        let failed = InitializationOutcome::Failed {
            message: "out of memory".to_string(),
        };
        assert_eq!(
            format_outcome("gemma", &failed, &metrics),
            "◼ Failed to initialize gemma."
        );
        assert_eq!(outcome_message_type(&failed), MessageType::Error);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.00 GB");
    }
}
