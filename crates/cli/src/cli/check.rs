use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use menu_translator_core::{
    InitializationOutcome,
    config::Config,
    diagnostics::MemorySink,
    get_initializer,
    model::{ModelConfig, ModelMetrics},
};
use serde_json::json;

use crate::cli::platform_bindings;
use crate::ux::{format_outcome, outcome_message_type, style_text};

/// Everything one guard run produced.
#[derive(Debug)]
struct CheckReport {
    path: PathBuf,
    outcome: InitializationOutcome,
    metrics: ModelMetrics,
    diagnostics: Vec<String>,
}

/// Runs the availability guard for one model and reports the outcome.
///
/// The guard itself runs on the blocking pool so file access never stalls
/// the runtime. Diagnostics go to stdout, or into the report with `--json`.
pub async fn execute(
    model: Option<&str>,
    dir: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let model_config = config.resolve_model(model)?;
    let report = run_guard(&model_config, dir, config).await?;

    if json {
        let body = json_report(&model_config.name, &report);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for line in &report.diagnostics {
            println!("{line}");
        }
        let footer = format_outcome(&model_config.name, &report.outcome, &report.metrics);
        eprintln!("{}", style_text(&footer, outcome_message_type(&report.outcome)));
    }
    Ok(())
}

fn json_report(model_name: &str, report: &CheckReport) -> serde_json::Value {
    json!({
        "model": model_name,
        "path": report.path.display().to_string(),
        "outcome": report.outcome,
        "diagnostics": report.diagnostics,
    })
}

async fn run_guard(
    model_config: &ModelConfig,
    dir: Option<PathBuf>,
    config: &Config,
) -> Result<CheckReport> {
    let sink = Arc::new(MemorySink::new());
    let bindings = platform_bindings(&config.storage, dir).with_sink(Box::new(sink.clone()));
    let mut initializer = get_initializer(model_config)?;
    let filename = model_config.filename.clone();
    tracing::debug!(
        model = %model_config.name,
        platform = bindings.platform().as_str(),
        "running model check"
    );

    let (path, outcome, metrics) = tokio::task::spawn_blocking(move || -> Result<_> {
        let path = bindings.model_asset(&filename)?.path();
        let outcome = bindings.init_model(&filename, initializer.as_mut())?;
        Ok((path, outcome, initializer.metrics()))
    })
    .await
    .context("Model check task failed")??;
    tracing::debug!(status = outcome.as_str(), "model check finished");

    Ok(CheckReport {
        path,
        outcome,
        metrics,
        diagnostics: sink.lines(),
    })
}
