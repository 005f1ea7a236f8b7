//! Logging for menu-translator.
use anyhow::Context;
use menu_translator_core::get_data_dir;
use std::io::LineWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::OffsetTime;

const LOG_FILE_NAME: &str = "menu-translator.log";
const MAX_LOG_BYTES: u64 = 100 * 1024;

/// Initializes file based logging under the application data directory.
///
/// The log lives at `<data_dir>/menu-translator.log`. A log larger than 100KB
/// is moved to `menu-translator.log.old` first, replacing any older backup.
/// Both crates log at DEBUG.
///
/// # Errors
///
/// Fails when the data directory cannot be created, the log cannot be
/// rotated or opened, or the local UTC offset cannot be determined.
pub fn setup_logging() -> anyhow::Result<()> {
    let data_dir = get_data_dir().context("Failed to get data directory")?;
    let log_path = rotate_log(&data_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    // Ensure the logs are flushed after every line
    let writer = Mutex::new(LineWriter::new(log_file));

    tracing_subscriber::fmt()
        .with_env_filter("menu_translator=debug,menu_translator_core=debug")
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(OffsetTime::local_rfc_3339()?)
        .init();
    Ok(())
}

fn rotate_log(data_dir: &Path) -> std::io::Result<PathBuf> {
    let log_path = data_dir.join(LOG_FILE_NAME);

    if log_path.exists() {
        let metadata = std::fs::metadata(&log_path)?;
        if metadata.len() > MAX_LOG_BYTES {
            let backup_path = data_dir.join(format!("{LOG_FILE_NAME}.old"));
            if backup_path.exists() {
                std::fs::remove_file(&backup_path)?;
            }
            std::fs::rename(&log_path, backup_path)?;
        }
    }
    Ok(log_path)
}
