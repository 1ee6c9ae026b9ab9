//! Tracing setup shared by the binaries: one fmt subscriber teed to stdout and a log file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. sqlx logs every statement at info, which drowns per-post events.
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,sqlx=warn";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over [`DEFAULT_LOG_DIRECTIVES`]; load `.env` first if it sets `RUST_LOG`.
/// Span close events are emitted so each pipeline run logs its duration.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(Path::new(log_file_path))?);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stdout.and(file))
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn log_file_is_created_with_parents_and_appended() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/logs/guard.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES).is_ok());
    }
}
