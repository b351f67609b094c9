//! Plain-text operation logging.
//!
//! Operations keep a timestamped log file next to the data, fed from the
//! `tracing` events emitted at every operation boundary.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Install a global subscriber that appends events to `log_file`,
/// creating it if needed. Honors `RUST_LOG`, defaulting to `info`.
///
/// Only the first call per process installs a subscriber; later calls
/// still succeed so embedding applications can call it unconditionally.
pub fn init_file_logging(log_file: &Path) -> io::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs").join("optika.log");
        init_file_logging(&log).unwrap();
        assert!(log.exists());
        // A second call must not fail even though the global subscriber is
        // already set.
        init_file_logging(&log).unwrap();
    }
}
