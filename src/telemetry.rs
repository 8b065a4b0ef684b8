use crate::config::LoggingConfig;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "linkhub.log";
const LOG_ENV:  &str = "LINKHUB_LOG";

/// Where log lines go. The TUI owns the terminal, so it logs to file;
/// one-shot CLI modes log to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Which sink `init` installs, if any. `[logging] file = false` turns the
/// TUI log file off; it has no effect on stderr logging.
pub fn sink(logging: &LoggingConfig, target: LogTarget) -> Option<LogTarget> {
    match target {
        LogTarget::File if !logging.file => None,
        t => Some(t),
    }
}

/// Install the global subscriber. Best-effort: if the log file can't be
/// opened, logging is simply off.
pub fn init(logging: &LoggingConfig, data_dir: &Path, target: LogTarget) {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV)
        .try_from_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let Some(target) = sink(logging, target) else { return };
    if target == LogTarget::File {
        let _ = fs::create_dir_all(data_dir);
        let file = match OpenOptions::new().create(true).append(true).open(log_path(data_dir)) {
            Ok(f)  => f,
            Err(_) => return,
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_modes_log_to_stderr_by_default() {
        let logging = LoggingConfig::default();
        assert!(logging.file);
        assert_eq!(sink(&logging, LogTarget::Stderr), Some(LogTarget::Stderr));
        assert_eq!(sink(&logging, LogTarget::File), Some(LogTarget::File));
    }

    #[test]
    fn file_switch_only_affects_the_tui() {
        let logging = LoggingConfig { file: false, ..LoggingConfig::default() };
        assert_eq!(sink(&logging, LogTarget::File), None);
        assert_eq!(sink(&logging, LogTarget::Stderr), Some(LogTarget::Stderr));
    }
}
