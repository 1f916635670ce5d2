use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable holding a tracing filter, e.g. `SHOP_LOG=shoplist=debug`
pub const LOG_ENV: &str = "SHOP_LOG";

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Log to stderr. Used by the non-interactive commands.
pub fn init_stderr(config: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Log to the configured file, if any. The TUI owns the terminal, so
/// without a file nothing is logged.
pub fn init_file(config: &LogConfig, base_dir: &Path) -> io::Result<()> {
    let Some(path) = config.log_file_path(base_dir) else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

impl LogConfig {
    /// Log file path, relative paths resolved against `base_dir`
    pub fn log_file_path(&self, base_dir: &Path) -> Option<std::path::PathBuf> {
        self.file.as_ref().map(|f| base_dir.join(f))
    }
}
