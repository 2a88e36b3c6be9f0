//! Rolling Logger
//!
//! Installs a global tracing subscriber for an app shell:
//! - bridges `log` records so libraries can keep using the `log` facade
//! - writes every line to a size-rotated `<app_name>.log` file
//! - keeps the latest lines in memory for an in-app log viewer
//! - echoes to stderr

mod layer;
mod rolling_file;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use layer::{LogSink, RollingLayer};
pub use rolling_file::RollingFile;

/// Default rotation threshold for the log file
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
/// Default number of lines kept in memory
pub const DEFAULT_BUFFER_LINES: usize = 500;

static LOGGER: OnceLock<Logger> = OnceLock::new();

struct Logger {
    sink: Arc<LogSink>,
    file_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub max_file_bytes: u64,
    pub buffer_lines: usize,
    pub level: LevelFilter,
}

impl LoggerConfig {
    pub fn new(log_dir: PathBuf, app_name: &str) -> Self {
        Self {
            log_dir,
            app_name: app_name.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            buffer_lines: DEFAULT_BUFFER_LINES,
            level: LevelFilter::DEBUG,
        }
    }
}

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerConfig::new(log_dir, app_name))
}

/// Initialize the global logger. Can succeed only once per process.
pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = RollingFile::open(&config.log_dir, &config.app_name, config.max_file_bytes)?;
    let file_path = file.path();
    let sink = Arc::new(LogSink::new(config.buffer_lines, Some(file)));

    tracing_subscriber::registry()
        .with(config.level)
        .with(RollingLayer::new(sink.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    LOGGER
        .set(Logger { sink, file_path })
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!("{} logger started", config.app_name);
    Ok(())
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Latest buffered lines, oldest first. Empty before initialization.
pub fn recent_logs() -> Vec<String> {
    LOGGER.get().map(|l| l.sink.recent()).unwrap_or_default()
}

pub fn log_file_path() -> Option<PathBuf> {
    LOGGER.get().map(|l| l.file_path.clone())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}
