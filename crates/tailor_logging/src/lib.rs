#![deny(missing_docs)]
//! Shared logging utilities for the resume tailor workspace.
//!
//! Every crate logs through the `tailor_*` macros; the terminal front end
//! picks the destination once at startup.

use std::fs::File;
use std::path::Path;

pub use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// `log::debug!` under the workspace name.
#[macro_export]
macro_rules! tailor_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// `log::info!` under the workspace name.
#[macro_export]
macro_rules! tailor_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// `log::warn!` under the workspace name.
#[macro_export]
macro_rules! tailor_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// `log::error!` under the workspace name.
#[macro_export]
macro_rules! tailor_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination<'a> {
    /// Write to the given file, truncating it.
    File(&'a Path),
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both the file and the terminal.
    Both(&'a Path),
}

/// Parses a level name such as `info` or `DEBUG`.
///
/// Unknown names yield `None` so the caller can pick its own default.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initializes the global logger.
///
/// A file that cannot be created is reported on stderr and skipped; the
/// remaining loggers are still installed. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination<'_>, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )],
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Terminal logger at debug level for integration tests.
///
/// Later calls, or a logger installed elsewhere, leave the first one in place.
pub fn initialize_for_tests() {
    initialize(LogDestination::Terminal, LevelFilter::Debug);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
