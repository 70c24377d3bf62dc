//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/pr-swipe/ on Linux)
//!
//! The terminal is owned by the deck view, so nothing is logged to stderr.

use anyhow::Context;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("pr-swipe-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        swipe_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Map a `RUST_LOG` value to a level
///
/// Unset means debug; an unrecognised value means info.
fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.to_lowercase()) {
        Some(v) => match v.as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Debug,
    }
}

/// Initialize file-based logging
///
/// Returns the path of the log file.
pub fn init() -> anyhow::Result<PathBuf> {
    let log_file = log_file_path();
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}
