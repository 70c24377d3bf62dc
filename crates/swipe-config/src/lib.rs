//! Configuration and file management for pr-swipe
//!
//! This crate provides:
//! - File path utilities for config and log files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use app_config::{AppConfig, DeckConfig, GestureConfig, MergeStrategy};
pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir};
