//! Application configuration
//!
//! Configuration loaded from .pr-swipe.toml file.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .pr-swipe.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Where to load reviewable pull requests from: "all" or "owner/repo"
    #[serde(default = "default_source")]
    pub source: String,

    /// GitHub host (None = github.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// How swiped-right pull requests are merged
    #[serde(default)]
    pub merge_method: MergeStrategy,

    /// Seconds an error message stays visible before it clears itself
    #[serde(default = "default_error_display_secs")]
    pub error_display_secs: u64,

    /// Upper bound for a single remote call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Drag thresholds
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Deck layout
    #[serde(default)]
    pub deck: DeckConfig,
}

/// Merge method applied on a positive swipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    Merge,
    #[default]
    Squash,
    Rebase,
}

/// Thresholds that turn a drag into a disposition
///
/// Units follow whatever coordinate space the front end reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    #[serde(default = "default_offset_threshold")]
    pub offset_threshold: f64,
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f64,
}

/// Deck composition parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    /// Maximum reviewable items per filler group
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// Number of cards exposed to the front end
    #[serde(default = "default_visible_cards")]
    pub visible_cards: usize,
}

fn default_source() -> String {
    "all".to_string()
}

fn default_error_display_secs() -> u64 {
    4
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_offset_threshold() -> f64 {
    120.0
}

fn default_velocity_threshold() -> f64 {
    500.0
}

fn default_group_size() -> usize {
    10
}

fn default_visible_cards() -> usize {
    3
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            offset_threshold: default_offset_threshold(),
            velocity_threshold: default_velocity_threshold(),
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            visible_cards: default_visible_cards(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            host: None,
            merge_method: MergeStrategy::default(),
            error_display_secs: default_error_display_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            gesture: GestureConfig::default(),
            deck: DeckConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse and sanity-check a config document
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        if config.deck.group_size == 0 {
            anyhow::bail!("deck.group_size must be at least 1");
        }
        if config.deck.visible_cards == 0 {
            anyhow::bail!("deck.visible_cards must be at least 1");
        }
        for (name, value) in [
            ("gesture.offset_threshold", config.gesture.offset_threshold),
            ("gesture.velocity_threshold", config.gesture.velocity_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a finite, non-negative number", name);
            }
        }
        if config.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(config)
    }

    /// Configured host, or github.com
    pub fn effective_host(&self) -> &str {
        match self.host.as_deref() {
            Some(host) if !host.is_empty() => host,
            _ => crate::DEFAULT_HOST,
        }
    }

    /// The repository named by `source`, or None for "all"
    pub fn repository_source(&self) -> Option<&str> {
        let source = self.source.trim();
        if source.is_empty() || source.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(source)
        }
    }
}
