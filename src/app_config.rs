use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::warn;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Primary track language code (ISO)
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Secondary track language code (ISO)
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,

    /// Caption service config
    #[serde(default)]
    pub caption_service: CaptionServiceConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption service connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptionServiceConfig {
    /// Service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptionServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// How merged lines are rendered
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Prefix each line with its `m:ss` start time
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Print the player embed URL before the lines
    #[serde(default = "default_true")]
    pub show_player: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            show_player: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_primary_language() -> String {
    "ja".to_string()
}

fn default_secondary_language() -> String {
    "en".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {

    /// Load the configuration at `path`, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages; tracks are looked up by their 2-letter code
        self.caption_language_keys()?;

        if crate::language_utils::language_codes_match(&self.primary_language, &self.secondary_language) {
            return Err(anyhow!(
                "Primary and secondary language must differ (both are '{}')",
                self.primary_language
            ));
        }

        let endpoint = url::Url::parse(&self.caption_service.endpoint)
            .context(format!("Invalid caption service endpoint: {}", self.caption_service.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!("Caption service endpoint must be http or https: {}", endpoint));
        }

        if self.caption_service.timeout_secs == 0 {
            return Err(anyhow!("Caption service timeout must be at least one second"));
        }

        Ok(())
    }

    /// Caption service keys of the primary and secondary tracks
    pub fn caption_language_keys(&self) -> Result<(String, String)> {
        let primary = crate::language_utils::normalize_to_part1(&self.primary_language)
            .context("Invalid primary language")?;
        let secondary = crate::language_utils::normalize_to_part1(&self.secondary_language)
            .context("Invalid secondary language")?;
        Ok((primary, secondary))
    }

    /// Display name of the primary language, falling back to the code
    pub fn primary_language_name(&self) -> String {
        crate::language_utils::get_language_name(&self.primary_language)
            .unwrap_or_else(|_| self.primary_language.clone())
    }

    /// Display name of the secondary language, falling back to the code
    pub fn secondary_language_name(&self) -> String {
        crate::language_utils::get_language_name(&self.secondary_language)
            .unwrap_or_else(|_| self.secondary_language.clone())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            primary_language: default_primary_language(),
            secondary_language: default_secondary_language(),
            caption_service: CaptionServiceConfig::default(),
            display: DisplayConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
