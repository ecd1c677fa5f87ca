use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::language_utils;
use crate::translation::retry::RetryPolicy;

/// Upper bound on attempts per chunk
pub const MAX_RETRY_COUNT: u32 = 10;

/// Upper bound on the retry delay growth factor
pub const MAX_RETRY_BACKOFF_MULTIPLIER: f64 = 10.0;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation endpoint and pipeline settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Transcript fetching and caching settings
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How chunks are dispatched to the translation endpoint
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Several chunks in flight at once
    #[default]
    Parallel,
    /// One chunk at a time, for capacity-constrained translators
    Sequential,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parallel => write!(f, "parallel"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "parallel" => Ok(Self::Parallel),
            "sequential" => Ok(Self::Sequential),
            _ => Err(anyhow!("Invalid execution mode: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Base URL of the LibreTranslate-compatible service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent with every request when non-empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Source language code, or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Parallel or sequential chunk dispatch
    #[serde(default)]
    pub execution_mode: ExecutionMode,

    /// Maximum chunks in flight in parallel mode
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Per-request timeout for translation calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Per-request timeout for language detection
    #[serde(default = "default_detect_timeout_secs")]
    pub detect_timeout_secs: u64,

    /// Total attempts per chunk before falling back to the original text
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Growth factor applied to the delay after each failed attempt.
    /// 1.0 keeps the delay fixed.
    #[serde(default = "default_retry_backoff_multiplier")]
    pub retry_backoff_multiplier: f64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunk_size: default_chunk_size(),
            execution_mode: ExecutionMode::default(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
            detect_timeout_secs: default_detect_timeout_secs(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            retry_backoff_multiplier: default_retry_backoff_multiplier(),
        }
    }
}

impl TranslationConfig {
    /// Retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_count, Duration::from_millis(self.retry_delay_ms))
            .with_backoff_multiplier(self.retry_backoff_multiplier)
    }

    /// Request timeout for translation calls
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Request timeout for language detection
    pub fn detect_timeout(&self) -> Duration {
        Duration::from_secs(self.detect_timeout_secs)
    }

    /// Effective number of chunks in flight for the configured mode
    pub fn effective_concurrency(&self) -> usize {
        match self.execution_mode {
            ExecutionMode::Parallel => self.concurrent_requests.max(1),
            ExecutionMode::Sequential => 1,
        }
    }
}

/// Transcript source and cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptConfig {
    /// Preferred caption languages, tried in order before any other track the video has
    #[serde(default = "default_transcript_languages")]
    pub languages: Vec<String>,

    /// Maximum number of transcripts kept in memory
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            languages: default_transcript_languages(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
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
    /// Matching filter for the `log` facade
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

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_chunk_size() -> usize {
    350
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_detect_timeout_secs() -> u64 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_retry_backoff_multiplier() -> f64 {
    1.0
}

fn default_transcript_languages() -> Vec<String> {
    ["en", "es", "fr", "de", "pt", "it", "hi", "ja", "ko", "ru", "ar", "zh-Hans"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_cache_capacity() -> usize {
    100
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, content)
            .context(format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Load the file at `path`, or create it with defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save_to_file(path)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let translation = &self.translation;

        let endpoint = Url::parse(&translation.endpoint)
            .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", translation.endpoint, e))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("Translation endpoint must use http or https: {}", translation.endpoint));
        }

        language_utils::validate_translation_code(&translation.source_language, true)?;
        language_utils::validate_translation_code(&translation.target_language, false)?;

        if translation.chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than zero"));
        }
        if translation.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be greater than zero"));
        }
        if translation.retry_count == 0 || translation.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!("retry_count must be between 1 and {}", MAX_RETRY_COUNT));
        }
        if translation.timeout_secs == 0 || translation.detect_timeout_secs == 0 {
            return Err(anyhow!("Request timeouts must be greater than zero"));
        }
        if !(1.0..=MAX_RETRY_BACKOFF_MULTIPLIER).contains(&translation.retry_backoff_multiplier) {
            return Err(anyhow!(
                "retry_backoff_multiplier must be between 1.0 and {}",
                MAX_RETRY_BACKOFF_MULTIPLIER
            ));
        }

        if self.transcript.cache_capacity == 0 {
            return Err(anyhow!("cache_capacity must be greater than zero"));
        }

        Ok(())
    }
}
