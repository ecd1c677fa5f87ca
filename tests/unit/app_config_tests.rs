/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;

use tubetrans::app_config::{Config, ExecutionMode, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.endpoint, "http://localhost:5000");
    assert_eq!(config.translation.source_language, "auto");
    assert_eq!(config.translation.target_language, "es");
    assert_eq!(config.translation.chunk_size, 350);
    assert_eq!(config.translation.execution_mode, ExecutionMode::Parallel);
    assert_eq!(config.translation.concurrent_requests, 4);
    assert_eq!(config.translation.timeout(), Duration::from_secs(60));
    assert_eq!(config.translation.detect_timeout(), Duration::from_secs(10));
    assert_eq!(config.translation.retry_count, 3);
    assert_eq!(config.translation.retry_delay_ms, 2000);
    assert_eq!(config.transcript.cache_capacity, 100);
    assert_eq!(config.transcript.languages.first().map(String::as_str), Some("en"));
    assert_eq!(config.server.port, 5001);
    assert_eq!(config.log_level, LogLevel::Info);

    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.translation.chunk_size = 0;
    assert!(config.validate().is_err());
    config.translation.chunk_size = 350;

    config.translation.concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.concurrent_requests = 4;

    config.translation.retry_count = 0;
    assert!(config.validate().is_err());
    config.translation.retry_count = 11;
    assert!(config.validate().is_err());
    config.translation.retry_count = 3;

    config.translation.endpoint = "ftp://localhost".to_string();
    assert!(config.validate().is_err());
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.translation.endpoint = "https://translate.example.com".to_string();
    assert!(config.validate().is_ok());

    config.translation.target_language = "auto".to_string();
    assert!(config.validate().is_err());
    config.translation.target_language = "pt-BR".to_string();
    assert!(config.validate().is_ok());

    config.translation.retry_backoff_multiplier = 0.5;
    assert!(config.validate().is_err());
    config.translation.retry_backoff_multiplier = 1e9;
    assert!(config.validate().is_err());
    config.translation.retry_backoff_multiplier = f64::NAN;
    assert!(config.validate().is_err());
    config.translation.retry_backoff_multiplier = 2.0;

    config.transcript.cache_capacity = 0;
    assert!(config.validate().is_err());
    config.transcript.cache_capacity = 1;

    // Any available track is used when no language is preferred
    config.transcript.languages.clear();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_fromJson_withPartialFields_shouldFillDefaults() {
    let json = r#"{
        "translation": { "target_language": "fr", "execution_mode": "sequential" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.translation.target_language, "fr");
    assert_eq!(config.translation.execution_mode, ExecutionMode::Sequential);
    assert_eq!(config.translation.chunk_size, 350);
    assert_eq!(config.transcript.cache_capacity, 100);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_saveAndLoad_shouldPreserveValues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.target_language = "de".to_string();
    config.translation.chunk_size = 120;
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.translation.target_language, "de");
    assert_eq!(loaded.translation.chunk_size, 120);
}

#[test]
fn test_config_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    assert!(!path.exists());

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.translation.chunk_size, 350);
    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.translation.endpoint, config.translation.endpoint);
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_retryPolicy_shouldFollowConfig() {
    let mut config = Config::default();
    config.translation.retry_count = 4;
    config.translation.retry_delay_ms = 500;
    config.translation.retry_backoff_multiplier = 2.0;

    let policy = config.translation.retry_policy();

    assert_eq!(policy.max_attempts(), 4);
    assert_eq!(policy.delay_after(1), Some(Duration::from_millis(500)));
    assert_eq!(policy.delay_after(3), Some(Duration::from_millis(2000)));
    assert_eq!(policy.delay_after(4), None);
}

#[test]
fn test_effectiveConcurrency_inSequentialMode_shouldBeOne() {
    let mut config = Config::default();
    config.translation.concurrent_requests = 8;
    assert_eq!(config.translation.effective_concurrency(), 8);

    config.translation.execution_mode = ExecutionMode::Sequential;
    assert_eq!(config.translation.effective_concurrency(), 1);
}

#[test]
fn test_executionMode_fromStr_shouldParseCaseInsensitively() {
    assert_eq!("Parallel".parse::<ExecutionMode>().unwrap(), ExecutionMode::Parallel);
    assert_eq!("SEQUENTIAL".parse::<ExecutionMode>().unwrap(), ExecutionMode::Sequential);
    assert!("eventually".parse::<ExecutionMode>().is_err());
    assert_eq!(ExecutionMode::Sequential.to_string(), "sequential");
}
