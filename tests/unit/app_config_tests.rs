/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use dualsub::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.primary_language, "ja");
    assert_eq!(config.secondary_language, "en");
    assert_eq!(config.caption_service.endpoint, "http://localhost:8000");
    assert_eq!(config.caption_service.timeout_secs, 30);
    assert!(config.display.show_timestamps);
    assert!(config.display.show_player);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid primary language
    config.primary_language = "qqq".to_string();
    assert!(config.validate().is_err());
    config.primary_language = "ja".to_string();

    // Same language on both sides, in different code formats
    config.secondary_language = "jpn".to_string();
    assert!(config.validate().is_err());
    config.secondary_language = "en".to_string();

    // Endpoint must be an http(s) URL
    config.caption_service.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.caption_service.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.caption_service.endpoint = "https://captions.example.com/api".to_string();
    assert!(config.validate().is_ok());

    config.caption_service.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that 3-letter codes are turned into the keys the caption service uses
#[test]
fn test_caption_language_keys_withThreeLetterCodes_shouldUseTwoLetterKeys() -> Result<()> {
    let mut config = Config::default();
    config.primary_language = "jpn".to_string();
    config.secondary_language = "eng".to_string();

    assert!(config.validate().is_ok());
    assert_eq!(config.caption_language_keys()?, ("ja".to_string(), "en".to_string()));
    Ok(())
}

/// Test that a language the caption service cannot key is rejected
#[test]
fn test_config_validation_withoutTwoLetterCode_shouldFail() {
    let mut config = Config::default();
    config.primary_language = "haw".to_string();

    assert!(config.validate().is_err());
    assert!(config.caption_language_keys().is_err());
}

/// Test that a partial config file is filled in with defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"primary_language": "ko", "log_level": "debug"}"#)?;

    assert_eq!(config.primary_language, "ko");
    assert_eq!(config.secondary_language, "en");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(config.caption_service.timeout_secs, 30);
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.primary_language, "ja");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.caption_service.endpoint, config.caption_service.endpoint);
    Ok(())
}

/// Test that an existing config file is read as-is
#[test]
fn test_load_or_create_withExistingFile_shouldRead() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"primary_language": "es", "secondary_language": "en", "caption_service": {"endpoint": "http://10.0.0.2:9000"}}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.primary_language, "es");
    assert_eq!(config.caption_service.endpoint, "http://10.0.0.2:9000");
    assert_eq!(config.primary_language_name(), "Spanish");
    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ nope")?;

    let error = Config::load_or_create(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}
