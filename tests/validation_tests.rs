//! Validation tests for VoiceMux configuration validation

use voicemux::config::{Config, LogLevel, ValidationSeverity};

fn gateway_config(
    vapi_api_key: Option<&str>,
    retell_api_key: Option<&str>,
    vapi_base_url: &str,
    retell_base_url: &str,
    port: u16,
) -> Config {
    Config {
        vapi_api_key: vapi_api_key.map(str::to_string),
        retell_api_key: retell_api_key.map(str::to_string),
        vapi_base_url: vapi_base_url.to_string(),
        retell_base_url: retell_base_url.to_string(),
        port,
        log_level: LogLevel::Info,
    }
}

/// Test that validation passes for a fully-configured gateway
#[test]
fn test_validation_clean_config() {
    let config = gateway_config(
        Some("test-vapi-key"),
        Some("test-retell-key"),
        "https://api.vapi.ai",
        "https://api.retellai.com",
        3000,
    );

    let issues = config.validate();
    assert!(issues.is_empty(), "Fully-configured gateway should have no issues: {:?}", issues);
}

/// Test that validation detects a missing Vapi API key
#[test]
fn test_validation_missing_vapi_key() {
    let config = gateway_config(
        None,
        Some("test-retell-key"),
        "https://api.vapi.ai",
        "https://api.retellai.com",
        3000,
    );

    let issues = config.validate();
    assert!(
        issues
            .iter()
            .any(|i| i.field == "VAPI_API_KEY" && i.severity == ValidationSeverity::Error),
        "Should detect missing Vapi API key"
    );
}

/// Test that validation detects a missing Retell API key
#[test]
fn test_validation_missing_retell_key() {
    let config = gateway_config(
        Some("test-vapi-key"),
        None,
        "https://api.vapi.ai",
        "https://api.retellai.com",
        3000,
    );

    let issues = config.validate();
    assert!(
        issues
            .iter()
            .any(|i| i.field == "RETELL_API_KEY" && i.severity == ValidationSeverity::Error),
        "Should detect missing Retell API key"
    );
}

/// Test that validation reports both missing keys at once
#[test]
fn test_validation_both_keys_missing() {
    let config =
        gateway_config(None, None, "https://api.vapi.ai", "https://api.retellai.com", 3000);

    let issues = config.validate();
    let errors: Vec<_> =
        issues.iter().filter(|i| i.severity == ValidationSeverity::Error).collect();
    assert_eq!(errors.len(), 2, "Both missing keys should be reported: {:?}", issues);
}

/// Test that validation warns about non-HTTPS base URLs
#[test]
fn test_validation_http_base_url_warning() {
    let config = gateway_config(
        Some("test-vapi-key"),
        Some("test-retell-key"),
        "http://127.0.0.1:9001",
        "https://api.retellai.com",
        3000,
    );

    let issues = config.validate();
    assert!(
        issues
            .iter()
            .any(|i| i.field == "VAPI_BASE_URL" && i.severity == ValidationSeverity::Warning),
        "Should warn about HTTP base URL"
    );
}

/// Test that validation detects invalid port
#[test]
fn test_validation_invalid_port() {
    let config = gateway_config(
        Some("test-vapi-key"),
        Some("test-retell-key"),
        "https://api.vapi.ai",
        "https://api.retellai.com",
        0,
    );

    let issues = config.validate();
    assert!(
        issues.iter().any(|i| i.field == "PORT" && i.severity == ValidationSeverity::Error),
        "Should detect port 0 as invalid"
    );
}
