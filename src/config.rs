//!
//! Configuration management for the VoiceMux unified agent gateway.
//!
//! Handles loading configuration from environment variables with sensible defaults.
//! Follows Single Responsibility Principle - manages all configuration concerns.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::env;

use crate::error::{GatewayError, Result};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application configuration structure.
///
/// Constructed explicitly and passed into the dispatcher at creation time, so
/// request handling never reads process-wide environment state. Credentials are
/// optional at load time: a missing key does not abort startup but fails every
/// request with a configuration error until it is set.
#[derive(Debug, Clone)]
pub struct Config {
    /** Vapi.ai API key, from VAPI_API_KEY */
    pub vapi_api_key: Option<String>,
    /** Retell API key, from RETELL_API_KEY */
    pub retell_api_key: Option<String>,
    /** Vapi API base URL, overridable for testing */
    pub vapi_base_url: String,
    /** Retell API base URL, overridable for testing */
    pub retell_base_url: String,
    /** HTTP server port number */
    pub port: u16,
    /** application logging level */
    pub log_level: LogLevel,
}

///
/// Bearer credentials for both downstream providers.
///
/// Borrowed from [Config] once per request; both keys must be present even when
/// the request targets only one provider (the service is considered
/// misconfigured if either is absent).
#[derive(Debug, Clone, Copy)]
pub struct ProviderCredentials<'a> {
    /** Vapi.ai bearer credential */
    pub vapi: &'a str,
    /** Retell bearer credential */
    pub retell: &'a str,
}

///
/// Logging level enumeration.
///
/// Defines available log levels with helper methods for level checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Default Vapi API base URL */
const DEFAULT_VAPI_BASE_URL: &str = "https://api.vapi.ai";

/** Default Retell API base URL */
const DEFAULT_RETELL_BASE_URL: &str = "https://api.retellai.com";

/** Default HTTP server port */
const DEFAULT_PORT: &str = "3000";

/* --- start of code -------------------------------------------------------------------------- */

impl LogLevel {
    ///
    /// Check if trace-level logging is enabled.
    ///
    /// Returns true for Trace and Debug levels, which enable detailed logging
    /// of payload mapping and provider interactions.
    ///
    /// # Returns
    ///  * `true` if trace logging should be enabled
    ///  * `false` otherwise
    pub fn is_trace_enabled(self) -> bool {
        matches!(self, LogLevel::Trace | LogLevel::Debug)
    }
}

impl From<&str> for LogLevel {
    ///
    /// Convert string representation to LogLevel enum.
    ///
    /// Case-insensitive conversion with Info as the default fallback.
    ///
    /// # Arguments
    ///  * `s` - string representation of log level
    ///
    /// # Returns
    ///  * Corresponding LogLevel enum value
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl Config {
    ///
    /// Load configuration from environment variables.
    ///
    /// Attempts to load .env file if present, then reads configuration from
    /// environment variables with sensible defaults. Missing API keys are not
    /// an error here; they are reported by [Config::validate] and rejected per
    /// request by [Config::require_credentials].
    ///
    /// # Returns
    ///  * Configuration object with all settings loaded
    ///  * `GatewayError::Config` if a value is present but invalid
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let vapi_api_key = Self::get_optional("VAPI_API_KEY");
        let retell_api_key = Self::get_optional("RETELL_API_KEY");
        let vapi_base_url = Self::get_base_url("VAPI_BASE_URL", DEFAULT_VAPI_BASE_URL);
        let retell_base_url = Self::get_base_url("RETELL_BASE_URL", DEFAULT_RETELL_BASE_URL);
        let port = Self::get_port()?;
        let log_level = Self::get_log_level();

        Ok(Config {
            vapi_api_key,
            retell_api_key,
            vapi_base_url,
            retell_base_url,
            port,
            log_level,
        })
    }

    ///
    /// Borrow both provider credentials, or fail with a configuration error.
    ///
    /// Absence of either key fails the request regardless of which provider it
    /// targets. This check happens before any outbound call is made.
    ///
    /// # Returns
    ///  * Both bearer credentials on success
    ///  * `GatewayError::Config` naming the missing variable
    pub fn require_credentials(&self) -> Result<ProviderCredentials<'_>> {
        let vapi = self.vapi_api_key.as_deref().ok_or_else(|| {
            GatewayError::Config(
                "VAPI_API_KEY not configured in environment.\n\
                 \n\
                 To fix this:\n\
                   1. Get your API key from the Vapi dashboard\n\
                   2. Set the environment variable:\n\
                      export VAPI_API_KEY=\"your-key\"\n\
                   3. Or add it to a .env file\n\
                 \n\
                 Run 'voicemux doctor' for more help."
                    .to_string(),
            )
        })?;

        let retell = self.retell_api_key.as_deref().ok_or_else(|| {
            GatewayError::Config(
                "RETELL_API_KEY not configured in environment.\n\
                 \n\
                 To fix this:\n\
                   1. Get your API key from the Retell dashboard\n\
                   2. Set the environment variable:\n\
                      export RETELL_API_KEY=\"your-key\"\n\
                   3. Or add it to a .env file\n\
                 \n\
                 Run 'voicemux doctor' for more help."
                    .to_string(),
            )
        })?;

        Ok(ProviderCredentials { vapi, retell })
    }

    ///
    /// Read an optional environment variable, treating empty values as unset.
    fn get_optional(name: &str) -> Option<String> {
        env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    ///
    /// Read a provider base URL override or fall back to the default.
    ///
    /// Trailing slashes are stripped so path joining stays predictable.
    fn get_base_url(name: &str, default: &str) -> String {
        Self::get_optional(name)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| default.to_string())
    }

    ///
    /// Get the server port from environment or use default.
    ///
    /// # Returns
    ///  * Port number as u16
    ///  * `GatewayError::Config` if port value is invalid
    fn get_port() -> Result<u16> {
        env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| {
                GatewayError::Config(format!(
                    "Invalid PORT value: {}\n\
                     \n\
                     PORT must be a number between 1 and 65535.\n\
                        Example: export PORT=3000\n\
                     \n\
                     Run 'voicemux doctor' for more help.",
                    e
                ))
            })
    }

    ///
    /// Get the log level from environment or use default.
    ///
    /// # Returns
    ///  * LogLevel enum value
    fn get_log_level() -> LogLevel {
        let log_level_str = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        LogLevel::from(log_level_str.as_str())
    }

    ///
    /// Validate configuration and return detailed validation results.
    ///
    /// Checks all configuration values for correctness and provides helpful
    /// suggestions for any issues found.
    ///
    /// # Returns
    ///  * Vector of validation issues (empty if all valid)
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.vapi_api_key.is_none() {
            issues.push(ValidationIssue {
                field: "VAPI_API_KEY".to_string(),
                severity: ValidationSeverity::Error,
                message: "Vapi API key is not set".to_string(),
                suggestion: Some("Set VAPI_API_KEY or add it to a .env file".to_string()),
            });
        }

        if self.retell_api_key.is_none() {
            issues.push(ValidationIssue {
                field: "RETELL_API_KEY".to_string(),
                severity: ValidationSeverity::Error,
                message: "Retell API key is not set".to_string(),
                suggestion: Some("Set RETELL_API_KEY or add it to a .env file".to_string()),
            });
        }

        for (field, url) in [
            ("VAPI_BASE_URL", &self.vapi_base_url),
            ("RETELL_BASE_URL", &self.retell_base_url),
        ] {
            if !url.starts_with("https://") {
                issues.push(ValidationIssue {
                    field: field.to_string(),
                    severity: ValidationSeverity::Warning,
                    message: format!("Provider base URL should use HTTPS: {}", url),
                    suggestion: Some("Use https:// for secure connections".to_string()),
                });
            }
        }

        // Validate port range
        // Note: port is u16, so max value is 65535 (enforced by type system)
        if self.port == 0 {
            issues.push(ValidationIssue {
                field: "PORT".to_string(),
                severity: ValidationSeverity::Error,
                message: "Port cannot be 0".to_string(),
                suggestion: Some("Use a valid port number between 1 and 65535".to_string()),
            });
        }

        issues
    }
}

///
/// Configuration validation issue.
///
/// Represents a single validation problem found during configuration check.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Configuration field name
    pub field: String,
    /// Severity of the issue
    pub severity: ValidationSeverity,
    /// Description of the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

///
/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid and will cause failures
    Error,
    /// Warning - configuration may work but has potential issues
    Warning,
    /// Info - informational note about configuration
    Info,
}
