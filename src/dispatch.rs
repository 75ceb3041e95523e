//!
//! Outbound dispatch to the downstream agent providers.
//!
//! Issues the single outbound HTTP POST per request with the correct bearer
//! credential and mapped payload, then normalizes both success and failure
//! shapes. Constructed explicitly from [Config] so request handling never
//! touches process-wide environment state.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::mapper::{RetellMapper, VapiMapper};
use crate::model::{AgentConfig, AgentProvider};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Dispatcher for downstream agent-creation calls.
///
/// Holds the shared HTTP client, the configuration (credentials and base
/// URLs), and both field mappers. One linear request->map->send->translate
/// pipeline per call; no retries, no intermediate states.
pub struct Dispatcher {
    /** application configuration with credentials and base URLs */
    config: Config,
    /** HTTP client for provider requests */
    http_client: Client,
    /** mapper to Vapi's payload format */
    vapi_mapper: VapiMapper,
    /** mapper to Retell's payload format */
    retell_mapper: RetellMapper,
}

/* --- constants ------------------------------------------------------------------------------ */

/** HTTP client timeout in seconds */
const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

/** Vapi agent-creation path under the base URL */
const VAPI_CREATE_PATH: &str = "/assistants";

/** Retell agent-creation path under the base URL */
const RETELL_CREATE_PATH: &str = "/agents";

/** Content type header for JSON requests */
const CONTENT_TYPE_JSON: &str = "application/json";

/** Authorization header name */
const AUTHORIZATION_HEADER: &str = "Authorization";

/** Bearer token prefix */
const BEARER_PREFIX: &str = "Bearer ";

/* --- start of code -------------------------------------------------------------------------- */

impl Dispatcher {
    ///
    /// Create a new dispatcher from configuration.
    ///
    /// Initializes the HTTP client and both field mappers.
    ///
    /// # Arguments
    ///  * `config` - application configuration
    ///
    /// # Returns
    ///  * Dispatcher ready for request handling
    ///  * `GatewayError::Http` if client creation fails
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Self::create_http_client()?;
        let vapi_mapper = VapiMapper::new(config.log_level);
        let retell_mapper = RetellMapper::new(config.log_level);

        Ok(Self { config, http_client, vapi_mapper, retell_mapper })
    }

    ///
    /// Create HTTP client with appropriate timeouts.
    ///
    /// # Returns
    ///  * Configured HTTP client
    ///  * `GatewayError::Http` if client creation fails
    fn create_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Http(format!("Failed to create HTTP client: {}", e)))
    }

    ///
    /// Create an agent on the provider named in the request.
    ///
    /// Both credentials are required up front, before any outbound call, so a
    /// misconfigured service fails the same way regardless of the targeted
    /// provider. On success the provider's JSON body is returned with an
    /// injected `provider` tag field.
    ///
    /// # Arguments
    ///  * `agent` - validated unified agent configuration
    ///
    /// # Returns
    ///  * Provider's created-agent JSON with `provider` tag
    ///  * `GatewayError::Config` if a credential is missing
    ///  * `GatewayError::Upstream` on a non-2xx provider response
    ///  * `GatewayError::Transport` if no response was received
    pub async fn create_agent(&self, agent: &AgentConfig) -> Result<Value> {
        let credentials = self.config.require_credentials()?;

        let (url, api_key, payload) = match agent.provider {
            AgentProvider::Vapi => (
                format!("{}{}", self.config.vapi_base_url, VAPI_CREATE_PATH),
                credentials.vapi,
                self.vapi_mapper.map(agent),
            ),
            AgentProvider::Retell => (
                format!("{}{}", self.config.retell_base_url, RETELL_CREATE_PATH),
                credentials.retell,
                self.retell_mapper.map(agent),
            ),
        };

        tracing::debug!("Creating {} agent '{}' at {}", agent.provider, agent.name, url);

        let response = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION_HEADER, format!("{}{}", BEARER_PREFIX, api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Transport(format!(
                    "{} API request failed: {}",
                    provider_label(agent.provider),
                    e
                ))
            })?;

        translate_response(agent.provider, response).await
    }
}

///
/// Normalize the provider response into the uniform result shape.
///
/// On 2xx the JSON body is returned with the `provider` tag injected. On any
/// other status the error message is extracted from the body and surfaced as
/// an upstream error carrying the original status code.
///
/// # Arguments
///  * `provider` - provider the request targeted
///  * `response` - HTTP response from the provider
///
/// # Returns
///  * Tagged created-agent JSON on success
///  * `GatewayError::Upstream` on a non-2xx status
async fn translate_response(provider: AgentProvider, response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        let detail = extract_error_message(&error_text);

        tracing::error!("{} API error ({}): {}", provider_label(provider), status, detail);

        return Err(GatewayError::Upstream {
            status: status.as_u16(),
            message: format!("{} API error: {}", provider_label(provider), detail),
        });
    }

    let mut body: Value = response.json().await.map_err(GatewayError::Request)?;
    inject_provider_tag(&mut body, provider);

    Ok(body)
}

///
/// Extract a human-readable message from a provider error body.
///
/// Providers usually return `{"message": "..."}`; fall back to the raw text
/// when the body is not JSON-shaped or has no message field.
///
/// # Arguments
///  * `body` - raw error response body
///
/// # Returns
///  * Extracted or raw error message
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

///
/// Inject the `provider` tag field into a created-agent response.
///
/// Non-object bodies are left untouched; the tag only makes sense on the
/// provider's created-agent object.
///
/// # Arguments
///  * `body` - provider response body to tag
///  * `provider` - provider the agent was created on
fn inject_provider_tag(body: &mut Value, provider: AgentProvider) {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("provider".to_string(), Value::String(provider.as_str().to_string()));
    }
}

///
/// Human-readable provider name for error messages.
fn provider_label(provider: AgentProvider) -> &'static str {
    match provider {
        AgentProvider::Vapi => "Vapi",
        AgentProvider::Retell => "Retell",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extract_error_message_json_body() {
        let body = r#"{"message": "bad voice id", "code": 400}"#;
        assert_eq!(extract_error_message(body), "bad voice id");
    }

    #[test]
    fn test_extract_error_message_json_without_message() {
        let body = r#"{"error": "nope"}"#;
        assert_eq!(extract_error_message(body), body);
    }

    #[test]
    fn test_extract_error_message_plain_text() {
        let body = "upstream exploded";
        assert_eq!(extract_error_message(body), "upstream exploded");
    }

    #[test]
    fn test_inject_provider_tag_object() {
        let mut body = json!({"id": "abc"});
        inject_provider_tag(&mut body, AgentProvider::Vapi);
        assert_eq!(body, json!({"id": "abc", "provider": "vapi"}));
    }

    #[test]
    fn test_inject_provider_tag_preserves_fields() {
        let mut body = json!({"id": "abc", "name": "Test Agent", "nested": {"a": 1}});
        inject_provider_tag(&mut body, AgentProvider::Retell);
        assert_eq!(body["provider"], json!("retell"));
        assert_eq!(body["id"], json!("abc"));
        assert_eq!(body["nested"]["a"], json!(1));
    }

    #[test]
    fn test_inject_provider_tag_non_object() {
        let mut body = json!(["not", "an", "object"]);
        inject_provider_tag(&mut body, AgentProvider::Vapi);
        assert_eq!(body, json!(["not", "an", "object"]));
    }
}
