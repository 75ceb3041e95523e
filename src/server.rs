//!
//! HTTP server implementation for the VoiceMux unified agent gateway.
//!
//! Handles the unified agent-creation endpoint, validates incoming requests
//! against the normalized schema, and translates dispatcher errors into the
//! uniform HTTP error contract. Follows Dependency Inversion Principle by
//! depending on abstractions.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{GatewayError, Result};
use crate::model::AgentConfig;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application state containing all dependencies.
///
/// Follows Dependency Inversion Principle by depending on abstractions rather
/// than concrete implementations. Contains all services needed for request processing.
pub struct AppState {
    /** application configuration */
    pub config: Config,
    /** dispatcher for downstream provider calls */
    pub dispatcher: Dispatcher,
    /** metrics for monitoring */
    pub metrics: AppMetrics,
}

///
/// Application metrics for monitoring and observability.
///
/// Tracks various operational metrics for monitoring service health.
#[derive(Debug, Default)]
pub struct AppMetrics {
    /** total number of requests processed */
    pub total_requests: AtomicU64,
    /** total number of successful requests */
    pub successful_requests: AtomicU64,
    /** total number of failed requests */
    pub failed_requests: AtomicU64,
}

/* --- constants ------------------------------------------------------------------------------ */

/** the version as defined in cargo.toml */
const VERSION: &str = env!("CARGO_PKG_VERSION");

/** service name reported by the root endpoint */
const SERVICE_NAME: &str = "VoiceMux Unified Agent API";

/** service description reported by the root endpoint */
const SERVICE_DESCRIPTION: &str = "A unified API gateway for Vapi.ai and Retell agent services";

/* --- start of code -------------------------------------------------------------------------- */

impl AppState {
    ///
    /// Create new application state with all dependencies.
    ///
    /// Initializes the dispatcher (HTTP client and field mappers) needed for
    /// gateway operation.
    ///
    /// # Arguments
    ///  * `config` - application configuration
    ///
    /// # Returns
    ///  * Application state with initialized dependencies
    ///  * `GatewayError` if initialization fails
    pub fn new(config: Config) -> Result<Self> {
        let dispatcher = Dispatcher::new(config.clone())?;
        let metrics = AppMetrics::default();

        Ok(Self { config, dispatcher, metrics })
    }
}

///
/// Handle the unified agent-creation endpoint.
///
/// Validates the raw JSON body against the normalized schema, dispatches the
/// mapped payload to the targeted provider, and returns the provider's
/// created-agent JSON with an injected `provider` tag.
///
/// # Arguments
///  * `state` - shared application state
///  * `request` - raw agent configuration JSON
///
/// # Returns
///  * `201 Created` with the tagged provider response, or an error response
pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Value>,
) -> Response {
    state.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

    match process_create_agent(state.clone(), request).await {
        Ok(created) => {
            state.metrics.successful_requests.fetch_add(1, Ordering::Relaxed);
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => {
            state.metrics.failed_requests.fetch_add(1, Ordering::Relaxed);
            create_error_response(&e)
        }
    }
}

///
/// Process an agent-creation request end-to-end.
///
/// # Arguments
///  * `state` - shared application state
///  * `request` - raw JSON request
///
/// # Returns
///  * Tagged created-agent JSON on success
///  * `GatewayError` on failure
async fn process_create_agent(state: Arc<AppState>, request: Value) -> Result<Value> {
    let agent = parse_agent_config(request)?;

    tracing::debug!(
        "Agent creation request: name='{}' provider={} voice={}",
        agent.name,
        agent.provider,
        agent.voice.is_some()
    );

    state.dispatcher.create_agent(&agent).await
}

///
/// Parse and validate the unified agent configuration from a JSON value.
///
/// Missing `name` or `provider`, or enum values outside the supported sets,
/// are rejected here before any outbound call is made.
///
/// # Arguments
///  * `request` - raw JSON request
///
/// # Returns
///  * Parsed agent configuration
///  * `GatewayError::Validation` if the body fails schema validation
fn parse_agent_config(request: Value) -> Result<AgentConfig> {
    serde_json::from_value(request)
        .map_err(|e| GatewayError::Validation(format!("Invalid agent configuration: {}", e)))
}

///
/// Create an error response following the uniform error contract.
///
/// Validation failures are client errors (422); missing credentials are
/// configuration errors (500); non-2xx provider responses surface as 502 with
/// the downstream status carried in the body; transport failures collapse to
/// a fixed internal error (500).
///
/// # Arguments
///  * `error` - error to convert to HTTP response
///
/// # Returns
///  * HTTP error response with JSON error details
fn create_error_response(error: &GatewayError) -> Response {
    let (status_code, error_type) = match error {
        GatewayError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
        GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
        GatewayError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
        GatewayError::Transport(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    let mut error_response = json!({
      "detail": error.to_string(),
      "type": error_type,
      "code": status_code.as_u16()
    });

    if let GatewayError::Upstream { status, .. } = error {
        error_response["upstream_status"] = json!(status);
    }

    (status_code, Json(error_response)).into_response()
}

///
/// Handle the root informational endpoint.
///
/// Describes the service and its single agent-creation endpoint.
///
/// # Returns
///  * JSON response with service information
pub async fn root() -> Json<Value> {
    Json(json!({
      "name": SERVICE_NAME,
      "version": VERSION,
      "description": SERVICE_DESCRIPTION,
      "endpoints": {
        "create_agent": "/api/agents"
      }
    }))
}

///
/// Handle health check endpoint.
///
/// Returns a simple health status for service monitoring with basic metrics.
///
/// # Arguments
///  * `state` - shared application state with metrics
///
/// # Returns
///  * JSON response with health status and metrics
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let total_requests = state.metrics.total_requests.load(Ordering::Relaxed);
    let successful_requests = state.metrics.successful_requests.load(Ordering::Relaxed);
    let failed_requests = state.metrics.failed_requests.load(Ordering::Relaxed);

    Json(json!({
      "status": "ok",
      "metrics": {
        "total_requests": total_requests,
        "successful_requests": successful_requests,
        "failed_requests": failed_requests,
        "success_rate": if total_requests > 0 {
          (successful_requests as f64 / total_requests as f64 * 100.0).round()
        } else {
          100.0
        }
      }
    }))
}
