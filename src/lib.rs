//! # VoiceMux - Unified Voice Agent Gateway Library
//!
//! This crate provides a unified HTTP endpoint for creating voice AI agents,
//! translating one normalized request schema into the distinct payload formats
//! required by Vapi.ai and Retell. While primarily designed as a binary
//! application, this library exposes its core functionality for programmatic use.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use voicemux::{Config, create_app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = Config::from_env()?;
//!
//!     // Create the application
//!     let app = create_app(config)?;
//!
//!     // Start server
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration management and environment variable handling
//! - [`model`] - Unified agent configuration schema ([`model::AgentConfig`])
//! - [`mapper`] - Field mapping from the unified schema to provider payloads
//! - [`dispatch`] - Outbound provider calls and response normalization
//! - [`server`] - HTTP server setup and route handlers
//! - [`error`] - Error types and handling

pub mod config;
pub mod dispatch;
pub mod error;
pub mod mapper;
pub mod model;
pub mod server;

// Re-export commonly used types
pub use config::{Config, ValidationIssue, ValidationSeverity};
pub use error::GatewayError;

/// Creates a new VoiceMux application with the given configuration.
///
/// This is a convenience function that sets up the full application stack
/// including the dispatcher, routing, and middleware.
///
/// # Arguments
///
/// * `config` - Application configuration
///
/// # Returns
///
/// Returns an Axum Router that can be served directly.
///
/// # Errors
///
/// Returns a `GatewayError` if dispatcher setup fails or other
/// initialization issues occur.
///
/// # Examples
///
/// ```rust,no_run
/// use voicemux::{Config, create_app};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let app = create_app(config)?;
///
///     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
pub fn create_app(config: Config) -> Result<axum::Router, GatewayError> {
    use axum::Router;
    use axum::routing::{get, post};
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    let app_state = Arc::new(server::AppState::new(config)?);

    Ok(Router::new()
        .route("/api/agents", post(server::create_agent))
        .route("/", get(server::root))
        .route("/health", get(server::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
