//!
//! Field mapping modules for the unified agent configuration schema.
//!
//! Pure transforms from [crate::model::AgentConfig] into each downstream
//! provider's expected JSON shape. Each mapper follows Single Responsibility
//! Principle and focuses on a single provider payload format.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod retell;
pub mod vapi;

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::{Map, Value};

use crate::model::AgentConfig;

/* --- start of code -------------------------------------------------------------------------- */

pub use retell::RetellMapper;
pub use vapi::VapiMapper;

///
/// Apply the optional fields shared by both provider payloads.
///
/// Adds `webhook_url` and `description` when present, then merges all
/// `provider_specific` entries verbatim. Keys already produced by the mapper
/// are overwritten (last-write-wins): `provider_specific` is the escape hatch
/// for fields the unified schema does not model.
///
/// # Arguments
///  * `payload` - payload under construction
///  * `agent` - unified agent configuration
pub(crate) fn apply_optional_fields(payload: &mut Map<String, Value>, agent: &AgentConfig) {
    if let Some(webhook_url) = &agent.webhook_url {
        payload.insert("webhook_url".to_string(), Value::String(webhook_url.clone()));
    }

    if let Some(description) = &agent.description {
        payload.insert("description".to_string(), Value::String(description.clone()));
    }

    if let Some(extra) = &agent.provider_specific {
        for (key, value) in extra {
            payload.insert(key.clone(), value.clone());
        }
    }
}
