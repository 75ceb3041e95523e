//!
//! Unified schema to Vapi.ai payload mapper.
//!
//! Converts the provider-agnostic agent configuration into the JSON shape
//! expected by the Vapi assistants API, including the voice-provider name
//! remap table. The transform is pure; no I/O happens here.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::{Map, Value};

use crate::config::LogLevel;
use crate::model::{AgentConfig, VoiceProvider};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Mapper from the unified schema to Vapi's payload format.
///
/// Follows Single Responsibility Principle - handles only field mapping
/// for the Vapi assistants API.
pub struct VapiMapper {
    /** logging level for debug output */
    log_level: LogLevel,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Default LLM model when the request does not specify one */
const DEFAULT_VAPI_MODEL: &str = "gpt-3.5-turbo-0125";

/** Voice-provider name remap table, total over [VoiceProvider] */
const VAPI_VOICE_PROVIDERS: &[(VoiceProvider, &str)] = &[
    (VoiceProvider::ElevenLabs, "eleven_labs"),
    (VoiceProvider::Deepgram, "deepgram"),
    (VoiceProvider::PlayHt, "play_ht"),
    (VoiceProvider::OpenAi, "open_ai"),
    (VoiceProvider::Retell, "retell"),
    (VoiceProvider::AwsPolly, "aws_polly"),
    (VoiceProvider::Google, "google"),
];

/** Fallback voice provider when a variant has no table entry */
const VAPI_VOICE_PROVIDER_FALLBACK: &str = "eleven_labs";

/* --- start of code -------------------------------------------------------------------------- */

///
/// Remap a unified voice-provider name to Vapi's expected spelling.
///
/// The table is total over the enumeration; the fallback only applies if a
/// future variant is added without a table entry.
///
/// # Arguments
///  * `provider` - unified voice provider
///
/// # Returns
///  * Vapi's name for the provider
pub fn vapi_voice_provider(provider: VoiceProvider) -> &'static str {
    VAPI_VOICE_PROVIDERS
        .iter()
        .find(|(p, _)| *p == provider)
        .map(|(_, name)| *name)
        .unwrap_or(VAPI_VOICE_PROVIDER_FALLBACK)
}

impl VapiMapper {
    ///
    /// Create a new Vapi mapper.
    ///
    /// # Arguments
    ///  * `log_level` - logging level for debug output
    ///
    /// # Returns
    ///  * New mapper instance
    pub fn new(log_level: LogLevel) -> Self {
        Self { log_level }
    }

    ///
    /// Map the unified agent configuration into the Vapi payload.
    ///
    /// Emits `name`, `model` (with default), `system_prompt` (empty when
    /// absent) and `metadata` (empty object when absent). A voice block adds a
    /// top-level `voice_id` plus a nested `voice` object with the remapped
    /// provider name and optional settings. Optional fields and the
    /// `provider_specific` escape hatch are merged last.
    ///
    /// # Arguments
    ///  * `agent` - unified agent configuration
    ///
    /// # Returns
    ///  * Vapi assistants API payload
    pub fn map(&self, agent: &AgentConfig) -> Value {
        self.debug(&format!("Mapping agent '{}' to Vapi payload", agent.name));

        let mut payload = Map::new();
        payload.insert("name".to_string(), Value::String(agent.name.clone()));
        payload.insert(
            "model".to_string(),
            Value::String(
                agent.llm_model.clone().unwrap_or_else(|| DEFAULT_VAPI_MODEL.to_string()),
            ),
        );
        payload.insert(
            "system_prompt".to_string(),
            Value::String(agent.system_prompt.clone().unwrap_or_default()),
        );
        payload.insert(
            "metadata".to_string(),
            Value::Object(agent.metadata.clone().unwrap_or_default()),
        );

        if let Some(voice) = &agent.voice {
            payload.insert("voice_id".to_string(), Value::String(voice.voice_id.clone()));

            let mut voice_obj = Map::new();
            voice_obj.insert(
                "provider".to_string(),
                Value::String(vapi_voice_provider(voice.provider).to_string()),
            );
            if let Some(settings) = &voice.settings {
                voice_obj.insert("settings".to_string(), Value::Object(settings.clone()));
            }
            payload.insert("voice".to_string(), Value::Object(voice_obj));
        }

        super::apply_optional_fields(&mut payload, agent);

        Value::Object(payload)
    }

    ///
    /// Log debug message if trace logging is enabled.
    ///
    /// # Arguments
    ///  * `msg` - debug message to log
    pub(crate) fn debug(&self, msg: &str) {
        if self.log_level.is_trace_enabled() {
            tracing::debug!("[TRACE] {}", msg);
        }
    }
}
