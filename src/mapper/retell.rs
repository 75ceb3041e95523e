//!
//! Unified schema to Retell payload mapper.
//!
//! Converts the provider-agnostic agent configuration into the JSON shape
//! expected by the Retell agents API. Retell nests the LLM configuration under
//! an `llm` object and the voice identifier inside the `voice` block, and uses
//! its own spellings for voice-provider names.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde_json::{Map, Value, json};

use crate::config::LogLevel;
use crate::model::{AgentConfig, VoiceProvider};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Mapper from the unified schema to Retell's payload format.
///
/// Follows Single Responsibility Principle - handles only field mapping
/// for the Retell agents API.
pub struct RetellMapper {
    /** logging level for debug output */
    log_level: LogLevel,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Default LLM model when the request does not specify one */
const DEFAULT_RETELL_MODEL: &str = "gpt-3.5-turbo";

/** LLM provider Retell agents are backed by */
const DEFAULT_RETELL_LLM_PROVIDER: &str = "openai";

/** Voice-provider name remap table, total over [VoiceProvider] */
const RETELL_VOICE_PROVIDERS: &[(VoiceProvider, &str)] = &[
    (VoiceProvider::ElevenLabs, "elevenlabs"),
    (VoiceProvider::Deepgram, "deepgram"),
    (VoiceProvider::PlayHt, "playht"),
    (VoiceProvider::OpenAi, "openai"),
    (VoiceProvider::Retell, "retell"),
    (VoiceProvider::AwsPolly, "polly"),
    (VoiceProvider::Google, "google"),
];

/** Fallback voice provider when a variant has no table entry */
const RETELL_VOICE_PROVIDER_FALLBACK: &str = "elevenlabs";

/* --- start of code -------------------------------------------------------------------------- */

///
/// Remap a unified voice-provider name to Retell's expected spelling.
///
/// The table is total over the enumeration; the fallback only applies if a
/// future variant is added without a table entry.
///
/// # Arguments
///  * `provider` - unified voice provider
///
/// # Returns
///  * Retell's name for the provider
pub fn retell_voice_provider(provider: VoiceProvider) -> &'static str {
    RETELL_VOICE_PROVIDERS
        .iter()
        .find(|(p, _)| *p == provider)
        .map(|(_, name)| *name)
        .unwrap_or(RETELL_VOICE_PROVIDER_FALLBACK)
}

impl RetellMapper {
    ///
    /// Create a new Retell mapper.
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
    /// Map the unified agent configuration into the Retell payload.
    ///
    /// Emits `name`, a nested `llm` object (fixed provider plus the model with
    /// default), `system_prompt` (empty when absent) and `metadata` (empty
    /// object when absent). A voice block becomes a nested `voice` object with
    /// the remapped provider name, voice identifier, and optional settings.
    /// Optional fields and the `provider_specific` escape hatch are merged
    /// last.
    ///
    /// # Arguments
    ///  * `agent` - unified agent configuration
    ///
    /// # Returns
    ///  * Retell agents API payload
    pub fn map(&self, agent: &AgentConfig) -> Value {
        self.debug(&format!("Mapping agent '{}' to Retell payload", agent.name));

        let mut payload = Map::new();
        payload.insert("name".to_string(), Value::String(agent.name.clone()));
        payload.insert(
            "llm".to_string(),
            json!({
                "provider": DEFAULT_RETELL_LLM_PROVIDER,
                "model": agent.llm_model.clone().unwrap_or_else(|| DEFAULT_RETELL_MODEL.to_string()),
            }),
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
            let mut voice_obj = Map::new();
            voice_obj.insert(
                "provider".to_string(),
                Value::String(retell_voice_provider(voice.provider).to_string()),
            );
            voice_obj.insert("voice_id".to_string(), Value::String(voice.voice_id.clone()));
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
