//!
//! Unified agent configuration schema accepted by the gateway.
//!
//! Provider-agnostic request types deserialized from the inbound JSON body.
//! Enum fields double as validation: an out-of-set `provider` or
//! `voice.provider` value fails deserialization before any outbound call.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Supported downstream voice-agent platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentProvider {
    /** Vapi.ai assistants API */
    Vapi,
    /** Retell agents API */
    Retell,
}

///
/// Speech-synthesis vendors referenced inside a [Voice] block.
///
/// Independent of the agent provider; each downstream platform expects its own
/// spelling of these names, handled by the mapper remap tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceProvider {
    ElevenLabs,
    Deepgram,
    PlayHt,
    OpenAi,
    Retell,
    AwsPolly,
    Google,
}

///
/// Voice configuration block within an agent request.
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    /** speech-synthesis vendor */
    pub provider: VoiceProvider,
    /** vendor-specific voice identifier */
    pub voice_id: String,
    /** vendor-specific settings, passed through unvalidated */
    pub settings: Option<Map<String, Value>>,
}

///
/// Unified agent configuration request.
///
/// One normalized schema for both downstream providers. `name` and `provider`
/// are required; everything else is optional with defaults applied during
/// mapping. `provider_specific` is an escape hatch merged verbatim into the
/// outgoing payload, overwriting mapper-generated keys on collision.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /** agent display name */
    pub name: String,
    /** optional agent description */
    pub description: Option<String>,
    /** LLM model identifier; provider-specific default applied when absent */
    pub llm_model: Option<String>,
    /** system prompt for the agent */
    pub system_prompt: Option<String>,
    /** optional voice configuration */
    pub voice: Option<Voice>,
    /** webhook URL for agent events */
    pub webhook_url: Option<String>,
    /** arbitrary metadata attached to the agent */
    pub metadata: Option<Map<String, Value>>,
    /** downstream platform to create the agent on */
    pub provider: AgentProvider,
    /** extra fields merged verbatim into the outgoing payload */
    pub provider_specific: Option<Map<String, Value>>,
}

/* --- start of code -------------------------------------------------------------------------- */

impl AgentProvider {
    ///
    /// Wire name of the provider, as injected into responses and used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentProvider::Vapi => "vapi",
            AgentProvider::Retell => "retell",
        }
    }
}

impl std::fmt::Display for AgentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_config_parses() {
        let config: AgentConfig =
            serde_json::from_value(json!({"name": "Test Agent", "provider": "vapi"}))
                .expect("minimal config should parse");
        assert_eq!(config.name, "Test Agent");
        assert_eq!(config.provider, AgentProvider::Vapi);
        assert!(config.voice.is_none());
        assert!(config.metadata.is_none());
    }

    #[test]
    fn test_missing_name_rejected() {
        let result = serde_json::from_value::<AgentConfig>(json!({"provider": "retell"}));
        assert!(result.is_err(), "config without name should be rejected");
    }

    #[test]
    fn test_missing_provider_rejected() {
        let result = serde_json::from_value::<AgentConfig>(json!({"name": "Test Agent"}));
        assert!(result.is_err(), "config without provider should be rejected");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = serde_json::from_value::<AgentConfig>(
            json!({"name": "Test Agent", "provider": "bland"}),
        );
        assert!(result.is_err(), "unknown provider should be rejected");
    }

    #[test]
    fn test_unknown_voice_provider_rejected() {
        let result = serde_json::from_value::<AgentConfig>(json!({
            "name": "Test Agent",
            "provider": "vapi",
            "voice": {"provider": "cartesia", "voice_id": "X"}
        }));
        assert!(result.is_err(), "unknown voice provider should be rejected");
    }

    #[test]
    fn test_voice_provider_wire_names() {
        for (wire, expected) in [
            ("eleven_labs", VoiceProvider::ElevenLabs),
            ("deepgram", VoiceProvider::Deepgram),
            ("play_ht", VoiceProvider::PlayHt),
            ("open_ai", VoiceProvider::OpenAi),
            ("retell", VoiceProvider::Retell),
            ("aws_polly", VoiceProvider::AwsPolly),
            ("google", VoiceProvider::Google),
        ] {
            let parsed: VoiceProvider = serde_json::from_value(json!(wire))
                .unwrap_or_else(|e| panic!("{} should parse: {}", wire, e));
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_full_config_parses() {
        let config: AgentConfig = serde_json::from_value(json!({
            "name": "Support Agent",
            "description": "Handles support calls",
            "llm_model": "gpt-4",
            "system_prompt": "You are helpful.",
            "voice": {
                "provider": "play_ht",
                "voice_id": "larry",
                "settings": {"speed": 1.1}
            },
            "webhook_url": "https://example.com/hook",
            "metadata": {"team": "support"},
            "provider": "retell",
            "provider_specific": {"language": "en-US"}
        }))
        .expect("full config should parse");

        assert_eq!(config.provider, AgentProvider::Retell);
        let voice = config.voice.expect("voice should be present");
        assert_eq!(voice.provider, VoiceProvider::PlayHt);
        assert_eq!(voice.voice_id, "larry");
        assert!(voice.settings.is_some());
        assert_eq!(
            config.provider_specific.unwrap().get("language"),
            Some(&json!("en-US"))
        );
    }
}
