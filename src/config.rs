//! Process configuration from environment variables

use crate::llm::LlmConfig;
use crate::sms::TwilioConfig;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_TTL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: LlmConfig,
    pub twilio: TwilioConfig,
    /// Bound on every analysis and SMS call
    pub call_timeout: Duration,
    /// Idle lifetime of an open dialog
    pub session_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("USSD_PORT")
            .or_else(|| get("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let secs = |key: &str, default: u64| {
            get(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map_or(Duration::from_secs(default), Duration::from_secs)
        };

        Self {
            port,
            llm: LlmConfig {
                api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL"),
            },
            twilio: TwilioConfig {
                account_sid: get("TWILIO_ACCOUNT_SID"),
                auth_token: get("TWILIO_AUTH_TOKEN"),
                phone_number: get("TWILIO_PHONE_NUMBER"),
                base_url: get("TWILIO_BASE_URL"),
            },
            call_timeout: secs("EXTERNAL_CALL_TIMEOUT_SECS", DEFAULT_CALL_TIMEOUT_SECS),
            session_ttl: secs("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
        }
    }
}
