//! Twilio Programmable Messaging client

use super::{SmsError, SmsGateway};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials for the Twilio REST API
#[derive(Debug, Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number registered with Twilio
    pub phone_number: Option<String>,
    pub base_url: Option<String>,
}

impl TwilioConfig {
    /// All three credentials present and non-blank
    pub fn is_complete(&self) -> bool {
        [&self.account_sid, &self.auth_token, &self.phone_number]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

pub struct TwilioGateway {
    client: Client,
    account_sid: String,
    auth_token: String,
    url: String,
}

impl TwilioGateway {
    /// Build a gateway, or None when credentials are incomplete or the HTTP
    /// client cannot be created. Also returns the configured sender number.
    pub fn from_config(config: &TwilioConfig) -> Option<(Self, String)> {
        if !config.is_complete() {
            return None;
        }
        let account_sid = config.account_sid.as_deref()?.trim().to_string();
        let auth_token = config.auth_token.as_deref()?.trim().to_string();
        let sender = config.phone_number.as_deref()?.trim().to_string();

        let client = match Client::builder().timeout(CLIENT_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Twilio client");
                return None;
            }
        };

        let base = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{base}/2010-04-01/Accounts/{account_sid}/Messages.json");

        Some((
            Self {
                client,
                account_sid,
                auth_token,
                url,
            },
            sender,
        ))
    }

    fn parse_error(status: u16, body: &str) -> SmsError {
        match serde_json::from_str::<TwilioErrorResponse>(body) {
            Ok(err) => SmsError::new(err.code, err.message),
            Err(_) => SmsError::transport(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String, SmsError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await
            .map_err(|e| SmsError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SmsError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::parse_error(status.as_u16(), &text));
        }

        let message: TwilioMessage = serde_json::from_str(&text)
            .map_err(|e| SmsError::transport(format!("Failed to parse response: {e}")))?;
        Ok(message.sid)
    }
}

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    code: Option<u32>,
    message: String,
}
