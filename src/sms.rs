//! SMS delivery
//!
//! The notifier validates the destination, calls the gateway and always
//! resolves to a [`SmsReceipt`] whose message is appended verbatim to the
//! USSD response.

mod twilio;

pub use twilio::{TwilioConfig, TwilioGateway};

use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Twilio: 'To' number is not a valid phone number
pub const CODE_INVALID_NUMBER: u32 = 21211;
/// Twilio: permission to send to this region is not enabled
pub const CODE_REGION_NOT_PERMITTED: u32 = 21408;
/// Twilio: recipient replied STOP / blocked the sender
pub const CODE_UNSUBSCRIBED: u32 = 21610;
/// Twilio: 'To' number is not SMS-capable
pub const CODE_NOT_MOBILE: u32 = 21614;

/// Error returned by an SMS provider
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SmsError {
    /// Provider error code, when the provider returned one
    pub code: Option<u32>,
    pub message: String,
}

impl SmsError {
    pub fn new(code: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

/// SMS provider boundary
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` from `from` to `to`, returning the provider message id
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String, SmsError>;
}

/// Result of an SMS attempt, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsReceipt {
    Sent { message_id: String },
    /// Blank destination or body
    MissingContent,
    /// Destination does not look like an E.164 number
    InvalidNumber,
    /// No credentials configured
    Unavailable,
    /// Provider refused with a known code
    Rejected { code: u32 },
    /// Anything else, with the provider's raw text
    Failed { detail: String },
}

impl SmsReceipt {
    pub fn is_sent(&self) -> bool {
        matches!(self, SmsReceipt::Sent { .. })
    }

    /// Message appended to the USSD response
    pub fn message(&self) -> String {
        match self {
            SmsReceipt::Sent { .. } => "Enviámos uma cópia por SMS.".to_string(),
            SmsReceipt::MissingContent => {
                "SMS não enviado: número ou mensagem em falta.".to_string()
            }
            SmsReceipt::InvalidNumber => {
                "SMS não enviado: número de telefone inválido.".to_string()
            }
            SmsReceipt::Unavailable => "Serviço de SMS indisponível.".to_string(),
            SmsReceipt::Rejected { code } => rejection_message(*code).to_string(),
            SmsReceipt::Failed { detail } => format!("Falha ao enviar SMS: {detail}"),
        }
    }
}

fn rejection_message(code: u32) -> &'static str {
    match code {
        CODE_INVALID_NUMBER => "Falha no SMS: o número de destino é inválido.",
        CODE_UNSUBSCRIBED => {
            "Falha no SMS: o destinatário bloqueou ou cancelou a receção de mensagens."
        }
        CODE_REGION_NOT_PERMITTED => "Falha no SMS: envio não permitido para esta região.",
        CODE_NOT_MOBILE => "Falha no SMS: o número não pode receber mensagens.",
        _ => "Falha ao enviar SMS.",
    }
}

fn is_known_code(code: u32) -> bool {
    matches!(
        code,
        CODE_INVALID_NUMBER | CODE_UNSUBSCRIBED | CODE_REGION_NOT_PERMITTED | CODE_NOT_MOBILE
    )
}

/// E.164-like: optional `+`, first digit 1-9, 7 to 15 digits in total.
/// Shorter strings are local or service codes, never SMS destinations.
pub fn is_valid_phone_number(to: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\+?[1-9]\d{6,14}$").expect("static regex"))
        .is_match(to)
}

/// Adapter around the optional SMS gateway
#[derive(Clone)]
pub struct SmsNotifier {
    gateway: Option<Arc<dyn SmsGateway>>,
    sender: String,
    timeout: Duration,
}

impl SmsNotifier {
    pub fn new(
        gateway: Option<Arc<dyn SmsGateway>>,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            sender: sender.into(),
            timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        self.gateway.is_some()
    }

    pub async fn send_sms(&self, to: &str, body: &str) -> SmsReceipt {
        let to = to.trim();
        if to.is_empty() || body.trim().is_empty() {
            return SmsReceipt::MissingContent;
        }
        if !is_valid_phone_number(to) {
            tracing::warn!(to = %to, "Refusing SMS to malformed number");
            return SmsReceipt::InvalidNumber;
        }

        let Some(gateway) = &self.gateway else {
            tracing::warn!("SMS requested but gateway is not configured");
            return SmsReceipt::Unavailable;
        };

        let start = std::time::Instant::now();
        let result = timeout(self.timeout, gateway.send(to, &self.sender, body)).await;
        let duration_ms = start.elapsed().as_millis();

        match result {
            Ok(Ok(message_id)) => {
                tracing::info!(to = %to, message_id = %message_id, duration_ms = %duration_ms, "SMS sent");
                SmsReceipt::Sent { message_id }
            }
            Ok(Err(e)) => {
                tracing::error!(to = %to, code = ?e.code, error = %e.message, duration_ms = %duration_ms, "SMS failed");
                match e.code {
                    Some(code) if is_known_code(code) => SmsReceipt::Rejected { code },
                    _ => SmsReceipt::Failed { detail: e.message },
                }
            }
            Err(_) => {
                tracing::error!(to = %to, duration_ms = %duration_ms, "SMS timed out");
                SmsReceipt::Failed {
                    detail: "tempo limite excedido".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod proptests;
