//! Mock adapters for testing
//!
//! These mocks enable dialog and HTTP tests without real I/O.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::sms::{SmsError, SmsGateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    delay: Option<Duration>,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Mock SMS Gateway
// ============================================================================

/// Mock SMS gateway recording every message
pub struct MockSmsGateway {
    failure: Mutex<Option<SmsError>>,
    delay: Option<Duration>,
    /// (to, from, body) of every send attempt
    pub messages: Mutex<Vec<(String, String, String)>>,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self {
            failure: Mutex::new(None),
            delay: None,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next send with this error
    pub fn fail_with(&self, error: SmsError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recorded_messages(&self) -> Vec<(String, String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<String, SmsError> {
        let sent = {
            let mut messages = self.messages.lock().unwrap();
            messages.push((to.to_string(), from.to_string(), body.to_string()));
            messages.len()
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(format!("SM{sent:032}")),
        }
    }
}
