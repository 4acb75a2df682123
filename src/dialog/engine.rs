//! Dialog engine: loads the session, applies the transition, runs effects

use super::{last_input, transition, Flow, Reply, Step};
use crate::analysis::{AnalysisKind, TextAnalyzer};
use crate::catalog::Catalog;
use crate::session::{Session, SessionStore};
use crate::sms::SmsNotifier;
use serde::Deserialize;
use std::sync::Arc;

/// One gateway request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogRequest {
    pub session_id: String,
    /// Short code dialed by the user; not used for routing
    pub service_code: String,
    pub phone_number: String,
    /// All input so far, `*`-joined
    pub text: String,
}

pub struct DialogEngine {
    store: Arc<dyn SessionStore>,
    analyzer: TextAnalyzer,
    sms: SmsNotifier,
    catalog: Arc<Catalog>,
}

impl DialogEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        analyzer: TextAnalyzer,
        sms: SmsNotifier,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            store,
            analyzer,
            sms,
            catalog,
        }
    }

    /// Advance the dialog for `request` and produce the gateway reply
    pub async fn handle(&self, request: &DialogRequest) -> Reply {
        let key = request.session_id.as_str();
        let input = last_input(&request.text);

        let mut session = self.load(key).await;

        if session.flow == Flow::Unknown {
            tracing::warn!(session_id = %key, "Unexpected stored flow, resetting to menu");
        }

        let step = transition(session.flow, input, &self.catalog);
        tracing::debug!(
            session_id = %key,
            service_code = %request.service_code,
            flow = session.flow.as_str(),
            terminal = step.is_terminal(),
            "Dialog step"
        );

        match step {
            Step::Prompt { text, next } => {
                session.enter(next);
                if has_key(key) {
                    if let Err(e) = self.store.set(key, session).await {
                        tracing::error!(session_id = %key, error = %e, "Failed to save session");
                    }
                }
                Reply::Continue(text)
            }
            terminal => {
                if has_key(key) {
                    if let Err(e) = self.store.delete(key).await {
                        tracing::error!(session_id = %key, error = %e, "Failed to delete session");
                    }
                }
                Reply::End(self.finish(terminal, &request.phone_number).await)
            }
        }
    }

    /// Stored session for `key`, or a fresh one. Requests without a session
    /// id never share state, so they always start fresh.
    async fn load(&self, key: &str) -> Session {
        if !has_key(key) {
            tracing::warn!("Request without session id, answering statelessly");
            return Session::new();
        }
        match self.store.get(key).await {
            Ok(Some(session)) => session,
            Ok(None) => Session::new(),
            Err(e) => {
                tracing::error!(session_id = %key, error = %e, "Failed to load session, starting over");
                Session::new()
            }
        }
    }

    /// Run the effects of a terminal step and build the closing message
    async fn finish(&self, step: Step, phone_number: &str) -> String {
        match step {
            Step::Prompt { text, .. } | Step::End { text } => text,
            Step::EndWithSms { text, sms } => {
                let receipt = self.sms.send_sms(phone_number, &sms).await;
                tracing::debug!(sent = receipt.is_sent(), "SMS copy");
                format!("{text}\n{}", receipt.message())
            }
            Step::EndWithAnalysis { kind, description } => {
                let outcome = match kind {
                    AnalysisKind::MalariaSymptoms => {
                        self.analyzer.analyze_symptoms(&description).await
                    }
                    AnalysisKind::ZoneSolution => {
                        self.analyzer.suggest_zone_solution(&description).await
                    }
                };
                match outcome {
                    Ok(answer) => {
                        let body = format!("{}: {answer}", kind.sms_heading());
                        let receipt = self.sms.send_sms(phone_number, &body).await;
                        format!("{answer}\n{}", receipt.message())
                    }
                    Err(failure) => failure.message().to_string(),
                }
            }
        }
    }
}

fn has_key(session_id: &str) -> bool {
    !session_id.trim().is_empty()
}
