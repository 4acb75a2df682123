//! Text analysis backed by the LLM service
//!
//! Turns a free-text description typed on the handset into a short answer
//! that fits on a USSD screen. Every failure is folded into an
//! [`AnalysisFailure`] carrying the message shown to the user; nothing here
//! returns an error to the caller.

use crate::llm::{LlmRequest, LlmService};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const SYMPTOMS_PROMPT: &str = "És um assistente de saúde em Angola. Com base nos sintomas \
descritos, estima a probabilidade de o utente ter malária. A resposta DEVE começar com uma \
percentagem (ex: 65%) seguida de uma explicação em português com no máximo 45 caracteres. \
Não incluas mais nada.";

const ZONE_SOLUTION_PROMPT: &str = "És um especialista em saúde pública e saneamento em \
Angola. Sugere uma solução prática para o problema descrito na zona do utente, em português, \
com no máximo 150 caracteres. Não incluas mais nada.";

const SYMPTOMS_MAX_TOKENS: u32 = 60;
const ZONE_SOLUTION_MAX_TOKENS: u32 = 120;
const TEMPERATURE: f32 = 0.5;

/// Which analysis a dialog leaf asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Symptom description to malaria probability
    MalariaSymptoms,
    /// Zone problem description to practical suggestion
    ZoneSolution,
}

impl AnalysisKind {
    fn prompt(self, description: &str) -> LlmRequest {
        let (instructions, label, max_tokens) = match self {
            AnalysisKind::MalariaSymptoms => (SYMPTOMS_PROMPT, "Sintomas", SYMPTOMS_MAX_TOKENS),
            AnalysisKind::ZoneSolution => {
                (ZONE_SOLUTION_PROMPT, "Problema", ZONE_SOLUTION_MAX_TOKENS)
            }
        };

        LlmRequest::new(format!("{instructions}\n\n{label}: {description}"))
            .with_temperature(TEMPERATURE)
            .with_max_tokens(max_tokens)
    }

    /// Heading used when the answer is forwarded by SMS
    pub fn sms_heading(self) -> &'static str {
        match self {
            AnalysisKind::MalariaSymptoms => "Avaliação de sintomas",
            AnalysisKind::ZoneSolution => "Sugestão para a sua zona",
        }
    }
}

/// Why an analysis produced no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFailure {
    /// No API key configured, or the client could not be built
    Unavailable,
    /// Blank description
    EmptyInput,
    /// The service answered with no text
    EmptyResponse,
    /// Network, provider or timeout error
    Remote,
}

impl AnalysisFailure {
    /// Message shown on the handset
    pub fn message(self) -> &'static str {
        match self {
            AnalysisFailure::Unavailable => {
                "Serviço de IA indisponível. Verifique a configuração da API_KEY."
            }
            AnalysisFailure::EmptyInput => "Descrição vazia. Por favor, descreva a situação.",
            AnalysisFailure::EmptyResponse => {
                "Não foi possível obter uma análise. Tente novamente mais tarde."
            }
            AnalysisFailure::Remote => {
                "Erro ao contactar o serviço de IA. Tente novamente mais tarde."
            }
        }
    }
}

pub type AnalysisOutcome = Result<String, AnalysisFailure>;

/// Adapter around the optional LLM service
#[derive(Clone)]
pub struct TextAnalyzer {
    service: Option<Arc<dyn LlmService>>,
    timeout: Duration,
}

impl TextAnalyzer {
    pub fn new(service: Option<Arc<dyn LlmService>>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn is_available(&self) -> bool {
        self.service.is_some()
    }

    /// Malaria probability for a symptom description
    pub async fn analyze_symptoms(&self, description: &str) -> AnalysisOutcome {
        self.analyze(AnalysisKind::MalariaSymptoms, description).await
    }

    /// Practical suggestion for a problem in the user's zone
    pub async fn suggest_zone_solution(&self, description: &str) -> AnalysisOutcome {
        self.analyze(AnalysisKind::ZoneSolution, description).await
    }

    async fn analyze(&self, kind: AnalysisKind, description: &str) -> AnalysisOutcome {
        let Some(service) = &self.service else {
            tracing::warn!(?kind, "Analysis requested but LLM service is not configured");
            return Err(AnalysisFailure::Unavailable);
        };

        let description = description.trim();
        if description.is_empty() {
            return Err(AnalysisFailure::EmptyInput);
        }

        let request = kind.prompt(description);

        match timeout(self.timeout, service.complete(&request)).await {
            Ok(Ok(response)) => {
                let text = response.joined_text().trim().to_string();
                if text.is_empty() {
                    tracing::warn!(?kind, "LLM returned an empty answer");
                    Err(AnalysisFailure::EmptyResponse)
                } else {
                    Ok(text)
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(?kind, error = %e.message, "Analysis LLM error");
                Err(AnalysisFailure::Remote)
            }
            Err(_) => {
                tracing::warn!(?kind, timeout_ms = %self.timeout.as_millis(), "Analysis timed out");
                Err(AnalysisFailure::Remote)
            }
        }
    }
}
