//! HTTP request handlers

use super::{AppState, UssdForm};
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

pub const HEALTH_TEXT: &str = "Serviço USSD Alerta Saúde em execução.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ussd", post(ussd_callback))
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

/// Always 200 with a `CON`/`END` plain-text body
async fn ussd_callback(
    State(state): State<AppState>,
    UssdForm(request): UssdForm,
) -> impl IntoResponse {
    tracing::info!(
        session_id = %request.session_id,
        phone_number = %request.phone_number,
        text = %request.text,
        "USSD request"
    );

    let reply = state.engine.handle(&request).await;

    tracing::info!(
        session_id = %request.session_id,
        end = reply.is_end(),
        "USSD reply"
    );

    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], reply.to_string())
}
