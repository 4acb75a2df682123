//! Alerta Saúde USSD service
//!
//! Serves a health-information menu to feature phones over a USSD gateway
//! callback, with LLM-backed symptom and zone analysis and SMS copies.

mod analysis;
mod api;
mod catalog;
mod config;
mod dialog;
mod formatters;
mod llm;
mod session;
mod sms;

#[cfg(test)]
mod testing;

use analysis::TextAnalyzer;
use api::{create_router, AppState};
use catalog::Catalog;
use config::AppConfig;
use dialog::DialogEngine;
use session::{spawn_reaper, InMemorySessionStore, SessionStore};
use sms::{SmsGateway, SmsNotifier, TwilioGateway};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REAPER_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ussd_alerta=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    // Text analysis
    let analyzer = TextAnalyzer::new(llm::service_from_config(&config.llm), config.call_timeout);
    if analyzer.is_available() {
        tracing::info!(model = %config.llm.model, "LLM service initialized");
    } else {
        tracing::warn!("No LLM API key configured. Set GEMINI_API_KEY to enable analysis.");
    }

    // SMS
    let (gateway, sender) = match TwilioGateway::from_config(&config.twilio) {
        Some((gateway, sender)) => (Some(Arc::new(gateway) as Arc<dyn SmsGateway>), sender),
        None => (None, String::new()),
    };
    let sms = SmsNotifier::new(gateway, sender, config.call_timeout);
    if sms.is_available() {
        tracing::info!("SMS gateway initialized");
    } else {
        tracing::warn!(
            "Twilio credentials incomplete. Set TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER to enable SMS."
        );
    }

    // Sessions
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.session_ttl));
    let shutdown = CancellationToken::new();
    let reaper = spawn_reaper(store.clone(), REAPER_INTERVAL, shutdown.clone());

    let engine = DialogEngine::new(store, analyzer, sms, Arc::new(Catalog::sample()));
    let state = AppState::new(engine);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("USSD server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    reaper.await?;
    tracing::info!("USSD server stopped");

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM, cancelling background tasks
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
