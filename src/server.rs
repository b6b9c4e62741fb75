//! Webhook transport: turns inbound provider requests into replies.
use crate::core::{Channel, CommandConfig, CommandError, RateSource};
use crate::reply::{PlainStyle, ReplyStyle};
use crate::twiml;
use anyhow::{Context, Result};
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RateSource>,
    pub config: CommandConfig,
}

/// Fields of the provider's webhook form we care about.
#[derive(Debug, Default, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    channels: [&'static str; 2],
    version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(message_query).post(message_form))
        .route("/message", get(message_query).post(message_form))
        .route("/whatsapp", get(message_query).post(message_form))
        .route("/sms", get(message_query).post(message_form))
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Listening on http://{addr}");
    info!(
        markup_percent = state.config.markup_percent,
        rich_formatting = state.config.rich_formatting,
        "Reply settings"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

// Unreadable requests are answered as an empty message rather than rejected,
// so the provider always gets a TwiML document back.
async fn message_form(
    State(state): State<AppState>,
    form: Result<Form<InboundMessage>, FormRejection>,
) -> Response {
    let message = form.map(|Form(message)| message).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable message form");
        InboundMessage::default()
    });
    handle_message(&state, message).await
}

async fn message_query(
    State(state): State<AppState>,
    query: Result<Query<InboundMessage>, QueryRejection>,
) -> Response {
    let message = query.map(|Query(message)| message).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable message query");
        InboundMessage::default()
    });
    handle_message(&state, message).await
}

async fn handle_message(state: &AppState, message: InboundMessage) -> Response {
    let sender = message.from.as_deref().unwrap_or("Unknown");
    let body = message.body.as_deref().unwrap_or_default();
    let channel = Channel::from_sender(sender);
    info!(%channel, sender, "Received message");

    let text = crate::respond(body, channel, state.source.as_ref(), &state.config).await;
    twiml::message_response(&text)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: "smsbtc",
        channels: ["sms", "whatsapp"],
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Renders a panic during message handling as the generic SMS error reply.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(details, "Panic while processing message");

    twiml::message_response(&PlainStyle.error(&CommandError::Internal))
}
