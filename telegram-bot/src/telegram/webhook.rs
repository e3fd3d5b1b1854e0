//! Webhook server (axum): `POST /{token}` receives updates, `GET /health` and `GET /` for probes.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use teloxide::types::Update;
use tracing::{info, warn};

use super::updates::process_update;
use crate::composer::ReplyComposer;

#[derive(Clone)]
pub struct WebhookState {
    pub composer: ReplyComposer,
    /// Only requests to `/<token>` are accepted as updates.
    pub token: Arc<str>,
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/{token}", post(receive_update))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Telegram Fun Chat Bot is running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn bad_request(error: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "error": error })),
    )
}

/// Acknowledges at once; the update is processed on a spawned task.
async fn receive_update(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    if token != *state.token {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "Not found" })),
        );
    }

    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) if body.iter().all(u8::is_ascii_whitespace) => {
            warn!(error = %e, "Empty webhook body");
            return bad_request("Empty update");
        }
        Err(e) => {
            warn!(error = %e, "Webhook body is not JSON");
            return bad_request("Invalid update");
        }
    };
    if value.is_null() || value.as_object().is_some_and(|o| o.is_empty()) {
        return bad_request("Empty update");
    }
    let update: Update = match serde_json::from_value(value) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "Webhook body is not a Telegram update");
            return bad_request("Invalid update");
        }
    };

    info!(update_id = update.id.0, "Webhook update received");
    let composer = state.composer.clone();
    tokio::spawn(async move {
        process_update(&composer, &update).await;
    });

    (StatusCode::OK, Json(json!({ "ok": true })))
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve_webhook(state: WebhookState, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "Webhook server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, stopping webhook server");
            }
        })
        .await?;
    Ok(())
}
