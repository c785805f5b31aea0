//! Local HTTP endpoint for runtime messages.
//!
//! ```text
//! POST /v1/messages?target=<id>  - Deliver a runtime message (AUTO_APPLY)
//! GET  /v1/boards                - Supported boards and their selectors
//! GET  /health                   - Liveness
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use autoapply_config::Config;
use autoapply_core::bridge::{ALREADY_RUNNING, UNSUPPORTED_MESSAGE};
use autoapply_core::{AutoApplyBridge, PipelineSettings, registry};
use autoapply_protocols::{AutoApplyResponse, BoardId, BoardSelectors, ProfileStore, RuntimeMessage};

use crate::pages::{CdpPageSource, PageSource};
use crate::profiles;

/// Shared state for the message endpoint.
pub(crate) struct AppState {
    pub bridge: AutoApplyBridge,
    pub pages: Arc<dyn PageSource>,
    /// Used when a message arrives without profile data.
    pub profiles: Option<Box<dyn ProfileStore>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageQuery {
    /// CDP target id of the tab to work on.
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardEntry {
    board: BoardId,
    adapter: &'static str,
    selectors: &'static BoardSelectors,
}

pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/messages", post(handle_message))
        .route("/v1/boards", get(list_boards))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_boards(State(state): State<Arc<AppState>>) -> Json<Vec<BoardEntry>> {
    let adapters = state.bridge.adapters();
    Json(
        registry::all()
            .map(|(board, selectors)| BoardEntry {
                board,
                adapter: adapters.get(board).name(),
                selectors,
            })
            .collect(),
    )
}

async fn handle_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<AutoApplyResponse>) {
    let decoded = body
        .map_err(|e| e.body_text())
        .and_then(|Json(body)| serde_json::from_value::<RuntimeMessage>(body).map_err(|e| e.to_string()));
    let message = match decoded {
        Ok(message) => message,
        Err(e) => {
            debug!("Rejected runtime message: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(AutoApplyResponse::error(UNSUPPORTED_MESSAGE)),
            );
        }
    };

    // A rejected request must not attach to the tab.
    if state.bridge.is_busy() {
        return (StatusCode::OK, Json(AutoApplyResponse::error(ALREADY_RUNNING)));
    }

    let message = match with_stored_profile(&state, message).await {
        Ok(message) => message,
        Err(response) => return (StatusCode::SERVICE_UNAVAILABLE, Json(response)),
    };

    let opened = match state.pages.open(query.target.as_deref(), None).await {
        Ok(opened) => opened,
        Err(e) => {
            warn!("Could not open page: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(AutoApplyResponse::error(format!("Could not open page: {}", e))),
            );
        }
    };

    let response = state.bridge.handle(opened.page(), message).await;
    (StatusCode::OK, Json(response))
}

/// Fill in the profile from the store when the message carries none.
async fn with_stored_profile(
    state: &AppState,
    message: RuntimeMessage,
) -> Result<RuntimeMessage, AutoApplyResponse> {
    let RuntimeMessage::AutoApply { profile } = message;
    if !profile.is_empty() {
        return Ok(RuntimeMessage::AutoApply { profile });
    }
    let Some(store) = &state.profiles else {
        return Ok(RuntimeMessage::AutoApply { profile });
    };

    match store.load().await {
        Ok(profile) => Ok(RuntimeMessage::auto_apply(profile)),
        Err(e) => {
            warn!("Profile store {} failed: {}", store.name(), e);
            Err(AutoApplyResponse::error(format!("Could not load profile: {}", e)))
        }
    }
}

/// Run the message endpoint until shutdown.
pub(crate) async fn run_server(
    config: Config,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let profiles = match profiles::build_store(&config) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("No profile store available: {}", e);
            None
        }
    };

    let state = Arc::new(AppState {
        bridge: AutoApplyBridge::new(PipelineSettings::from_config(&config)),
        pages: Arc::new(CdpPageSource::new(config.browser.endpoint.clone())),
        profiles,
    });
    let app = create_router(state);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("AutoApply ready:");
    info!("  Browser:  {}", config.browser.endpoint);
    info!("  POST http://{}/v1/messages", addr);
    info!("  GET  http://{}/v1/boards", addr);
    info!("  GET  http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Shutting down...");
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
