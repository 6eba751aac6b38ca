//! HTTP surface: `GET /avatar` returns a PNG, `GET /health` a liveness check.

use crate::config::IdentigenConfig;
use crate::error::AvatarError;
use crate::generator::encode::CONTENT_TYPE;
use crate::generator::AvatarGenerator;
use crate::request::AvatarRequest;
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state. The generator is immutable, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<AvatarGenerator>,
}

impl AppState {
    pub fn new(generator: AvatarGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        match self {
            AvatarError::PayloadTooLarge { .. } | AvatarError::GridTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()).into_response()
            }
            AvatarError::Encoding(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate avatar",
            )
                .into_response(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/avatar", get(avatar))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn avatar(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, AvatarError> {
    let request = AvatarRequest::from_query(&query);
    let bytes = state.generator.generate_for(&request).map_err(|err| {
        match &err {
            AvatarError::PayloadTooLarge { requested, max }
            | AvatarError::GridTooLarge { requested, max } => {
                tracing::debug!(requested, max, error = %err, "rejecting oversized avatar request");
            }
            AvatarError::Encoding(_) => {
                let name = request
                    .name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(state.generator.settings().default_name.as_str());
                tracing::error!(name, error = %err, "error generating avatar");
            }
        }
        err
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    )
        .into_response())
}

async fn health() -> &'static str {
    "ok"
}

/// Bind to the configured address and serve until the process is stopped.
pub async fn serve(config: &IdentigenConfig) -> Result<()> {
    let addr = config.server.bind_addr();
    let state = AppState::new(AvatarGenerator::new(config.avatar.clone()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        hash = config.avatar.hash.name(),
        clamp_color = config.avatar.clamp_color,
        "server starting"
    );

    axum::serve(listener, router(state))
        .await
        .context("server error")
}
