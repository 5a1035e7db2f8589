//! Service status routes: liveness and store readiness.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Readiness of the product store the handlers depend on.
#[derive(Serialize)]
struct StoreReadiness {
    status: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn health() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.backend();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StoreReadiness { status: "ready", store, error: None }),
        ),
        Err(e) => {
            tracing::warn!(store, error = %e, "product store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StoreReadiness { status: "unavailable", store, error: Some(e.to_string()) }),
            )
        }
    }
}

/// GET /health and GET /ready.
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
