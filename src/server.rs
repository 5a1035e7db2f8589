//! App assembly and startup: tracing, store bootstrap, router, listener.

use crate::config::Settings;
use crate::error::AppError;
use crate::middleware::{cors_layer, origin_gate, AllowedOrigin};
use crate::migration::apply_migrations;
use crate::routes::{status_routes, docs_routes, product_routes};
use crate::state::AppState;
use crate::store::{ensure_database_exists, MemoryProductStore, PgProductStore, ProductStore};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_api=info,product_server=info,tower_http=info")),
        )
        .init();
}

/// Full application router: products API, docs, health, CORS, body limit, request tracing.
pub fn build_app(state: AppState, allowed: AllowedOrigin) -> Router {
    Router::new()
        .merge(status_routes(state.clone()))
        .merge(docs_routes())
        .nest("/api/products", product_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(&allowed))
        .layer(axum::middleware::from_fn_with_state(allowed, origin_gate))
        .layer(TraceLayer::new_for_http())
}

/// Ensure the database exists, connect, and sync the schema.
pub async fn connect_db(settings: &Settings) -> Result<PgPool, AppError> {
    ensure_database_exists(&settings.database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await?;
    apply_migrations(&pool).await?;
    Ok(pool)
}

/// Pick the store for `settings`. A failed database bootstrap is logged and the
/// server keeps going on a lazy pool; requests fail with 500 until it recovers.
pub async fn build_store(settings: &Settings) -> Result<Arc<dyn ProductStore>, AppError> {
    if settings.uses_memory_store() {
        tracing::warn!("using in-memory product store; data is lost on exit");
        return Ok(Arc::new(MemoryProductStore::new()));
    }
    match connect_db(settings).await {
        Ok(pool) => {
            tracing::info!("connected to database");
            Ok(Arc::new(PgProductStore::new(pool)))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to the database");
            let pool = PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect_lazy(&settings.database_url)?;
            Ok(Arc::new(PgProductStore::new(pool)))
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store = build_store(&settings).await?;
    let allowed = AllowedOrigin::from_config(settings.frontend_url.as_deref());
    if allowed.0.is_none() {
        tracing::warn!("FRONTEND_URL not set; every cross-origin request will be rejected");
    }
    let app = build_app(AppState::new(store), allowed);

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
