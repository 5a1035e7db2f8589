//! Products REST API: create, list, fetch, replace, toggle availability and delete
//! products stored in PostgreSQL, with declarative request validation and OpenAPI docs.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_from_env, Settings};
pub use error::{AppError, ConfigError};
pub use middleware::AllowedOrigin;
pub use migration::apply_migrations;
pub use model::{Product, ProductSummary};
pub use routes::{status_routes, docs_routes, product_routes, ApiDoc};
pub use server::{build_app, build_store, connect_db, init_tracing, run};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryProductStore, PgProductStore, ProductStore};
pub use service::ProductService;
