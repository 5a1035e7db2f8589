//! Products REST API server.
//!
//! Run from repo root: `cargo run -p product_server`
//! Settings come from the environment or `.env` (DATABASE_URL, FRONTEND_URL, PORT, ...).

use product_api::{init_tracing, load_from_env, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_from_env()?;
    init_tracing();
    tracing::info!(port = settings.port, "starting products API");
    run(settings).await
}
