//! Schema sync: create the products table when it does not exist yet.
//! Idempotent; safe to run on every start.

use crate::error::AppError;
use sqlx::PgPool;

const PRODUCTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const PRODUCTS_LIST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_available_price_idx ON products (price DESC) WHERE availability";

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(PRODUCTS_DDL).execute(pool).await?;
    sqlx::query(PRODUCTS_LIST_INDEX).execute(pool).await?;
    tracing::info!("products schema ready");
    Ok(())
}
