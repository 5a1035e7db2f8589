//! PostgreSQL-backed product store.

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductSummary};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, new: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %new.name, price = new.price, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&new.name)
            .bind(new.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_available(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError> {
        let sql = "SELECT id, name, price, availability FROM products \
                   WHERE availability = TRUE ORDER BY price DESC, id ASC LIMIT $1";
        tracing::debug!(sql = %sql, limit, "query");
        let rows = sqlx::query_as::<_, ProductSummary>(sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id = product.id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET availability = NOT availability, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete product");
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into the admin URL (same server, `postgres` database) and the
/// target database name. The name is empty when the URL has no path.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let authority_start = url
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: missing scheme".into()))?;
    let (prefix, rest) = url.split_at(authority_start);
    let (authority, tail) = match rest.find(['/', '?']) {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let tail = tail.strip_prefix('/').unwrap_or(tail);
    let (db_name, query) = match tail.split_once('?') {
        Some((name, q)) => (name, format!("?{}", q)),
        None => (tail, String::new()),
    };
    let admin_url = format!("{}{}/postgres{}", prefix, authority, query);
    Ok((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
