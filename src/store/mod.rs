//! Product persistence. Handlers only see [`ProductStore`]; PostgreSQL is the
//! production backend and the in-memory store backs tests and `memory://`.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::{ensure_database_exists, PgProductStore};

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductSummary};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product; availability starts true.
    async fn create(&self, new: NewProduct) -> Result<Product, AppError>;

    /// Available products ordered by price descending, at most `limit`.
    async fn list_available(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError>;

    /// Primary key lookup.
    async fn find(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Persist name, price and availability of an existing product. Returns the stored row,
    /// or None if it vanished since it was read.
    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError>;

    /// Negate availability in place, leaving name and price untouched. None if the id is unknown.
    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Remove by primary key. Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap liveness probe used by the readiness route.
    async fn ping(&self) -> Result<(), AppError>;

    /// Backend name reported by the readiness route.
    fn backend(&self) -> &'static str;
}
