//! In-process product store. Same ordering and projection rules as the SQL store.

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductSummary};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<i64, Product>,
}

#[derive(Default)]
pub struct MemoryProductStore {
    rows: RwLock<Rows>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> AppError {
        AppError::Internal("product store lock poisoned".into())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, new: NewProduct) -> Result<Product, AppError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;
        rows.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: rows.next_id,
            name: new.name,
            price: new.price,
            availability: true,
            created_at: now,
            updated_at: now,
        };
        rows.by_id.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list_available(&self, limit: i64) -> Result<Vec<ProductSummary>, AppError> {
        let rows = self.rows.read().map_err(|_| Self::lock_err())?;
        let mut available: Vec<&Product> = rows.by_id.values().filter(|p| p.availability).collect();
        // BTreeMap iteration is id-ascending and the sort is stable, so ties keep id order.
        available.sort_by(|a, b| b.price.total_cmp(&a.price));
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(available.into_iter().take(limit).map(ProductSummary::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let rows = self.rows.read().map_err(|_| Self::lock_err())?;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;
        let Some(stored) = rows.by_id.get_mut(&product.id) else {
            return Ok(None);
        };
        stored.name = product.name.clone();
        stored.price = product.price;
        stored.availability = product.availability;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, AppError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;
        let Some(stored) = rows.by_id.get_mut(&id) else {
            return Ok(None);
        };
        stored.toggle_availability();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;
        Ok(rows.by_id.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
