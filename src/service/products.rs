//! Product operations: existence check, then mutation through the store.

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductChanges, ProductSummary};
use crate::store::ProductStore;

/// Maximum number of products returned by the list endpoint.
pub const LIST_LIMIT: i64 = 4;

pub struct ProductService;

impl ProductService {
    pub async fn create(store: &dyn ProductStore, new: NewProduct) -> Result<Product, AppError> {
        let product = store.create(new).await?;
        tracing::info!(id = product.id, "product created");
        Ok(product)
    }

    /// Available products, most expensive first.
    pub async fn list(store: &dyn ProductStore) -> Result<Vec<ProductSummary>, AppError> {
        store.list_available(LIST_LIMIT).await
    }

    pub async fn get(store: &dyn ProductStore, id: i64) -> Result<Product, AppError> {
        store.find(id).await?.ok_or_else(AppError::product_not_found)
    }

    /// Replace name, price and availability.
    pub async fn replace(store: &dyn ProductStore, id: i64, changes: ProductChanges) -> Result<Product, AppError> {
        let mut product = Self::get(store, id).await?;
        product.apply(changes);
        let saved = store.save(&product).await?.ok_or_else(AppError::product_not_found)?;
        tracing::info!(id, "product updated");
        Ok(saved)
    }

    /// Flip availability. Whatever the request carried is irrelevant; only the
    /// availability column is written.
    pub async fn toggle_availability(store: &dyn ProductStore, id: i64) -> Result<Product, AppError> {
        let saved = store
            .toggle_availability(id)
            .await?
            .ok_or_else(AppError::product_not_found)?;
        tracing::info!(id, availability = saved.availability, "product availability toggled");
        Ok(saved)
    }

    pub async fn delete(store: &dyn ProductStore, id: i64) -> Result<(), AppError> {
        Self::get(store, id).await?;
        if !store.delete(id).await? {
            return Err(AppError::product_not_found());
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
