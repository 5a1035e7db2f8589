//! Response envelopes for the product endpoints.

use crate::model::{Product, ProductSummary};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

pub const PRODUCT_CREATED: &str = "Product created successfully";
pub const PRODUCT_UPDATED: &str = "Product updated successfully";
pub const PRODUCT_DELETED: &str = "Product deleted successfully";

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub products: Vec<ProductSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductOne {
    pub product: Product,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    #[schema(example = "Product created successfully")]
    pub message: String,
    pub product_added: Product,
}

#[derive(Serialize, ToSchema)]
pub struct ProductUpdated {
    #[schema(example = "Product updated successfully")]
    pub message: String,
    pub product: Product,
}

pub fn created(product: Product) -> (StatusCode, Json<ProductCreated>) {
    (
        StatusCode::CREATED,
        Json(ProductCreated {
            message: PRODUCT_CREATED.into(),
            product_added: product,
        }),
    )
}

pub fn updated(product: Product) -> (StatusCode, Json<ProductUpdated>) {
    (
        StatusCode::OK,
        Json(ProductUpdated {
            message: PRODUCT_UPDATED.into(),
            product,
        }),
    )
}
