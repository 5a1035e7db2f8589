//! Product handlers. Validation already ran in the [`Validated`] extractor;
//! each handler maps one store operation onto a status code and JSON body.

use crate::error::{AppError, MessageBody, ValidationErrors};
use crate::extractors::Validated;
use crate::model::{CreateProductBody, NewProduct, ProductChanges, UpdateProductBody};
use crate::response::{self, ProductCreated, ProductList, ProductOne, ProductUpdated, PRODUCT_DELETED};
use crate::service::{CreateProductRules, IdRules, ProductService, UpdateProductRules};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Get a list of products
///
/// Available products only, most expensive first, at most four.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Successful response", body = ProductList),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = ProductService::list(state.store.as_ref()).await?;
    Ok((StatusCode::OK, Json(ProductList { products })))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ProductOne),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrors),
        (status = 404, description = "Product not found", body = MessageBody),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::get(state.store.as_ref(), input.id()?).await?;
    Ok((StatusCode::OK, Json(ProductOne { product })))
}

/// Creates a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created successfully", body = ProductCreated),
        (status = 400, description = "Bad request - Invalid input data", body = ValidationErrors),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    input: Validated<CreateProductRules>,
) -> Result<impl IntoResponse, AppError> {
    let new = NewProduct::from_body(&input.body)?;
    let product = ProductService::create(state.store.as_ref(), new).await?;
    Ok(response::created(product))
}

/// Updates a product with user input
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductUpdated),
        (status = 400, description = "Bad request - Invalid input data", body = ValidationErrors),
        (status = 404, description = "Product not found", body = MessageBody),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    input: Validated<UpdateProductRules>,
) -> Result<impl IntoResponse, AppError> {
    let changes = ProductChanges::from_body(&input.body)?;
    let product = ProductService::replace(state.store.as_ref(), input.id()?, changes).await?;
    Ok(response::updated(product))
}

/// Updates a product availability
///
/// Flips the stored availability; the request body is ignored.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to toggle")),
    responses(
        (status = 200, description = "Product updated successfully", body = ProductUpdated),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrors),
        (status = 404, description = "Product not found", body = MessageBody),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::toggle_availability(state.store.as_ref(), input.id()?).await?;
    Ok(response::updated(product))
}

/// Deletes a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageBody),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrors),
        (status = 404, description = "Product not found", body = MessageBody),
        (status = 500, description = "Internal server error", body = MessageBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, AppError> {
    ProductService::delete(state.store.as_ref(), input.id()?).await?;
    Ok((
        StatusCode::OK,
        Json(MessageBody {
            message: PRODUCT_DELETED.into(),
        }),
    ))
}
