//! Product record and the shapes derived from it.

use crate::error::AppError;
use crate::service::validation::{loose_bool, loose_number, loose_string};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A persisted product row.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Surrogate primary key, assigned by the store.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor de 49 pulgadas")]
    pub name: String,
    #[schema(example = 100)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection returned by the list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        ProductSummary {
            id: p.id,
            name: p.name.clone(),
            price: p.price,
            availability: p.availability,
        }
    }
}

/// Fields supplied by the caller on create. Availability always starts true.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Full replacement of the mutable fields (PUT).
#[derive(Clone, Debug, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Documented shape of a create request.
#[derive(ToSchema)]
pub struct CreateProductBody {
    #[schema(example = "Monitor de 49 pulgadas")]
    pub name: String,
    #[schema(example = 100)]
    pub price: f64,
}

/// Documented shape of a full update request.
#[derive(ToSchema)]
pub struct UpdateProductBody {
    #[schema(example = "Monitor de 49 pulgadas")]
    pub name: String,
    #[schema(example = 100)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

fn coerce_name(body: &Map<String, Value>) -> Result<String, AppError> {
    body.get("name")
        .and_then(loose_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("name is not a string".into()))
}

fn coerce_price(body: &Map<String, Value>) -> Result<f64, AppError> {
    body.get("price")
        .and_then(loose_number)
        .filter(|n| *n > 0.0)
        .ok_or_else(|| AppError::BadRequest("price is not a positive number".into()))
}

impl NewProduct {
    /// Build from an already validated body.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(NewProduct {
            name: coerce_name(body)?,
            price: coerce_price(body)?,
        })
    }
}

impl ProductChanges {
    /// Build from an already validated body.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let availability = body.get("availability")
            .and_then(loose_bool)
            .ok_or_else(|| AppError::BadRequest("availability is not a boolean".into()))?;
        Ok(ProductChanges {
            name: coerce_name(body)?,
            price: coerce_price(body)?,
            availability,
        })
    }
}

impl Product {
    /// Overwrite name, price and availability.
    pub fn apply(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.price = changes.price;
        self.availability = changes.availability;
    }

    /// Flip availability to its negation.
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}
