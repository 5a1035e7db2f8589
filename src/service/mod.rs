//! Request validation rules and the product service on top of the store.

mod products;
pub mod validation;
pub use products::ProductService;
pub use validation::{CreateProductRules, FieldError, IdRules, RequestValidator, RuleSet, UpdateProductRules};
