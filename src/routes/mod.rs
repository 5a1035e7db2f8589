//! Route tables. Each product route runs its rule set (via the `Validated`
//! extractor) before the handler.

pub mod status;
pub mod docs;
pub mod product;

pub use status::status_routes;
pub use docs::{docs_routes, ApiDoc};
pub use product::product_routes;
