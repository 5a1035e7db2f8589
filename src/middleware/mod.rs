//! Request middleware.

pub mod cors;
pub use cors::{cors_layer, origin_gate, AllowedOrigin};
