//! Single-origin CORS policy.
//!
//! A request that carries an `Origin` header is admitted only when it matches
//! the configured frontend origin; everything else with an `Origin` gets 403.
//! Requests without `Origin` are not cross-origin and pass untouched.
//! Admitted responses get their CORS headers from [`cors_layer`].

use crate::error::MessageBody;
use axum::{
    body::Body,
    extract::State,
    http::{header::ORIGIN, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const CORS_REJECTED: &str = "Not allowed by CORS";

/// The configured origin, if any.
#[derive(Clone, Debug, Default)]
pub struct AllowedOrigin(pub Option<HeaderValue>);

impl AllowedOrigin {
    /// Unparseable origins are treated as unset (nothing cross-origin allowed).
    pub fn from_config(origin: Option<&str>) -> Self {
        AllowedOrigin(origin.and_then(|o| HeaderValue::from_str(o).ok()))
    }

    fn admits(&self, origin: &HeaderValue) -> bool {
        self.0.as_ref() == Some(origin)
    }
}

pub async fn origin_gate(
    State(allowed): State<AllowedOrigin>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match req.headers().get(ORIGIN) {
        None => next.run(req).await,
        Some(origin) if allowed.admits(origin) => next.run(req).await,
        Some(origin) => {
            tracing::warn!(origin = ?origin, "cross-origin request rejected");
            (
                StatusCode::FORBIDDEN,
                Json(MessageBody {
                    message: CORS_REJECTED.into(),
                }),
            )
                .into_response()
        }
    }
}

/// Response headers for the admitted origin.
pub fn cors_layer(allowed: &AllowedOrigin) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);
    match &allowed.0 {
        Some(origin) => layer.allow_origin(AllowOrigin::exact(origin.clone())),
        None => layer,
    }
}
