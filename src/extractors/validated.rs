//! Validation gate: runs a route's [`RuleSet`] against path params and JSON body
//! before the handler. Any failure ends the request with 400 `{errors: [...]}`.

use crate::error::AppError;
use crate::service::validation::{RequestValidator, RuleSet};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Input that passed every rule of `R`.
#[derive(Debug)]
pub struct Validated<R> {
    /// The `:id` path parameter, when the route has one.
    pub id: Option<i64>,
    /// JSON object body; `{}` when absent, not JSON, or not an object.
    pub body: Map<String, Value>,
    rules: PhantomData<fn() -> R>,
}

impl<R> Validated<R> {
    pub fn id(&self) -> Result<i64, AppError> {
        self.id.ok_or_else(|| AppError::Internal("route has no id parameter".into()))
    }
}

#[async_trait]
impl<S, R> FromRequest<S> for Validated<R>
where
    S: Send + Sync,
    R: RuleSet + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
            Ok(Path(p)) => p,
            Err(_) => HashMap::new(),
        };
        let is_json = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(IntoResponse::into_response)?;
        let body = parse_body(is_json, &bytes).map_err(IntoResponse::into_response)?;

        let errors = RequestValidator::validate(R::RULES, &params, &body);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "request rejected by validation");
            return Err(AppError::Validation(errors).into_response());
        }

        // IsInt passed, so a parse failure means the id is out of range and cannot exist.
        let id = match params.get("id") {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| AppError::product_not_found().into_response())?,
            ),
            None => None,
        };
        Ok(Validated {
            id,
            body,
            rules: PhantomData,
        })
    }
}

fn parse_body(is_json: bool, bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(AppError::BadRequest(format!("malformed JSON body: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_bodies_read_as_empty() {
        assert!(parse_body(false, br#"{"name":"x"}"#).unwrap().is_empty());
        assert!(parse_body(true, b"  ").unwrap().is_empty());
        assert!(parse_body(true, b"[1,2]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        assert!(matches!(parse_body(true, b"{name:"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn object_bodies_are_kept() {
        let m = parse_body(true, br#"{"name":"Desk","price":3}"#).unwrap();
        assert_eq!(m.get("price"), Some(&Value::from(3)));
    }
}
