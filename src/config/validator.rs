//! Settings validation.

use crate::config::Settings;
use crate::error::ConfigError;
use axum::http::HeaderValue;

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if !settings.uses_memory_store()
        && !(settings.database_url.starts_with("postgres://") || settings.database_url.starts_with("postgresql://"))
    {
        return Err(ConfigError::Validation(format!(
            "DATABASE_URL must be a postgres:// URL or memory://, got '{}'",
            settings.database_url
        )));
    }
    if settings.db_max_connections == 0 {
        return Err(ConfigError::Validation("DB_MAX_CONNECTIONS must be at least 1".into()));
    }
    if let Some(origin) = &settings.frontend_url {
        validate_origin(origin)?;
    }
    Ok(())
}

/// An origin is `scheme://host[:port]` with nothing after it.
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::Validation(format!("FRONTEND_URL must start with http:// or https://, got '{}'", origin)))?;
    if rest.is_empty() || rest.contains('/') {
        return Err(ConfigError::Validation(format!(
            "FRONTEND_URL must be an origin without path or trailing slash, got '{}'",
            origin
        )));
    }
    HeaderValue::from_str(origin)
        .map_err(|_| ConfigError::Validation(format!("FRONTEND_URL is not a valid header value: '{}'", origin)))?;
    Ok(())
}
