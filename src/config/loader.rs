//! Load settings from the process environment (after `.env`, if present).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;

/// Read settings from environment variables. `.env` is loaded first when present.
pub fn load_from_env() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    load_with(|key| std::env::var(key).ok())
}

/// Build settings from an arbitrary key lookup. Blank values count as unset.
pub fn load_with<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let database_url = get("DATABASE_URL")
        .or_else(|| get("DB_URI"))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
    let port = match get("PORT") {
        Some(p) => p
            .parse::<u16>()
            .map_err(|_| ConfigError::Load(format!("PORT must be a port number, got '{}'", p)))?,
        None => DEFAULT_PORT,
    };
    let db_max_connections = match get("DB_MAX_CONNECTIONS") {
        Some(n) => n
            .parse::<u32>()
            .map_err(|_| ConfigError::Load(format!("DB_MAX_CONNECTIONS must be a positive integer, got '{}'", n)))?,
        None => DEFAULT_DB_MAX_CONNECTIONS,
    };

    let settings = Settings {
        database_url,
        frontend_url: get("FRONTEND_URL"),
        host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
        port,
        db_max_connections,
    };
    validate(&settings)?;
    Ok(settings)
}
