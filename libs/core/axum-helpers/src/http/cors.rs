use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, env_required};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const CORS_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// CORS layer for the given origins.
///
/// Allows the methods used by the API, JSON content headers, credentials,
/// and caches preflight responses for an hour.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Parse a comma-separated origin list, ignoring blank entries.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| ConfigError::ParseError {
                key: CORS_ENV.to_string(),
                details: format!("{s}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::ParseError {
            key: CORS_ENV.to_string(),
            details: "no origins given".to_string(),
        });
    }

    Ok(origins)
}

/// Build the CORS layer from the required `CORS_ALLOWED_ORIGIN` variable.
///
/// Example: `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://example.com`
pub fn cors_layer_from_env() -> Result<CorsLayer, ConfigError> {
    let raw = env_required(CORS_ENV)?;
    let origins = parse_origins(&raw)?;
    tracing::info!(origins = %raw, "CORS configured");
    Ok(create_cors_layer(origins))
}
