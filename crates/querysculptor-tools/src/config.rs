use std::collections::HashMap;
use std::env;

use thiserror::Error;

const ENDPOINT_VAR: &str = "DEFAULT_GRAPHQL_ENDPOINT";
const HEADERS_VAR: &str = "DEFAULT_GRAPHQL_HEADERS";
const REDIS_URL_VAR: &str = "REDIS_URL";

const MAX_HEADER_KEY_LENGTH: usize = 100;
const MAX_HEADER_VALUE_LENGTH: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{ENDPOINT_VAR} is not set; QuerySculptor targets exactly one upstream endpoint")]
    MissingEndpoint,

    #[error("{HEADERS_VAR} is not valid JSON: {0}")]
    InvalidHeadersJson(serde_json::Error),

    #[error("{HEADERS_VAR} must be a JSON object of string to string")]
    HeadersNotAnObject,

    #[error("{HEADERS_VAR} entry '{key}' is invalid: {reason}")]
    HeaderEntryTooLong { key: String, reason: String },
}

/// The process-wide configuration: the single upstream endpoint agents are
/// never allowed to override, its default headers, and the session store's
/// backing Redis URL.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graphql_endpoint: String,
    pub env_headers: HashMap<String, String>,
    pub redis_url: String,
}

impl AppConfig {
    /// Reads and validates the three environment variables this crate
    /// relies on. `DEFAULT_GRAPHQL_HEADERS` is optional (defaults to no extra
    /// headers); `REDIS_URL` is optional (defaults to a loopback URL so a
    /// missing Redis falls back to the in-memory store rather than failing
    /// startup, per querysculptor-session's fallback semantics).
    pub fn from_env() -> Result<Self, ConfigError> {
        let graphql_endpoint = env::var(ENDPOINT_VAR).map_err(|_| ConfigError::MissingEndpoint)?;
        let env_headers = match env::var(HEADERS_VAR) {
            Ok(raw) => parse_headers(&raw)?,
            Err(_) => HashMap::new(),
        };
        let redis_url = env::var(REDIS_URL_VAR).unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        Ok(Self {
            graphql_endpoint,
            env_headers,
            redis_url,
        })
    }
}

fn parse_headers(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ConfigError::InvalidHeadersJson)?;
    let object = value.as_object().ok_or(ConfigError::HeadersNotAnObject)?;

    let mut headers = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let value = value.as_str().ok_or(ConfigError::HeadersNotAnObject)?;
        if key.chars().count() > MAX_HEADER_KEY_LENGTH {
            return Err(ConfigError::HeaderEntryTooLong {
                key: key.clone(),
                reason: format!("name exceeds {MAX_HEADER_KEY_LENGTH} characters"),
            });
        }
        if value.chars().count() > MAX_HEADER_VALUE_LENGTH {
            return Err(ConfigError::HeaderEntryTooLong {
                key: key.clone(),
                reason: format!("value exceeds {MAX_HEADER_VALUE_LENGTH} characters"),
            });
        }
        headers.insert(key.clone(), value.to_string());
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_headers_that_are_not_a_json_object() {
        assert!(matches!(parse_headers("[1, 2]"), Err(ConfigError::HeadersNotAnObject)));
    }

    #[test]
    fn rejects_oversized_header_value() {
        let raw = format!(r#"{{"X-Test": "{}"}}"#, "a".repeat(1001));
        assert!(matches!(parse_headers(&raw), Err(ConfigError::HeaderEntryTooLong { .. })));
    }

    #[test]
    fn accepts_well_formed_headers() {
        let headers = parse_headers(r#"{"X-Api-Key": "secret"}"#).unwrap();
        assert_eq!(headers.get("X-Api-Key"), Some(&"secret".to_string()));
    }
}
