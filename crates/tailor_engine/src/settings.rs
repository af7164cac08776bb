use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when `TAILOR_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Environment variable naming the tailoring service base URL.
pub const BASE_URL_ENV: &str = "TAILOR_API_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid base url {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailorSettings {
    /// Scheme, host and optional path prefix, without a trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TailorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl TailorSettings {
    /// Loads `.env` if present, then reads `TAILOR_API_URL`.
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        match lookup(BASE_URL_ENV) {
            Some(raw) if !raw.trim().is_empty() => Self::with_base_url(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_base_url(raw: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: normalize_base_url(raw)?,
            ..Self::default()
        })
    }

    /// Absolute URL of an endpoint below the base, e.g. `tailor`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| SettingsError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{SettingsError, TailorSettings, BASE_URL_ENV, DEFAULT_BASE_URL};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_backend_with_sixty_second_timeout() {
        let settings = TailorSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn blank_variable_falls_back_to_default() {
        let settings = TailorSettings::from_lookup(lookup_from(&[(BASE_URL_ENV, "  ")])).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let settings =
            TailorSettings::from_lookup(lookup_from(&[(BASE_URL_ENV, "https://api.example.com/v1//")]))
                .unwrap();
        assert_eq!(settings.base_url, "https://api.example.com/v1");
        assert_eq!(settings.endpoint("tailor"), "https://api.example.com/v1/tailor");
        assert_eq!(settings.endpoint("/health"), "https://api.example.com/v1/health");
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(matches!(
            TailorSettings::with_base_url("ftp://example.com"),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            TailorSettings::with_base_url("not a url"),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
    }
}
