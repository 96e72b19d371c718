//! Client configuration, built from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Default backend base URL (the Flask dev server port).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the polish/send backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout for backend calls.
    pub request_timeout: Duration,
    /// How long an ordinary toast stays visible.
    pub toast_duration: Duration,
    /// How long the "sent" toast stays visible.
    pub send_toast_duration: Duration,
    /// Delay between a successful send and the form reset.
    pub reset_delay: Duration,
    /// Where the theme preference is persisted. `None` keeps it in memory.
    pub theme_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            toast_duration: Duration::from_millis(3000),
            send_toast_duration: Duration::from_millis(4000),
            reset_delay: Duration::from_millis(2000),
            theme_path: Some(PathBuf::from("./data/theme")),
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Numeric values that fail to parse fall back to their defaults. The
    /// base URL must be an `http` or `https` URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = match std::env::var("MAIL_POLISH_BASE_URL") {
            Ok(url) => normalize_base_url(&url)?,
            Err(_) => defaults.base_url,
        };

        let request_timeout = env_u64("MAIL_POLISH_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let toast_duration = env_u64("MAIL_POLISH_TOAST_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.toast_duration);

        let send_toast_duration = env_u64("MAIL_POLISH_SEND_TOAST_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.send_toast_duration);

        let reset_delay = env_u64("MAIL_POLISH_RESET_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.reset_delay);

        // Set but empty means "do not persist".
        let theme_path = match std::env::var("MAIL_POLISH_THEME_PATH") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => defaults.theme_path,
        };

        Ok(Self {
            base_url,
            request_timeout,
            toast_duration,
            send_toast_duration,
            reset_delay,
            theme_path,
        })
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Validate a backend base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: "MAIL_POLISH_BASE_URL".into(),
        message,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(format!("{raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("expected an http(s) URL, got {raw:?}")));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("{raw:?} has no host")));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_timings() {
        let config = ClientConfig::default();
        assert_eq!(config.toast_duration, Duration::from_millis(3000));
        assert_eq!(config.send_toast_duration, Duration::from_millis(4000));
        assert_eq!(config.reset_delay, Duration::from_millis(2000));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        assert_eq!(
            normalize_base_url("https://polish.example.com/").unwrap(),
            "https://polish.example.com"
        );
    }

    #[test]
    fn base_url_without_scheme_rejected() {
        let err = normalize_base_url("polish.example.com").unwrap_err();
        assert!(err.to_string().contains("MAIL_POLISH_BASE_URL"));
    }

    #[test]
    fn base_url_scheme_only_rejected() {
        assert!(normalize_base_url("http://").is_err());
    }

    #[test]
    fn base_url_must_parse() {
        assert!(normalize_base_url("http://exa mple.com").is_err());
        assert!(normalize_base_url("http://[::1").is_err());
    }

    #[test]
    fn base_url_non_http_scheme_rejected() {
        let err = normalize_base_url("ftp://polish.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        let err: crate::error::Error = err.into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(normalize_base_url("mailto:bob@example.org").is_err());
    }

    #[test]
    fn base_url_keeps_port_and_path() {
        assert_eq!(
            normalize_base_url(" http://127.0.0.1:5000 ").unwrap(),
            "http://127.0.0.1:5000"
        );
        assert_eq!(
            normalize_base_url("https://example.com/polish/").unwrap(),
            "https://example.com/polish"
        );
    }
}
