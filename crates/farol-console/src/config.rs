//! Console configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default                 |
//! |------------------------------|-------------------------|
//! | `FAROL_API_URL`              | `http://localhost:3333` |
//! | `FAROL_INTERNAL_API_URL`     | unset                   |
//! | `FAROL_REQUEST_TIMEOUT_SECS` | `30`                    |
//! | `FAROL_SESSION_COOKIE`       | `refreshToken`          |

use std::env;
use std::time::Duration;

use reqwest::Url;

/// Backend address used when `FAROL_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Cookie the login flow stores the session token in.
pub const DEFAULT_SESSION_COOKIE: &str = "refreshToken";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Public backend base URL (what the browser talks to)
    pub api_url: Url,

    /// Server-side backend base URL, when the console runs next to the API
    pub internal_api_url: Option<Url>,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Name of the session cookie
    pub session_cookie: String,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// ```rust
    /// use farol_console::config::ConsoleConfig;
    ///
    /// let config = ConsoleConfig::from_lookup(|name| match name {
    ///     "FAROL_API_URL" => Some("https://api.techcar.com.br".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.api_url.as_str(), "https://api.techcar.com.br/");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = parse_base_url(
            "FAROL_API_URL",
            &non_blank("FAROL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let internal_api_url = non_blank("FAROL_INTERNAL_API_URL")
            .map(|raw| parse_base_url("FAROL_INTERNAL_API_URL", &raw))
            .transpose()?;

        let timeout_secs: u64 = non_blank("FAROL_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("FAROL_REQUEST_TIMEOUT_SECS".to_string()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "FAROL_REQUEST_TIMEOUT_SECS".to_string(),
            ));
        }

        let session_cookie = non_blank("FAROL_SESSION_COOKIE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());
        if session_cookie.contains(['=', ';', ' ']) {
            return Err(ConfigError::InvalidValue("FAROL_SESSION_COOKIE".to_string()));
        }

        Ok(ConsoleConfig {
            api_url,
            internal_api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            session_cookie,
        })
    }

    /// Base URL for server actions: the internal one when configured.
    pub fn server_api_url(&self) -> &Url {
        self.internal_api_url.as_ref().unwrap_or(&self.api_url)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            internal_api_url: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidValue(name.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.server_api_url().as_str(), "http://localhost:3333/");
        assert_eq!(config.session_cookie, "refreshToken");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_internal_url_preferred() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("FAROL_API_URL", "https://api.techcar.com.br"),
            ("FAROL_INTERNAL_API_URL", "http://backend:3333"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.techcar.com.br/");
        assert_eq!(config.server_api_url().as_str(), "http://backend:3333/");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("FAROL_API_URL", "  "),
            ("FAROL_SESSION_COOKIE", ""),
        ]))
        .unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            ConsoleConfig::from_lookup(lookup(&[("FAROL_API_URL", "localhost:3333")])),
            Err(ConfigError::InvalidValue("FAROL_API_URL".to_string()))
        );
        assert_eq!(
            ConsoleConfig::from_lookup(lookup(&[("FAROL_API_URL", "ftp://files.local")])),
            Err(ConfigError::InvalidValue("FAROL_API_URL".to_string()))
        );
        assert_eq!(
            ConsoleConfig::from_lookup(lookup(&[("FAROL_REQUEST_TIMEOUT_SECS", "abc")])),
            Err(ConfigError::InvalidValue(
                "FAROL_REQUEST_TIMEOUT_SECS".to_string()
            ))
        );
        assert_eq!(
            ConsoleConfig::from_lookup(lookup(&[("FAROL_REQUEST_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidValue(
                "FAROL_REQUEST_TIMEOUT_SECS".to_string()
            ))
        );
        assert!(ConsoleConfig::from_lookup(lookup(&[("FAROL_SESSION_COOKIE", "a=b")])).is_err());
    }
}
