//! Client credentials and connection configuration.
//!
//! [`ClientOptions`] is the fluent entry point; [`ClientOptions::resolve`]
//! turns it into an immutable [`ClientConfig`], pulling missing values from
//! the environment and hardcoded defaults.
//!
//! # Example
//!
//! ```no_run
//! use notte_client::ClientOptions;
//!
//! # fn example() -> notte_client::Result<()> {
//! let config = ClientOptions::new()
//!     .with_api_key("sk-notte-...")
//!     .with_timeout_secs(30)
//!     .resolve()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default API server.
pub const DEFAULT_SERVER_URL: &str = "https://api.notte.cc";

/// Development server for a locally running API.
pub const LOCAL_SERVER_URL: &str = "http://localhost:8000";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "NOTTE_API_KEY";

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "NOTTE_SERVER_URL";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// ClientOptions
// ============================================================================

/// Options for constructing a client.
///
/// Unset fields resolve from the environment ([`API_KEY_ENV`],
/// [`SERVER_URL_ENV`]) and then the hardcoded defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Explicit API key, overriding the environment.
    api_key: Option<String>,
    /// Explicit server URL, overriding the environment and default.
    server_url: Option<String>,
    /// Per-request timeout, overriding the default.
    timeout: Option<Duration>,
}

// ============================================================================
// ClientOptions - Builder Methods
// ============================================================================

impl ClientOptions {
    /// Creates options with no explicit configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the server base URL.
    #[inline]
    #[must_use]
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    /// Targets a locally running API server ([`LOCAL_SERVER_URL`]).
    #[inline]
    #[must_use]
    pub fn with_local_server(self) -> Self {
        self.with_server_url(LOCAL_SERVER_URL)
    }

    /// Sets the per-request timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the per-request timeout in whole seconds.
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }
}

// ============================================================================
// ClientOptions - Resolution
// ============================================================================

impl ClientOptions {
    /// Resolves the options into an immutable [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no API key is set and [`API_KEY_ENV`] is
    ///   absent or empty
    /// - [`Error::Config`] if the server URL is not a valid absolute URL
    pub fn resolve(self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "{API_KEY_ENV} needs to be provided. \
                     Pass it explicitly with ClientOptions::with_api_key() \
                     or set the {API_KEY_ENV} environment variable."
                ))
            })?;

        let server_url = self
            .server_url
            .or_else(|| env::var(SERVER_URL_ENV).ok())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Url::parse(&server_url)
            .map_err(|e| Error::config(format!("invalid server URL `{server_url}`: {e}")))?;

        // Stored without a trailing slash so URL building stays uniform.
        let server_url = server_url.trim_end_matches('/').to_string();

        Ok(ClientConfig {
            api_key,
            server_url,
            timeout: self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }
}

// ============================================================================
// ClientConfig
// ============================================================================

/// Resolved, immutable client configuration.
///
/// Created once per client instance and shared by all requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token for the API.
    api_key: String,
    /// Server base URL, no trailing slash.
    server_url: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl ClientConfig {
    /// Returns the API key.
    #[inline]
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the server base URL (no trailing slash).
    #[inline]
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Returns the per-request timeout.
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_api_key() {
        let config = ClientOptions::new()
            .with_api_key("sk-test")
            .resolve()
            .expect("resolve");
        assert_eq!(config.api_key(), "sk-test");
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = ClientOptions::new().with_api_key("").resolve();
        assert!(result.is_err());
        assert!(result.unwrap_err().is_client_error());
    }

    #[test]
    fn test_explicit_server_url_overrides_default() {
        let config = ClientOptions::new()
            .with_api_key("sk-test")
            .with_server_url("http://127.0.0.1:9999/")
            .resolve()
            .expect("resolve");
        // Trailing slash is normalized away.
        assert_eq!(config.server_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_local_server() {
        let config = ClientOptions::new()
            .with_api_key("sk-test")
            .with_local_server()
            .resolve()
            .expect("resolve");
        assert_eq!(config.server_url(), LOCAL_SERVER_URL);
    }

    #[test]
    fn test_invalid_server_url_rejected() {
        let result = ClientOptions::new()
            .with_api_key("sk-test")
            .with_server_url("not a url")
            .resolve();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_timeout_override() {
        let config = ClientOptions::new()
            .with_api_key("sk-test")
            .with_timeout_secs(5)
            .resolve()
            .expect("resolve");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_api_key_from_environment() {
        // Sole test touching the process environment; set and restore here
        // to avoid interleaving with other tests.
        unsafe { env::set_var(API_KEY_ENV, "sk-from-env") };
        let result = ClientOptions::new().resolve();
        unsafe { env::remove_var(API_KEY_ENV) };

        let config = result.expect("resolve");
        assert_eq!(config.api_key(), "sk-from-env");
    }
}
