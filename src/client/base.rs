//! Base HTTP execution layer.
//!
//! [`BaseClient`] owns the resolved configuration and the HTTP transport.
//! It builds URLs and headers, executes endpoint descriptors with the
//! configured timeout, classifies failures, and normalizes list-shaped
//! responses. Domain clients layer on top and never touch the transport
//! directly.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Header carrying the SDK version on every request.
pub const SDK_VERSION_HEADER: &str = "x-notte-sdk-version";

/// Header identifying the SDK flavor on every request.
pub const SDK_SOURCE_HEADER: &str = "x-notte-source";

/// Value of [`SDK_SOURCE_HEADER`].
pub const SDK_SOURCE: &str = "notte-client-rs";

/// Liveness probe path, relative to the server root.
const HEALTH_PATH: &str = "health";

// ============================================================================
// URL Building
// ============================================================================

/// Joins URL segments with exactly one slash between non-empty parts,
/// regardless of leading/trailing slashes on any of them.
fn join_url(parts: &[&str]) -> String {
    let mut url = String::new();
    for part in parts {
        let part = part.trim_matches('/');
        if part.is_empty() {
            continue;
        }
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(part);
    }
    url
}

// ============================================================================
// BaseClient
// ============================================================================

/// Shared HTTP execution layer for domain clients.
///
/// Cheap to clone: configuration is shared behind an `Arc` and the
/// transport pools connections internally. Concurrent calls on one
/// instance do not interfere; each call owns its own timeout.
#[derive(Debug, Clone)]
pub struct BaseClient {
    /// Resolved, immutable configuration.
    config: Arc<ClientConfig>,
    /// HTTP transport.
    http: reqwest::Client,
    /// Domain prefix inserted between the server URL and endpoint paths.
    base_path: Option<&'static str>,
}

// ============================================================================
// BaseClient - Construction
// ============================================================================

impl BaseClient {
    /// Creates a base client for the given domain prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP transport cannot be built.
    pub fn new(config: Arc<ClientConfig>, base_path: Option<&'static str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP transport: {e}")))?;

        Ok(Self {
            config,
            http,
            base_path,
        })
    }

    /// Returns the resolved configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

// ============================================================================
// BaseClient - URL & Path Building
// ============================================================================

impl BaseClient {
    /// Builds the absolute URL for an endpoint path.
    ///
    /// Produces exactly one slash between segments whatever combination of
    /// leading/trailing slashes the parts carry; an empty relative path
    /// yields the bare domain URL.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        join_url(&[
            self.config.server_url(),
            self.base_path.unwrap_or_default(),
            path,
        ])
    }

    /// Returns the request path (domain prefix + relative path) used to
    /// tag errors and logs.
    #[must_use]
    fn request_path(&self, path: &str) -> String {
        join_url(&[self.base_path.unwrap_or_default(), path])
    }
}

// ============================================================================
// BaseClient - Execution
// ============================================================================

impl BaseClient {
    /// Executes an endpoint descriptor and returns the raw JSON body.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the request exceeds the configured timeout
    /// - [`Error::Transport`] for any other transport failure, unchanged
    /// - [`Error::Api`] for a non-success HTTP status, carrying the
    ///   parsed-or-raw error body and the request path
    /// - [`Error::ResponseValidation`] if a success body is not valid JSON
    pub async fn execute<T>(&self, endpoint: &Endpoint<T>) -> Result<Value> {
        let url = self.build_url(endpoint.path());
        let path = self.request_path(endpoint.path());
        debug!(method = endpoint.method().as_str(), path = %path, "Issuing API request");

        let mut request = self
            .http
            .request(endpoint.method().into(), &url)
            .bearer_auth(self.config.api_key())
            .header(CONTENT_TYPE, "application/json")
            .header(SDK_VERSION_HEADER, env!("CARGO_PKG_VERSION"))
            .header(SDK_SOURCE_HEADER, SDK_SOURCE)
            .timeout(self.config.timeout());

        if !endpoint.query().is_empty() {
            request = request.query(endpoint.query());
        }

        if endpoint.method().allows_body()
            && let Some(body) = endpoint.body()
        {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.classify_transport(e, &path))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e, &path))?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(Error::api(status.as_u16(), body, path));
        }

        debug!(status = status.as_u16(), path = %path, "API request succeeded");
        serde_json::from_str(&text)
            .map_err(|e| Error::response_validation(path, format!("body is not valid JSON: {e}")))
    }

    /// Maps a transport failure: timeouts become the sentinel timeout
    /// error, everything else propagates unchanged.
    fn classify_transport(&self, err: reqwest::Error, path: &str) -> Error {
        if err.is_timeout() {
            Error::request_timeout(path, self.config.timeout().as_millis() as u64)
        } else {
            Error::Transport(err)
        }
    }
}

// ============================================================================
// BaseClient - Typed Requests
// ============================================================================

impl BaseClient {
    /// Executes an endpoint and validates the body as a single `T`.
    ///
    /// # Errors
    ///
    /// [`Error::ResponseValidation`] if the body does not match `T`, plus
    /// everything [`BaseClient::execute`] can return.
    pub async fn request_one<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<T> {
        let raw = self.execute(endpoint).await?;
        let path = self.request_path(endpoint.path());
        serde_json::from_value(raw).map_err(|e| Error::response_validation(path, e.to_string()))
    }

    /// Executes an endpoint and validates the body as a list of `T`.
    ///
    /// Accepts either a raw JSON array or an object exposing an `items`
    /// array; item order is preserved from the server's response.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedResponse`] for any other top-level shape;
    /// [`Error::ResponseValidation`] if an item does not match `T`.
    pub async fn request_many<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<T>,
    ) -> Result<Vec<T>> {
        let raw = self.execute(endpoint).await?;
        let path = self.request_path(endpoint.path());

        let items = normalize_list(raw, &path)?;
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| Error::response_validation(path.clone(), e.to_string()))
            })
            .collect()
    }
}

// ============================================================================
// BaseClient - Health Probe
// ============================================================================

impl BaseClient {
    /// Probes the server's `/health` endpoint.
    ///
    /// Sends SDK identification headers only; the probe requires no
    /// credentials and ignores the domain prefix.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on any non-success status; [`Error::Timeout`] /
    /// [`Error::Transport`] as for data calls.
    pub async fn health_check(&self) -> Result<()> {
        let url = join_url(&[self.config.server_url(), HEALTH_PATH]);
        debug!(url = %url, "Probing server health");

        let response = self
            .http
            .get(&url)
            .header(SDK_VERSION_HEADER, env!("CARGO_PKG_VERSION"))
            .header(SDK_SOURCE_HEADER, SDK_SOURCE)
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| self.classify_transport(e, HEALTH_PATH))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| self.classify_transport(e, HEALTH_PATH))?;
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(Error::api(status.as_u16(), body, HEALTH_PATH));
        }

        Ok(())
    }
}

// ============================================================================
// List Normalization
// ============================================================================

/// Normalizes a list-endpoint body into its items.
fn normalize_list(raw: Value, path: &str) -> Result<Vec<Value>> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => {
                map.insert("items".to_string(), other);
                Err(Error::unexpected_response(path, Value::Object(map)))
            }
            None => Err(Error::unexpected_response(path, Value::Object(map))),
        },
        other => Err(Error::unexpected_response(path, other)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::config::ClientOptions;

    fn client(server_url: &str, base_path: Option<&'static str>) -> BaseClient {
        let config = ClientOptions::new()
            .with_api_key("sk-test")
            .with_server_url(server_url)
            .resolve()
            .expect("resolve");
        BaseClient::new(Arc::new(config), base_path).expect("client")
    }

    // ------------------------------------------------------------------------
    // URL Building Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_build_url_simple() {
        let client = client("https://api.notte.cc", Some("sessions"));
        assert_eq!(
            client.build_url("start"),
            "https://api.notte.cc/sessions/start"
        );
    }

    #[test]
    fn test_build_url_normalizes_slashes() {
        let client = client("https://api.notte.cc///", Some("sessions"));
        assert_eq!(
            client.build_url("/abc/stop/"),
            "https://api.notte.cc/sessions/abc/stop"
        );
    }

    #[test]
    fn test_build_url_empty_path_yields_domain_root() {
        let client = client("https://api.notte.cc", Some("sessions"));
        assert_eq!(client.build_url(""), "https://api.notte.cc/sessions");
    }

    #[test]
    fn test_build_url_without_prefix() {
        let client = client("http://localhost:8000", None);
        assert_eq!(client.build_url("health"), "http://localhost:8000/health");
        assert_eq!(client.build_url(""), "http://localhost:8000");
    }

    #[test]
    fn test_request_path_excludes_server() {
        let client = client("https://api.notte.cc", Some("sessions"));
        assert_eq!(client.request_path("abc/stop"), "sessions/abc/stop");
        assert_eq!(client.request_path(""), "sessions");
    }

    // ------------------------------------------------------------------------
    // List Normalization Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_normalize_list_raw_array_preserves_order() {
        let items = normalize_list(json!([{"i": 1}, {"i": 2}, {"i": 3}]), "sessions")
            .expect("normalize");
        assert_eq!(items, vec![json!({"i": 1}), json!({"i": 2}), json!({"i": 3})]);
    }

    #[test]
    fn test_normalize_list_items_object() {
        let items =
            normalize_list(json!({"items": [{"i": 1}], "page": 1}), "sessions").expect("normalize");
        assert_eq!(items, vec![json!({"i": 1})]);
    }

    #[test]
    fn test_normalize_list_rejects_other_shapes() {
        for raw in [json!({"data": []}), json!({"items": "nope"}), json!(42)] {
            let err = normalize_list(raw, "sessions").expect_err("shape must be rejected");
            assert_eq!(err.status(), Some(0));
            assert!(matches!(err, Error::UnexpectedResponse { .. }));
        }
    }
}
