//! Cookie types.
//!
//! Cookies round-trip between the client and the remote browser, so the
//! [`Cookie`] shape is passthrough in both directions: fields the client
//! does not model are preserved on the parsed value and sent back
//! unmodified.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// SameSite
// ============================================================================

/// Cookie same-site policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    /// Sent on top-level navigations and same-site requests.
    Lax,
    /// Sent on same-site requests only.
    Strict,
    /// Sent on all requests (requires `secure`).
    None,
}

// ============================================================================
// Cookie
// ============================================================================

/// One browser cookie.
///
/// Unknown fields are preserved in `extra` rather than discarded, so
/// cookies fetched from the server survive a set-cookies round trip even
/// when the server models attributes this client does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Cookie name.
    pub name: String,

    /// Cookie value.
    pub value: String,

    /// Domain the cookie applies to.
    pub domain: String,

    /// Path the cookie applies to.
    pub path: String,

    /// Inaccessible to page scripts.
    pub http_only: bool,

    /// Expiry as a unix timestamp in seconds (absent for session cookies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,

    /// Host-only cookie (no subdomain matching).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_only: Option<bool>,

    /// Same-site policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,

    /// Sent over HTTPS only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    /// Session cookie (cleared when the browser closes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<bool>,

    /// Cookie store identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,

    /// Partition key for partitioned cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cookie {
    /// Creates a cookie with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: path.into(),
            http_only: false,
            expires: None,
            host_only: None,
            same_site: None,
            secure: None,
            session: None,
            store_id: None,
            partition_key: None,
            extra: Map::new(),
        }
    }

    /// Marks the cookie as HTTP-only.
    #[inline]
    #[must_use]
    pub const fn with_http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Marks the cookie as secure.
    #[inline]
    #[must_use]
    pub const fn with_secure(mut self) -> Self {
        self.secure = Some(true);
        self
    }

    /// Sets the same-site policy.
    #[inline]
    #[must_use]
    pub const fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Sets the expiry as a unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub const fn with_expires(mut self, expires: f64) -> Self {
        self.expires = Some(expires);
        self
    }
}

// ============================================================================
// SetCookiesRequest
// ============================================================================

/// Request body for `POST {id}/cookies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetCookiesRequest {
    /// Cookies to install in the session's browser.
    pub cookies: Vec<Cookie>,
}

impl SetCookiesRequest {
    /// Wraps a cookie list.
    #[inline]
    #[must_use]
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }

    /// Validates constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestValidation`] if the cookie list is empty.
    pub fn validate(&self) -> Result<()> {
        if self.cookies.is_empty() {
            return Err(Error::request_validation(
                "`cookies` must contain at least one cookie",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Cookie Responses
// ============================================================================

/// Response for `POST {id}/cookies`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCookiesResponse {
    /// Whether all cookies were installed.
    pub success: bool,

    /// Optional server-side detail.
    #[serde(default)]
    pub message: Option<String>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response for `GET {id}/cookies`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetCookiesResponse {
    /// Cookies currently held by the session's browser.
    pub cookies: Vec<Cookie>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_cookie_minimal_serialization() {
        let cookie = Cookie::new("sid", "abc", "example.com", "/");
        let value = serde_json::to_value(&cookie).expect("serialize");
        assert_eq!(
            value,
            json!({
                "name": "sid",
                "value": "abc",
                "domain": "example.com",
                "path": "/",
                "httpOnly": false,
            })
        );
    }

    #[test]
    fn test_cookie_builder() {
        let cookie = Cookie::new("sid", "abc", "example.com", "/")
            .with_http_only()
            .with_secure()
            .with_same_site(SameSite::Lax)
            .with_expires(1_735_689_600.0);

        assert!(cookie.http_only);
        assert_eq!(cookie.secure, Some(true));
        assert_eq!(cookie.same_site, Some(SameSite::Lax));
    }

    #[test]
    fn test_unknown_fields_preserved_round_trip() {
        let raw = json!({
            "name": "sid",
            "value": "abc",
            "domain": "example.com",
            "path": "/",
            "httpOnly": true,
            "priority": "High",
        });

        let cookie: Cookie = serde_json::from_value(raw.clone()).expect("parse");
        assert_eq!(cookie.extra.get("priority"), Some(&json!("High")));

        let back = serde_json::to_value(&cookie).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn test_same_site_wire_names() {
        assert_eq!(serde_json::to_string(&SameSite::Lax).unwrap(), r#""lax""#);
        assert_eq!(
            serde_json::to_string(&SameSite::Strict).unwrap(),
            r#""strict""#
        );
        assert_eq!(serde_json::to_string(&SameSite::None).unwrap(), r#""none""#);
    }

    #[test]
    fn test_set_cookies_rejects_empty() {
        let request = SetCookiesRequest::new(Vec::new());
        assert!(request.validate().is_err());

        let request = SetCookiesRequest::new(vec![Cookie::new("a", "b", "c", "/")]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_set_cookies_request_is_strict() {
        let result = serde_json::from_value::<SetCookiesRequest>(json!({
            "cookies": [],
            "unexpected": true,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_get_cookies_response_parses() {
        let response: GetCookiesResponse = serde_json::from_value(json!({
            "cookies": [{
                "name": "sid",
                "value": "abc",
                "domain": "example.com",
                "path": "/",
                "httpOnly": false,
            }],
        }))
        .expect("parse");
        assert_eq!(response.cookies.len(), 1);
        assert_eq!(response.cookies[0].name, "sid");
    }
}
