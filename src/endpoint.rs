//! Endpoint descriptors.
//!
//! An [`Endpoint`] bundles everything one API call needs: the relative
//! path, the HTTP verb, an optional JSON body, optional query parameters,
//! and the expected response type as a marker. Descriptors are built fresh
//! per call, never mutated afterwards, and consumed exactly once by the
//! base client.

// ============================================================================
// Imports
// ============================================================================

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

// ============================================================================
// Method
// ============================================================================

/// HTTP verb for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request; never carries a body.
    Get,
    /// POST request; may carry a JSON body.
    Post,
    /// DELETE request; never carries a body.
    Delete,
    /// PATCH request; may carry a JSON body.
    Patch,
}

impl Method {
    /// Returns the verb as an HTTP method string.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Returns `true` if this verb sends a request body when one is set.
    #[inline]
    #[must_use]
    pub const fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// Descriptor for a single API call with response type `T`.
#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    /// Path relative to the client's domain prefix. May be empty.
    path: String,
    /// HTTP verb.
    method: Method,
    /// JSON body, sent only for verbs that allow one.
    body: Option<Value>,
    /// Query parameters as string-coerced pairs.
    query: Vec<(String, String)>,
    /// Expected response type.
    _response: PhantomData<T>,
}

// ============================================================================
// Endpoint - Constructors
// ============================================================================

impl<T> Endpoint<T> {
    /// Creates a descriptor for the given verb and relative path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            query: Vec::new(),
            _response: PhantomData,
        }
    }

    /// Creates a GET descriptor.
    #[inline]
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST descriptor.
    #[inline]
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a DELETE descriptor.
    #[inline]
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Creates a PATCH descriptor.
    #[inline]
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }
}

// ============================================================================
// Endpoint - Builder Methods
// ============================================================================

impl<T> Endpoint<T> {
    /// Attaches a JSON body serialized from a request model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestValidation`] if the model cannot be
    /// serialized, before any network I/O.
    pub fn with_body(mut self, body: &impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::request_validation(format!("unserializable request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attaches pre-coerced query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

// ============================================================================
// Endpoint - Accessors
// ============================================================================

impl<T> Endpoint<T> {
    /// Returns the relative path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP verb.
    #[inline]
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the JSON body, if any.
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the query parameters.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Body {
        name: String,
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }

    #[test]
    fn test_method_allows_body() {
        assert!(Method::Post.allows_body());
        assert!(Method::Patch.allows_body());
        assert!(!Method::Get.allows_body());
        assert!(!Method::Delete.allows_body());
    }

    #[test]
    fn test_constructors_set_verb() {
        assert_eq!(Endpoint::<()>::get("a").method(), Method::Get);
        assert_eq!(Endpoint::<()>::post("a").method(), Method::Post);
        assert_eq!(Endpoint::<()>::delete("a").method(), Method::Delete);
        assert_eq!(Endpoint::<()>::patch("a").method(), Method::Patch);
    }

    #[test]
    fn test_with_body_serializes() {
        let endpoint = Endpoint::<()>::post("start")
            .with_body(&Body {
                name: "test".into(),
            })
            .expect("serialize");

        assert_eq!(endpoint.body(), Some(&json!({"name": "test"})));
    }

    #[test]
    fn test_with_query() {
        let endpoint = Endpoint::<()>::get("").with_query(vec![
            ("only_active".into(), "true".into()),
            ("page".into(), "2".into()),
        ]);

        assert_eq!(endpoint.query().len(), 2);
        assert_eq!(endpoint.query()[0].0, "only_active");
    }

    #[test]
    fn test_default_has_no_body_or_query() {
        let endpoint = Endpoint::<()>::get("sessions");
        assert!(endpoint.body().is_none());
        assert!(endpoint.query().is_empty());
        assert_eq!(endpoint.path(), "sessions");
    }
}
