//! Page operation request and response models.
//!
//! Every page response embeds the session's current snapshot, which the
//! session handle uses to refresh its cached state.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::session::SessionResponse;

// ============================================================================
// ScrapeRequest
// ============================================================================

/// Options for `POST {id}/page/scrape`.
///
/// The fully empty body is valid and scrapes the current page with the
/// service defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeRequest {
    /// Navigate here before scraping (current page when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Strip navigation chrome and keep the main content only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,

    /// Return image references only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_images: Option<bool>,

    /// Natural-language extraction instructions for structured output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ScrapeRequest {
    /// Creates an empty request (service defaults).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL to navigate to before scraping.
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Restricts output to the main content.
    #[inline]
    #[must_use]
    pub const fn with_only_main_content(mut self, only_main_content: bool) -> Self {
        self.only_main_content = Some(only_main_content);
        self
    }

    /// Sets extraction instructions.
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

// ============================================================================
// ScrapeResponse
// ============================================================================

/// Response for `POST {id}/page/scrape`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    /// Session snapshot at the time of the scrape.
    pub session: SessionResponse,

    /// Page content rendered as markdown.
    #[serde(default)]
    pub markdown: Option<String>,

    /// Structured data extracted per the request instructions.
    #[serde(default)]
    pub structured: Option<Value>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// ObserveRequest
// ============================================================================

/// Options for `POST {id}/page/observe`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserveRequest {
    /// Navigate here before observing (current page when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Natural-language hint narrowing the observed action space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ObserveRequest {
    /// Creates an empty request (service defaults).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL to navigate to before observing.
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the observation instructions.
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

// ============================================================================
// ObserveResponse
// ============================================================================

/// Current page metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMetadata {
    /// Page URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Page title.
    #[serde(default)]
    pub title: Option<String>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response for `POST {id}/page/observe`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObserveResponse {
    /// Session snapshot at the time of the observation.
    pub session: SessionResponse,

    /// Current page metadata.
    #[serde(default)]
    pub metadata: Option<PageMetadata>,

    /// Action space: elements the page currently exposes for execution.
    #[serde(default)]
    pub space: Option<Value>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// ExecuteResponse
// ============================================================================

/// Response for `POST {id}/page/execute`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    /// Session snapshot after the action ran.
    pub session: SessionResponse,

    /// Whether the action succeeded.
    pub success: bool,

    /// Server-side detail about the action outcome.
    #[serde(default)]
    pub message: Option<String>,

    /// Action-specific payload.
    #[serde(default)]
    pub data: Option<Value>,

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

    fn snapshot() -> Value {
        json!({"session_id": "sess_1", "status": "active"})
    }

    #[test]
    fn test_scrape_request_empty_body() {
        let value = serde_json::to_value(ScrapeRequest::new()).expect("serialize");
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_scrape_request_builder() {
        let request = ScrapeRequest::new()
            .with_url("https://example.com")
            .with_only_main_content(true);
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({"url": "https://example.com", "only_main_content": true})
        );
    }

    #[test]
    fn test_scrape_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<ScrapeRequest>(json!({"only_main": true}));
        assert!(result.is_err());
    }

    #[test]
    fn test_scrape_response_embeds_snapshot() {
        let response: ScrapeResponse = serde_json::from_value(json!({
            "session": snapshot(),
            "markdown": "# Example",
        }))
        .expect("parse");

        assert_eq!(response.session.session_id, "sess_1");
        assert_eq!(response.markdown.as_deref(), Some("# Example"));
        assert!(response.structured.is_none());
    }

    #[test]
    fn test_observe_response_parses_metadata_and_space() {
        let response: ObserveResponse = serde_json::from_value(json!({
            "session": snapshot(),
            "metadata": {"url": "https://example.com", "title": "Example"},
            "space": {"actions": []},
        }))
        .expect("parse");

        let metadata = response.metadata.expect("metadata");
        assert_eq!(metadata.title.as_deref(), Some("Example"));
        assert!(response.space.is_some());
    }

    #[test]
    fn test_execute_response_requires_success() {
        let result = serde_json::from_value::<ExecuteResponse>(json!({"session": snapshot()}));
        assert!(result.is_err());

        let response: ExecuteResponse = serde_json::from_value(json!({
            "session": snapshot(),
            "success": true,
            "message": "navigated",
        }))
        .expect("parse");
        assert!(response.success);
    }

    #[test]
    fn test_response_passthrough_extra() {
        let response: ScrapeResponse = serde_json::from_value(json!({
            "session": snapshot(),
            "screenshots": ["s3://..."],
        }))
        .expect("parse");
        assert!(response.extra.contains_key("screenshots"));
    }
}
