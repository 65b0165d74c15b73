//! Session request and response models.
//!
//! Requests are strict: unknown fields fail validation before any network
//! I/O. Responses are passthrough: fields the server adds later are kept
//! on the parsed value.

// ============================================================================
// Imports
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::proxy::ProxySettings;

// ============================================================================
// BrowserType
// ============================================================================

/// Browser engine backing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Headless Chromium (service default).
    #[default]
    Chromium,
    /// Branded Chrome.
    Chrome,
    /// Firefox.
    Firefox,
}

// ============================================================================
// Viewport
// ============================================================================

/// Browser viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// SessionStatus
// ============================================================================

/// Server-reported session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is running and accepting page operations.
    Active,
    /// Session was stopped by the client.
    Closed,
    /// Session terminated with a server-side error.
    Error,
    /// Session exceeded its idle timeout or max duration.
    TimedOut,
}

impl SessionStatus {
    /// Returns `true` if the session still accepts page operations.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` for any terminal status.
    #[inline]
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        !self.is_active()
    }
}

// ============================================================================
// SessionStartRequest
// ============================================================================

/// Options for `POST sessions/start`.
///
/// Every field is optional; the fully empty body is valid and yields the
/// service defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionStartRequest {
    /// Run the browser without a visible window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,

    /// Idle timeout in minutes before the server reclaims the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_minutes: Option<u32>,

    /// Hard cap on session lifetime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_minutes: Option<u32>,

    /// Browser engine to launch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_type: Option<BrowserType>,

    /// Viewport dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    /// Proxy configuration, in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<ProxySettings>>,
}

// ============================================================================
// SessionStartRequest - Builder Methods
// ============================================================================

impl SessionStartRequest {
    /// Creates an empty request (service defaults).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    /// Sets the idle timeout in minutes.
    #[inline]
    #[must_use]
    pub const fn with_timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    /// Sets the maximum session duration in minutes.
    #[inline]
    #[must_use]
    pub const fn with_max_duration_minutes(mut self, minutes: u32) -> Self {
        self.max_duration_minutes = Some(minutes);
        self
    }

    /// Sets the browser engine.
    #[inline]
    #[must_use]
    pub const fn with_browser_type(mut self, browser_type: BrowserType) -> Self {
        self.browser_type = Some(browser_type);
        self
    }

    /// Sets the viewport dimensions.
    #[inline]
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some(Viewport::new(width, height));
        self
    }

    /// Adds a proxy configuration.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxySettings) -> Self {
        self.proxies.get_or_insert_with(Vec::new).push(proxy);
        self
    }
}

// ============================================================================
// SessionListRequest
// ============================================================================

/// Filter for `GET sessions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionListRequest {
    /// Only return sessions whose status is `active`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_active: Option<bool>,

    /// Page number, starting at 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// Sessions per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl SessionListRequest {
    /// Creates an unfiltered request.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to active sessions.
    #[inline]
    #[must_use]
    pub const fn with_only_active(mut self, only_active: bool) -> Self {
        self.only_active = Some(only_active);
        self
    }

    /// Selects a result page.
    #[inline]
    #[must_use]
    pub const fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[inline]
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Converts the filter into string-coerced query pairs, skipping
    /// unset fields.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(only_active) = self.only_active {
            query.push(("only_active".to_string(), only_active.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size".to_string(), page_size.to_string()));
        }
        query
    }
}

// ============================================================================
// SessionResponse
// ============================================================================

/// Server-side session snapshot.
///
/// Returned by every session operation and embedded in every page
/// operation's response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Opaque session identifier.
    pub session_id: String,

    /// Current status.
    pub status: SessionStatus,

    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last access time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// Idle timeout in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_minutes: Option<u32>,

    /// Hard cap on session lifetime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_minutes: Option<u32>,

    /// Diagnostic message for `error` status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Credits consumed so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_usage: Option<f64>,

    /// Bytes uploaded by the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_bytes: Option<u64>,

    /// Bytes downloaded by the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_bytes: Option<u64>,

    /// Browser engine backing the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_type: Option<BrowserType>,

    /// Viewport dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    /// Proxy configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<ProxySettings>>,

    /// Fields this client does not model, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================
