//! Proxy configuration types.
//!
//! A session routes its traffic either through a Notte-managed proxy pool
//! or through an externally supplied proxy server. The two shapes are
//! distinguished by a literal `type` tag on the wire; a payload whose tag
//! matches neither variant is rejected at validation time.
//!
//! # Example
//!
//! ```
//! use notte_client::ProxySettings;
//!
//! // Managed proxy with a geography hint
//! let proxy = ProxySettings::notte("us");
//!
//! // Externally supplied proxy with credentials
//! let proxy = ProxySettings::external("http://proxy.example.com:8080")
//!     .with_credentials("user", "pass");
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// ProxySettings
// ============================================================================

/// Per-session proxy configuration, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProxySettings {
    /// Proxy managed by the Notte service.
    Notte {
        /// Identifier of a reserved proxy, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,

        /// Two-letter country code to exit from.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country: Option<String>,
    },

    /// Externally supplied proxy server.
    External {
        /// Proxy server URL, e.g. `http://host:port`.
        server: String,

        /// Username for authentication (optional).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,

        /// Password for authentication (optional).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,

        /// Comma-separated hosts that bypass the proxy (optional).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bypass: Option<String>,
    },
}

// ============================================================================
// ProxySettings - Constructors
// ============================================================================

impl ProxySettings {
    /// Creates a managed proxy pinned to a country.
    #[inline]
    #[must_use]
    pub fn notte(country: impl Into<String>) -> Self {
        Self::Notte {
            id: None,
            country: Some(country.into()),
        }
    }

    /// Creates a managed proxy by reserved identifier.
    #[inline]
    #[must_use]
    pub fn notte_by_id(id: impl Into<String>) -> Self {
        Self::Notte {
            id: Some(id.into()),
            country: None,
        }
    }

    /// Creates an external proxy configuration.
    #[inline]
    #[must_use]
    pub fn external(server: impl Into<String>) -> Self {
        Self::External {
            server: server.into(),
            username: None,
            password: None,
            bypass: None,
        }
    }
}

// ============================================================================
// ProxySettings - Builder Methods
// ============================================================================

impl ProxySettings {
    /// Sets authentication credentials on an external proxy.
    ///
    /// No-op for managed proxies, whose credentials live server-side.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        if let Self::External {
            username, password, ..
        } = &mut self
        {
            *username = Some(user.into());
            *password = Some(pass.into());
        }
        self
    }

    /// Sets the bypass list on an external proxy.
    #[must_use]
    pub fn with_bypass(mut self, hosts: impl Into<String>) -> Self {
        if let Self::External { bypass, .. } = &mut self {
            *bypass = Some(hosts.into());
        }
        self
    }
}

// ============================================================================
// ProxySettings - Predicates
// ============================================================================

impl ProxySettings {
    /// Returns `true` for a Notte-managed proxy.
    #[inline]
    #[must_use]
    pub const fn is_managed(&self) -> bool {
        matches!(self, Self::Notte { .. })
    }

    /// Returns `true` for an externally supplied proxy.
    #[inline]
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
