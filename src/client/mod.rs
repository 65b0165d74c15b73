//! API clients.
//!
//! [`BaseClient`] is the shared HTTP execution layer; [`SessionsClient`]
//! maps the sessions domain onto it; [`NotteClient`] is the top-level
//! facade composing the domain clients and the session-handle
//! constructors.

// ============================================================================
// Modules
// ============================================================================

/// Shared HTTP execution layer.
pub mod base;

/// Sessions domain client.
pub mod sessions;

pub use base::BaseClient;
pub use sessions::SessionsClient;

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::session::{self, RemoteSession};
use crate::types::SessionStartRequest;

// ============================================================================
// NotteClient
// ============================================================================

/// Top-level entry point for the Notte API.
///
/// # Example
///
/// ```no_run
/// use notte_client::{NotteClient, ClientOptions, SessionStartRequest, ScrapeRequest};
///
/// # async fn example() -> notte_client::Result<()> {
/// let client = NotteClient::new(ClientOptions::new())?;
///
/// let markdown = client
///     .with_session(SessionStartRequest::new(), |session| async move {
///         let page = session
///             .scrape(ScrapeRequest::new().with_url("https://example.com"))
///             .await?;
///         Ok(page.markdown)
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NotteClient {
    /// Sessions domain operations.
    pub sessions: SessionsClient,
    /// Prefix-less execution layer for server-level endpoints.
    root: BaseClient,
}

// ============================================================================
// NotteClient - Construction
// ============================================================================

impl NotteClient {
    /// Creates a client from the given options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if no API key can be
    /// resolved or the server URL is invalid — configuration problems
    /// surface here, never at the first call.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let config = Arc::new(options.resolve()?);
        Ok(Self {
            sessions: SessionsClient::new(Arc::clone(&config))?,
            root: BaseClient::new(config, None)?,
        })
    }
}

// ============================================================================
// NotteClient - Server Operations
// ============================================================================

impl NotteClient {
    /// Probes the server's liveness endpoint.
    pub async fn health_check(&self) -> Result<()> {
        self.root.health_check().await
    }
}

// ============================================================================
// NotteClient - Session Handles
// ============================================================================

impl NotteClient {
    /// Creates an unstarted session handle.
    #[must_use]
    pub fn session(&self) -> RemoteSession {
        RemoteSession::new(self.sessions.clone())
    }

    /// Creates an active handle for a session started out-of-band.
    #[must_use]
    pub fn attach_session(&self, session_id: impl Into<String>) -> RemoteSession {
        RemoteSession::attach(self.sessions.clone(), session_id)
    }

    /// Starts a session, runs `work`, and unconditionally stops the
    /// session afterwards. See [`session::with_session`].
    pub async fn with_session<T, F, Fut>(&self, request: SessionStartRequest, work: F) -> Result<T>
    where
        F: FnOnce(RemoteSession) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        session::with_session(&self.sessions, request, work).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn test_construction_fails_without_api_key() {
        // Empty key defeats both the explicit option and any ambient env.
        let result = NotteClient::new(ClientOptions::new().with_api_key(""));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_construction_succeeds_with_explicit_key() {
        let client = NotteClient::new(ClientOptions::new().with_api_key("sk-test"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_session_handle_starts_unstarted() {
        let client = NotteClient::new(ClientOptions::new().with_api_key("sk-test")).expect("client");
        let session = client.session();
        assert!(session.session_id().is_err());
    }

    #[test]
    fn test_attach_session_is_active() {
        let client = NotteClient::new(ClientOptions::new().with_api_key("sk-test")).expect("client");
        let session = client.attach_session("sess_external");
        assert_eq!(session.session_id().expect("id"), "sess_external");
    }
}
