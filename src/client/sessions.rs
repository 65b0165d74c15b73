//! Sessions domain client.
//!
//! One method per remote operation. Each method validates its input,
//! builds the matching endpoint descriptor, and delegates to the base
//! client's execution primitives. All paths are relative to the
//! `sessions` domain prefix.
//!
//! # Example
//!
//! ```no_run
//! use notte_client::{NotteClient, ClientOptions, SessionStartRequest};
//!
//! # async fn example() -> notte_client::Result<()> {
//! let client = NotteClient::new(ClientOptions::new())?;
//! let session = client.sessions.start(SessionStartRequest::new()).await?;
//! client.sessions.stop(&session.session_id).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{
    Cookie, ExecuteAction, ExecuteResponse, GetCookiesResponse, ObserveRequest, ObserveResponse,
    ScrapeRequest, ScrapeResponse, SessionListRequest, SessionResponse, SessionStartRequest,
    SetCookiesRequest, SetCookiesResponse,
};

use super::base::BaseClient;

// ============================================================================
// Constants
// ============================================================================

/// Domain prefix for every session operation.
const SESSIONS_PREFIX: &str = "sessions";

// ============================================================================
// SessionsClient
// ============================================================================

/// Client for the sessions domain of the Notte API.
///
/// Stateless apart from its configuration: session identity is an
/// argument to every per-session operation. Use
/// [`RemoteSession`](crate::RemoteSession) for a handle that carries the
/// identifier for you.
#[derive(Debug, Clone)]
pub struct SessionsClient {
    /// Shared execution layer, bound to the `sessions` prefix.
    base: BaseClient,
}

// ============================================================================
// SessionsClient - Construction
// ============================================================================

impl SessionsClient {
    /// Creates a sessions client over the given configuration.
    pub(crate) fn new(config: Arc<ClientConfig>) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(config, Some(SESSIONS_PREFIX))?,
        })
    }

    /// Returns the underlying execution layer.
    #[inline]
    pub(crate) fn base(&self) -> &BaseClient {
        &self.base
    }
}

// ============================================================================
// SessionsClient - Lifecycle Operations
// ============================================================================

impl SessionsClient {
    /// Starts a new session.
    ///
    /// An all-default [`SessionStartRequest`] is valid and yields the
    /// service defaults.
    pub async fn start(&self, request: SessionStartRequest) -> Result<SessionResponse> {
        let endpoint = Endpoint::post("start").with_body(&request)?;
        let response: SessionResponse = self.base.request_one(&endpoint).await?;
        info!(session_id = %response.session_id, "Session started");
        Ok(response)
    }

    /// Stops a session and returns its terminal snapshot.
    pub async fn stop(&self, session_id: &str) -> Result<SessionResponse> {
        let endpoint = Endpoint::delete(format!("{session_id}/stop"));
        let response: SessionResponse = self.base.request_one(&endpoint).await?;
        info!(session_id = %session_id, status = ?response.status, "Session stopped");
        Ok(response)
    }

    /// Fetches a session's current snapshot.
    pub async fn status(&self, session_id: &str) -> Result<SessionResponse> {
        let endpoint = Endpoint::get(session_id);
        self.base.request_one(&endpoint).await
    }

    /// Lists sessions matching the filter.
    ///
    /// Order is the server's; no client-side sorting or deduplication.
    pub async fn list(&self, request: SessionListRequest) -> Result<Vec<SessionResponse>> {
        let endpoint = Endpoint::get("").with_query(request.to_query());
        let sessions = self.base.request_many(&endpoint).await?;
        debug!(count = sessions.len(), "Listed sessions");
        Ok(sessions)
    }
}

// ============================================================================
// SessionsClient - Page Operations
// ============================================================================

impl SessionsClient {
    /// Scrapes the session's current page (or `request.url`).
    pub async fn scrape(
        &self,
        session_id: &str,
        request: ScrapeRequest,
    ) -> Result<ScrapeResponse> {
        let endpoint = Endpoint::post(format!("{session_id}/page/scrape")).with_body(&request)?;
        self.base.request_one(&endpoint).await
    }

    /// Observes the session's current page (or `request.url`).
    pub async fn observe(
        &self,
        session_id: &str,
        request: ObserveRequest,
    ) -> Result<ObserveResponse> {
        let endpoint = Endpoint::post(format!("{session_id}/page/observe")).with_body(&request)?;
        self.base.request_one(&endpoint).await
    }

    /// Runs one browser action in the session.
    ///
    /// Unlike the other page operations there is no default body: an
    /// action with its `type` discriminator is required.
    pub async fn execute(
        &self,
        session_id: &str,
        action: ExecuteAction,
    ) -> Result<ExecuteResponse> {
        debug!(session_id = %session_id, action = ?action, "Executing action");
        let endpoint = Endpoint::post(format!("{session_id}/page/execute")).with_body(&action)?;
        self.base.request_one(&endpoint).await
    }
}

// ============================================================================
// SessionsClient - Cookie Operations
// ============================================================================

impl SessionsClient {
    /// Installs cookies into the session's browser.
    ///
    /// # Errors
    ///
    /// [`Error::RequestValidation`](crate::Error::RequestValidation) if
    /// `cookies` is empty, before any network I/O.
    pub async fn set_cookies(
        &self,
        session_id: &str,
        cookies: Vec<Cookie>,
    ) -> Result<SetCookiesResponse> {
        let request = SetCookiesRequest::new(cookies);
        request.validate()?;

        let endpoint = Endpoint::post(format!("{session_id}/cookies")).with_body(&request)?;
        self.base.request_one(&endpoint).await
    }

    /// Fetches the cookies currently held by the session's browser.
    pub async fn get_cookies(&self, session_id: &str) -> Result<Vec<Cookie>> {
        let endpoint = Endpoint::get(format!("{session_id}/cookies"));
        let response: GetCookiesResponse = self.base.request_one(&endpoint).await?;
        Ok(response.cookies)
    }
}

// ============================================================================
// Tests
// ============================================================================
