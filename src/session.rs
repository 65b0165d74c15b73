//! Stateful session handle.
//!
//! [`RemoteSession`] represents one remote session as a local object so
//! callers stop threading the session identifier through every call. The
//! handle is cheap to clone (shared inner state, like a browser window
//! handle) and walks a strict one-way lifecycle:
//!
//! ```text
//! unstarted --start()--> active --stop()--> stopped
//! ```
//!
//! `stop()` is idempotent by design: once stopped, further calls return
//! the cached terminal snapshot without touching the network, so cleanup
//! code may call it unconditionally. [`with_session`] wraps the whole
//! lifecycle and guarantees the stop even when the work in between fails.
//!
//! Concurrent operations on one handle are not ordered with respect to
//! each other; callers that care about ordering must serialize their own
//! calls. The internal lock only keeps the handle's state consistent and
//! is never held across an await.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::client::SessionsClient;
use crate::error::{Error, Result};
use crate::types::{
    Cookie, ExecuteAction, ExecuteResponse, ObserveRequest, ObserveResponse, ScrapeRequest,
    ScrapeResponse, SessionResponse, SessionStartRequest, SetCookiesResponse,
};

// ============================================================================
// SessionState
// ============================================================================

/// Mutable handle state.
///
/// Invariants: `session_id`, once set, never changes or clears;
/// `terminal` is set exactly when the session has been stopped.
#[derive(Debug, Default)]
struct SessionState {
    /// Identifier assigned by `start()` or `attach()`.
    session_id: Option<String>,
    /// Latest server-reported snapshot.
    last: Option<SessionResponse>,
    /// Terminal snapshot; present once stopped.
    terminal: Option<SessionResponse>,
}

// ============================================================================
// SessionInner
// ============================================================================

/// Shared state behind every clone of a [`RemoteSession`].
#[derive(Debug)]
struct SessionInner {
    /// Domain client every operation delegates to.
    client: SessionsClient,
    /// Handle state. Never locked across an await.
    state: Mutex<SessionState>,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        let Some(session_id) = state.session_id.clone() else {
            return;
        };
        if state.terminal.is_some() {
            return;
        }

        // Best-effort cleanup: no async drop in Rust, so spawn the stop on
        // the current runtime when there is one.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(session_id = %session_id, "Session handle dropped while active; stopping in background");
                let client = self.client.clone();
                handle.spawn(async move {
                    if let Err(error) = client.stop(&session_id).await {
                        warn!(session_id = %session_id, error = %error, "Background session stop failed");
                    }
                });
            }
            Err(_) => {
                warn!(session_id = %session_id, "Session handle dropped outside a runtime; session will idle out server-side");
            }
        }
    }
}

// ============================================================================
// RemoteSession
// ============================================================================

/// Local handle for one remote session.
///
/// # Example
///
/// ```no_run
/// use notte_client::{NotteClient, ClientOptions, SessionStartRequest, ExecuteAction};
///
/// # async fn example() -> notte_client::Result<()> {
/// let client = NotteClient::new(ClientOptions::new())?;
///
/// let session = client.session();
/// session.start(SessionStartRequest::new()).await?;
/// session.execute(ExecuteAction::goto("https://example.com")).await?;
/// session.stop().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSession {
    inner: Arc<SessionInner>,
}

// ============================================================================
// RemoteSession - Construction
// ============================================================================

impl RemoteSession {
    /// Creates an unstarted handle.
    #[must_use]
    pub fn new(client: SessionsClient) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                client,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Creates a handle already in the active state for a session started
    /// out-of-band. No start call is issued.
    #[must_use]
    pub fn attach(client: SessionsClient, session_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                client,
                state: Mutex::new(SessionState {
                    session_id: Some(session_id.into()),
                    last: None,
                    terminal: None,
                }),
            }),
        }
    }
}

// ============================================================================
// RemoteSession - State Accessors
// ============================================================================

impl RemoteSession {
    /// Returns the session identifier.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before `start()`. Once assigned, the
    /// identifier is stable for the lifetime of the handle.
    pub fn session_id(&self) -> Result<String> {
        self.inner
            .state
            .lock()
            .session_id
            .clone()
            .ok_or_else(|| Error::invalid_state("session not started"))
    }

    /// Returns the latest server-reported snapshot, if any.
    #[must_use]
    pub fn last_response(&self) -> Option<SessionResponse> {
        self.inner.state.lock().last.clone()
    }

    /// Returns `true` if the session is started and not yet stopped.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let state = self.inner.state.lock();
        state.session_id.is_some() && state.terminal.is_none()
    }

    /// Returns `true` once `stop()` has been acknowledged.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.state.lock().terminal.is_some()
    }

    /// Returns the identifier if the handle is active, erroring out for
    /// both the unstarted and the stopped state.
    fn require_active(&self) -> Result<String> {
        let state = self.inner.state.lock();
        if state.terminal.is_some() {
            return Err(Error::invalid_state("session already stopped"));
        }
        state
            .session_id
            .clone()
            .ok_or_else(|| Error::invalid_state("session not started"))
    }

    /// Records a fresh server-reported snapshot.
    fn record(&self, snapshot: &SessionResponse) {
        self.inner.state.lock().last = Some(snapshot.clone());
    }
}

// ============================================================================
// RemoteSession - Lifecycle
// ============================================================================

impl RemoteSession {
    /// Starts the remote session. Single-shot.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the handle is already active or
    /// stopped, before any I/O.
    pub async fn start(&self, request: SessionStartRequest) -> Result<SessionResponse> {
        {
            let state = self.inner.state.lock();
            if state.terminal.is_some() {
                return Err(Error::invalid_state("session already stopped"));
            }
            if state.session_id.is_some() {
                return Err(Error::invalid_state("session already started"));
            }
        }

        let response = self.inner.client.start(request).await?;

        let mut state = self.inner.state.lock();
        state.session_id = Some(response.session_id.clone());
        state.last = Some(response.clone());
        Ok(response)
    }

    /// Stops the remote session and returns its terminal snapshot.
    ///
    /// Idempotent: once stopped, returns the cached terminal snapshot
    /// without a network call.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the session was never started.
    pub async fn stop(&self) -> Result<SessionResponse> {
        let session_id = {
            let state = self.inner.state.lock();
            if let Some(terminal) = &state.terminal {
                return Ok(terminal.clone());
            }
            state
                .session_id
                .clone()
                .ok_or_else(|| Error::invalid_state("session not started"))?
        };

        let response = self.inner.client.stop(&session_id).await?;

        let mut state = self.inner.state.lock();
        state.last = Some(response.clone());
        state.terminal = Some(response.clone());
        Ok(response)
    }

    /// Fetches the session's current snapshot and caches it.
    pub async fn status(&self) -> Result<SessionResponse> {
        let session_id = self.require_active()?;
        let response = self.inner.client.status(&session_id).await?;
        self.record(&response);
        Ok(response)
    }
}

// ============================================================================
// RemoteSession - Page Operations
// ============================================================================

impl RemoteSession {
    /// Scrapes the current page. Requires the active state.
    pub async fn scrape(&self, request: ScrapeRequest) -> Result<ScrapeResponse> {
        let session_id = self.require_active()?;
        let response = self.inner.client.scrape(&session_id, request).await?;
        self.record(&response.session);
        Ok(response)
    }

    /// Observes the current page. Requires the active state.
    pub async fn observe(&self, request: ObserveRequest) -> Result<ObserveResponse> {
        let session_id = self.require_active()?;
        let response = self.inner.client.observe(&session_id, request).await?;
        self.record(&response.session);
        Ok(response)
    }

    /// Runs one browser action. Requires the active state.
    pub async fn execute(&self, action: ExecuteAction) -> Result<ExecuteResponse> {
        let session_id = self.require_active()?;
        let response = self.inner.client.execute(&session_id, action).await?;
        self.record(&response.session);
        Ok(response)
    }

    /// Installs cookies into the session's browser. Requires the active
    /// state.
    pub async fn set_cookies(&self, cookies: Vec<Cookie>) -> Result<SetCookiesResponse> {
        let session_id = self.require_active()?;
        self.inner.client.set_cookies(&session_id, cookies).await
    }

    /// Fetches the session's cookies. Requires the active state.
    pub async fn get_cookies(&self) -> Result<Vec<Cookie>> {
        let session_id = self.require_active()?;
        self.inner.client.get_cookies(&session_id).await
    }
}

// ============================================================================
// Guarded Use
// ============================================================================

/// Starts a session, runs `work` with a handle, and unconditionally stops
/// the session afterwards.
///
/// If `work` fails, the session is still stopped and the work's original
/// error is returned unchanged; a stop failure never masks it. If `work`
/// succeeds, a stop failure is reported.
pub async fn with_session<T, F, Fut>(
    client: &SessionsClient,
    request: SessionStartRequest,
    work: F,
) -> Result<T>
where
    F: FnOnce(RemoteSession) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = RemoteSession::new(client.clone());
    session.start(request).await?;

    let result = work(session.clone()).await;
    let stop_result = session.stop().await;

    match result {
        Ok(value) => {
            stop_result?;
            Ok(value)
        }
        // The work's failure wins over any stop failure.
        Err(error) => Err(error),
    }
}

// ============================================================================
// Tests
// ============================================================================
