//! Notte API client - Typed access to remote browser sessions.
//!
//! This library is a client for the Notte browser-automation API. It
//! manages remote browser sessions and runs page operations (scrape,
//! observe, execute) inside them over plain HTTPS.
//!
//! # Architecture
//!
//! The client is layered; each layer only talks to the one below:
//!
//! - **Facade**: [`NotteClient`] composes the domain clients
//! - **Domain clients**: [`SessionsClient`] maps operations to endpoints
//! - **Base client**: [`BaseClient`] owns the transport, auth, and timeouts
//! - **Schemas**: typed request/response models in [`types`]
//!
//! Key design principles:
//!
//! - Requests are validated strictly before any I/O; unknown request
//!   fields and semantic violations fail locally
//! - Responses tolerate unknown fields so server additions never break
//!   an older client
//! - [`RemoteSession`] carries session identity through a strict
//!   unstarted/active/stopped lifecycle with idempotent stop
//!
//! # Quick Start
//!
//! ```no_run
//! use notte_client::{NotteClient, ClientOptions, SessionStartRequest, ScrapeRequest};
//!
//! #[tokio::main]
//! async fn main() -> notte_client::Result<()> {
//!     // Reads NOTTE_API_KEY from the environment
//!     let client = NotteClient::new(ClientOptions::new())?;
//!
//!     // Session is stopped even if the work in between fails
//!     let markdown = client
//!         .with_session(SessionStartRequest::new().with_headless(true), |session| async move {
//!             let page = session
//!                 .scrape(ScrapeRequest::new().with_url("https://example.com"))
//!                 .await?;
//!             Ok(page.markdown)
//!         })
//!         .await?;
//!
//!     println!("{}", markdown.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`NotteClient`] facade, [`SessionsClient`], [`BaseClient`] |
//! | [`config`] | Credentials, server URL, timeouts |
//! | [`endpoint`] | Endpoint descriptors (internal plumbing) |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`session`] | [`RemoteSession`] lifecycle handle |
//! | [`types`] | Request/response models |

// ============================================================================
// Modules
// ============================================================================

/// API clients: facade, domain clients, and the base execution layer.
pub mod client;

/// Client credentials and connection configuration.
///
/// Use [`ClientOptions`] to configure a client; unset values resolve
/// from the environment and hardcoded defaults.
pub mod config;

/// Endpoint descriptors binding a path, method, body, and response type.
pub mod endpoint;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Stateful session handle and the guarded-use helper.
pub mod session;

/// Request and response models.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{BaseClient, NotteClient, SessionsClient};

// Configuration
pub use config::{
    API_KEY_ENV, ClientConfig, ClientOptions, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_URL,
    LOCAL_SERVER_URL, SERVER_URL_ENV,
};

// Endpoint types
pub use endpoint::{Endpoint, Method};

// Error types
pub use error::{Error, Result};

// Session handle
pub use session::{RemoteSession, with_session};

// Request/response models
pub use types::{
    BrowserType, Cookie, ExecuteAction, ExecuteResponse, GetCookiesResponse, ObserveRequest,
    ObserveResponse, PageMetadata, ProxySettings, SameSite, ScrapeRequest, ScrapeResponse,
    SessionListRequest, SessionResponse, SessionStartRequest, SessionStatus, SetCookiesRequest,
    SetCookiesResponse, Viewport,
};
