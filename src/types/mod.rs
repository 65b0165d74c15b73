//! Request and response models for the Notte API.
//!
//! Two validation policies apply throughout:
//!
//! - **Strict** (requests): unknown fields are rejected via
//!   `deny_unknown_fields`, surfacing typos before any network I/O.
//! - **Passthrough** (responses): unknown fields land in a flattened
//!   `extra` map instead of being discarded, so the client keeps working
//!   when the server adds fields it does not yet model.

/// Browser actions for `page/execute`.
pub mod action;

/// Cookie shapes and cookie endpoint wrappers.
pub mod cookie;

/// Page operation models (scrape, observe, execute).
pub mod page;

/// Proxy configuration union.
pub mod proxy;

/// Session models (start, list, snapshot).
pub mod session;

pub use action::ExecuteAction;
pub use cookie::{Cookie, GetCookiesResponse, SameSite, SetCookiesRequest, SetCookiesResponse};
pub use page::{
    ExecuteResponse, ObserveRequest, ObserveResponse, PageMetadata, ScrapeRequest, ScrapeResponse,
};
pub use proxy::ProxySettings;
pub use session::{
    BrowserType, SessionListRequest, SessionResponse, SessionStartRequest, SessionStatus, Viewport,
};
