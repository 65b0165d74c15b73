//! Browser action types for `page/execute`.
//!
//! An [`ExecuteAction`] is the single unit of work the remote browser runs
//! on behalf of the client. Every action carries a literal `type`
//! discriminator on the wire; a payload without one is rejected before any
//! network I/O, which is what makes `execute` the only page operation with
//! no default request body.
//!
//! # Example
//!
//! ```
//! use notte_client::ExecuteAction;
//!
//! let action = ExecuteAction::goto("https://example.com");
//! let action = ExecuteAction::fill("I3", "hello world");
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// ExecuteAction
// ============================================================================

/// One browser action, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecuteAction {
    /// Navigate the page to a URL.
    Goto {
        /// Target URL.
        url: String,
    },

    /// Click an element by its observed identifier.
    Click {
        /// Element identifier from a prior observe call.
        id: String,
    },

    /// Fill an input element with text.
    Fill {
        /// Element identifier from a prior observe call.
        id: String,
        /// Text to enter.
        value: String,
        /// Clear the field first (server default applies when unset).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clear: Option<bool>,
    },

    /// Press a keyboard key.
    Press {
        /// Key name, e.g. `Enter`.
        key: String,
    },

    /// Scroll up.
    ScrollUp {
        /// Scroll distance in pixels (server default when unset).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },

    /// Scroll down.
    ScrollDown {
        /// Scroll distance in pixels (server default when unset).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },

    /// Navigate back in history.
    GoBack,

    /// Navigate forward in history.
    GoForward,

    /// Reload the current page.
    Reload,

    /// Wait for a fixed duration.
    Wait {
        /// Milliseconds to wait.
        time_ms: u64,
    },
}

// ============================================================================
// ExecuteAction - Constructors
// ============================================================================

impl ExecuteAction {
    /// Creates a navigation action.
    #[inline]
    #[must_use]
    pub fn goto(url: impl Into<String>) -> Self {
        Self::Goto { url: url.into() }
    }

    /// Creates a click action.
    #[inline]
    #[must_use]
    pub fn click(id: impl Into<String>) -> Self {
        Self::Click { id: id.into() }
    }

    /// Creates a fill action.
    #[inline]
    #[must_use]
    pub fn fill(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Fill {
            id: id.into(),
            value: value.into(),
            clear: None,
        }
    }

    /// Creates a key press action.
    #[inline]
    #[must_use]
    pub fn press(key: impl Into<String>) -> Self {
        Self::Press { key: key.into() }
    }

    /// Creates a wait action.
    #[inline]
    #[must_use]
    pub const fn wait(time_ms: u64) -> Self {
        Self::Wait { time_ms }
    }
}

// ============================================================================
// ExecuteAction - Predicates
// ============================================================================

impl ExecuteAction {
    /// Returns `true` for actions that change the page location.
    #[inline]
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Goto { .. } | Self::GoBack | Self::GoForward | Self::Reload
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
