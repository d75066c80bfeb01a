//! Completion callback
//!
//! The host transport reports each readiness change together with the status
//! known at that point. [`on_ready_state_change`] decides what the page should
//! do; it has no side effects so every front end (native, browser, tests)
//! shares it.

use std::fmt;

/// HTTP status that renders the reply
pub const STATUS_OK: u16 = 200;

/// HTTP status that sends the user to the login page
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Transport readiness, in the order a request moves through it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadyState {
    /// Created, not opened
    Unsent,
    /// Opened, not yet answered
    Opened,
    /// Status line and headers are in
    HeadersReceived,
    /// Body is arriving
    Loading,
    /// Body complete
    Done,
}

impl ReadyState {
    /// Maps the numeric `readyState` of an XHR
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Unsent),
            1 => Some(Self::Opened),
            2 => Some(Self::HeadersReceived),
            3 => Some(Self::Loading),
            4 => Some(Self::Done),
            _ => None,
        }
    }

    /// Transitions a request goes through once its response has arrived
    #[must_use]
    pub const fn after_response() -> [Self; 3] {
        [Self::HeadersReceived, Self::Loading, Self::Done]
    }
}

/// What the completion callback does for one readiness change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Parse the body and write the result field
    Render,
    /// Replace the page location with the login page
    Redirect,
    /// No observable action
    Nothing,
}

/// Decides the action for a readiness change.
///
/// `status` is 0 until headers are received. A 401 redirects as soon as it is
/// known, whatever the state; a 200 renders only once the body is complete.
#[must_use]
pub const fn on_ready_state_change(state: ReadyState, status: u16) -> Decision {
    match (state, status) {
        (ReadyState::Done, STATUS_OK) => Decision::Render,
        (_, STATUS_UNAUTHORIZED) => Decision::Redirect,
        _ => Decision::Nothing,
    }
}

/// Observable result of one trigger-and-display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The result field now holds `value`
    Rendered {
        /// Text written into the result field
        value: String,
    },
    /// The page was sent to `location`; the reply was discarded
    Redirected {
        /// Login page path
        location: String,
    },
    /// The status had no handler; nothing changed
    Ignored {
        /// HTTP status of the reply
        status: u16,
    },
}

impl Outcome {
    /// Whether the result field was written
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rendered { value } => write!(f, "rendered {value}"),
            Self::Redirected { location } => write!(f, "redirected to {location}"),
            Self::Ignored { status } => write!(f, "ignored status {status}"),
        }
    }
}
