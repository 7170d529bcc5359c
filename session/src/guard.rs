//! Route guard: turns the current [`Session`] into a render decision.
//!
//! The decision is a pure function of the session so the web wrapper, the
//! router effect, and the terminal client all agree on it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::LOGIN;
use crate::store::Session;

/// Navigation the guard asks for instead of rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    /// Replace the current history entry so Back skips the protected view.
    pub replace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still running: render a neutral placeholder.
    Pending,
    Allow,
    Redirect(Redirect),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decide whether protected content may render for `session`.
#[must_use]
pub fn guard(session: &Session) -> GuardDecision {
    if session.loading {
        GuardDecision::Pending
    } else if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Redirect { path: LOGIN, replace: true })
    }
}
