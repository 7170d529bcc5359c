//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard, the navbar, and every page that needs to know who
//! is signed in. The shared [`session::SessionStore`] owns the truth; this
//! context mirrors its [`Session`] into a signal after every operation so the
//! view re-renders.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::types::UserProfile;
use session::{BootstrapOutcome, GuardDecision, RefreshOutcome, Session, SessionError};

use crate::net::api::MuralSession;

/// Session handle plus its reactive mirror, provided via context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<MuralSession>,
    pub state: RwSignal<Session>,
}

impl AuthContext {
    pub fn new(store: MuralSession) -> Self {
        let state = RwSignal::new(store.session());
        Self { store: StoredValue::new(store), state }
    }

    /// The context provided by `App`.
    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    /// A clone of the session store, for issuing API calls.
    pub fn store(&self) -> MuralSession {
        self.store.get_value()
    }

    fn sync(&self, store: &MuralSession) {
        self.state.set(store.session());
    }

    /// Reactive: the signed-in user, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.get().user
    }

    /// Reactive: the guard decision for the current session.
    pub fn decision(&self) -> GuardDecision {
        session::guard(&self.state.get())
    }

    /// Resolve the stored token once at startup.
    pub async fn bootstrap(self) -> BootstrapOutcome {
        let store = self.store();
        let outcome = store.bootstrap().await;
        self.sync(&store);
        outcome
    }

    /// Sign in; the session signal updates before this returns.
    ///
    /// # Errors
    ///
    /// Whatever [`session::SessionStore::login`] fails with.
    pub async fn login(self, username: String, password: String) -> Result<UserProfile, SessionError> {
        let store = self.store();
        let result = store.login(&username, &password).await;
        self.sync(&store);
        result
    }

    /// Sign out and return the path to navigate to.
    pub fn logout(self) -> &'static str {
        let store = self.store();
        let target = match store.logout() {
            Ok(target) => target,
            Err(error) => {
                log_warn(&format!("logout could not clear the stored token: {error}"));
                session::routes::HOME
            }
        };
        self.sync(&store);
        target
    }

    /// Re-resolve the profile after a membership change.
    pub async fn refresh(self) -> RefreshOutcome {
        let store = self.store();
        let outcome = store.refresh().await;
        self.sync(&store);
        outcome
    }
}

/// Text to show when a post-action refresh kept the old profile.
pub fn refresh_notice(outcome: &RefreshOutcome) -> Option<String> {
    match outcome {
        RefreshOutcome::Retained(error) => Some(format!(
            "Saved, but your profile could not be reloaded: {}",
            error.user_message(session::UNKNOWN_ERROR_MESSAGE)
        )),
        RefreshOutcome::Replaced(_) | RefreshOutcome::Skipped => None,
    }
}

fn log_warn(message: &str) {
    #[cfg(feature = "csr")]
    log::warn!("{message}");
    #[cfg(not(feature = "csr"))]
    let _ = message;
}
