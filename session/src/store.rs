//! Session store: the single source of truth for who is signed in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both clients construct one [`SessionStore`] at startup and hand clones of
//! it to whatever needs it: Leptos context in the browser, `main` in the
//! terminal client. The store is the only writer of the bearer token and of
//! the resolved [`UserProfile`].
//!
//! DESIGN
//! ======
//! - `loading` is true from construction until the first bootstrap attempt
//!   finishes and is never set again.
//! - The profile is always fetched from `GET /users/me/`; holding a token
//!   does not by itself mean anyone is signed in.
//! - State lives behind a mutex that is never held across an await, so the
//!   store suspends only at network I/O.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent refreshes are not serialized and the last answer wins. A
//! resolution only lands if the token it was made with is still the stored
//! one, so a refresh that finishes after logout cannot sign the user back in.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::ApiClient;
use crate::error::{ApiError, SessionError};
use crate::guard::{GuardDecision, guard};
use crate::routes::HOME;
use crate::tokens::TokenStore;
use crate::transport::Transport;
use crate::types::{Credentials, UserProfile};

// =============================================================================
// SESSION STATE
// =============================================================================

/// In-memory authentication state read by views and the route guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserProfile>,
    /// True only while the initial bootstrap is in flight.
    pub loading: bool,
}

impl Session {
    /// State before bootstrap has run.
    #[must_use]
    pub fn initial() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.loading, &self.user) {
            (true, _) => Phase::Init,
            (false, Some(_)) => Phase::SignedIn,
            (false, None) => Phase::SignedOut,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Coarse lifecycle state derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    SignedOut,
    SignedIn,
}

/// Result of [`SessionStore::bootstrap`].
#[derive(Clone, Debug, PartialEq)]
pub enum BootstrapOutcome {
    /// No token was stored; nothing was sent.
    Anonymous,
    SignedIn(UserProfile),
    /// The stored token could not be resolved and was removed.
    Purged(ApiError),
    /// A sign-in replaced the stored token while it was being resolved; the
    /// newer session was left alone.
    Superseded,
    /// Bootstrap had already run; nothing changed.
    AlreadyBootstrapped,
}

/// Result of [`SessionStore::refresh`].
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    /// The profile was re-resolved and replaced.
    Replaced(UserProfile),
    /// Resolution failed; the previous profile was kept.
    Retained(ApiError),
    /// No token was held, or the token changed while resolving.
    Skipped,
}

#[derive(Debug)]
struct StoreState {
    session: Session,
    bootstrapped: bool,
}

// =============================================================================
// STORE
// =============================================================================

/// Cloneable handle to one session. Clones share state.
pub struct SessionStore<T, S> {
    api: Arc<ApiClient<T, S>>,
    state: Arc<Mutex<StoreState>>,
}

impl<T, S> Clone for SessionStore<T, S> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), state: Arc::clone(&self.state) }
    }
}

impl<T: Transport, S: TokenStore> SessionStore<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(StoreState { session: Session::initial(), bootstrapped: false })),
        }
    }

    /// The adapter every view issues its calls through.
    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().session.phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.lock().session.user.clone()
    }

    /// Route-guard decision for the current state.
    pub fn guard(&self) -> GuardDecision {
        guard(&self.lock().session)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Resolve the stored token into a signed-in session, once.
    ///
    /// Any resolution failure purges the token, unless a sign-in stored a
    /// different one meanwhile. Every path ends with `loading == false`.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        {
            let mut state = self.lock();
            if state.bootstrapped {
                return BootstrapOutcome::AlreadyBootstrapped;
            }
            state.bootstrapped = true;
        }

        let Some(token) = self.api.tokens().load() else {
            tracing::debug!("bootstrap: no stored token");
            self.finish_bootstrap(None);
            return BootstrapOutcome::Anonymous;
        };

        let result = self.resolve_profile().await;
        if self.api.tokens().load().as_deref() != Some(token.as_str()) {
            tracing::debug!("token changed during bootstrap; keeping the newer session");
            self.lock().session.loading = false;
            return BootstrapOutcome::Superseded;
        }

        match result {
            Ok(profile) => {
                tracing::info!(user_id = profile.id, username = %profile.username, "session restored");
                self.finish_bootstrap(Some(profile.clone()));
                BootstrapOutcome::SignedIn(profile)
            }
            Err(error) => {
                tracing::info!(%error, "stored token rejected; signing out");
                self.purge_token();
                self.finish_bootstrap(None);
                BootstrapOutcome::Purged(error)
            }
        }
    }

    /// Exchange credentials for a token, persist it, and resolve the profile.
    ///
    /// # Errors
    ///
    /// Returns the API or storage failure. On any failure no token issued by
    /// this call remains stored and the user stays signed out.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, SessionError> {
        let credentials = Credentials::new(username, password);
        let issued = self.api.login(&credentials).await?;
        self.api.tokens().save(&issued.access_token)?;

        match self.resolve_profile().await {
            Ok(profile) => {
                if self.api.tokens().load().as_deref() == Some(issued.access_token.as_str()) {
                    self.lock().session.user = Some(profile.clone());
                }
                tracing::info!(user_id = profile.id, username = %profile.username, "signed in");
                Ok(profile)
            }
            Err(error) => {
                tracing::warn!(%error, "token issued but profile could not be resolved");
                self.purge_token();
                self.lock().session.user = None;
                Err(error.into())
            }
        }
    }

    /// Sign out locally and return the landing path to navigate to.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the token could not be removed;
    /// the in-memory session is signed out either way.
    pub fn logout(&self) -> Result<&'static str, SessionError> {
        self.lock().session.user = None;
        self.api.tokens().clear()?;
        tracing::info!("signed out");
        Ok(HOME)
    }

    /// Re-resolve the profile after an action changed server-side state.
    ///
    /// Never touches `loading`. Failures keep the previous profile.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(token) = self.api.tokens().load() else {
            return RefreshOutcome::Skipped;
        };

        match self.resolve_profile().await {
            Ok(profile) => {
                if self.api.tokens().load().as_deref() != Some(token.as_str()) {
                    tracing::debug!("token changed during refresh; discarding profile");
                    return RefreshOutcome::Skipped;
                }
                self.lock().session.user = Some(profile.clone());
                RefreshOutcome::Replaced(profile)
            }
            Err(error) => {
                tracing::warn!(%error, "session refresh failed; keeping previous profile");
                RefreshOutcome::Retained(error)
            }
        }
    }

    /// Resolve the stored token against the API into a fresh profile.
    ///
    /// # Errors
    ///
    /// Whatever `GET /users/me/` fails with.
    pub async fn resolve_profile(&self) -> Result<UserProfile, ApiError> {
        self.api.me().await
    }

    fn finish_bootstrap(&self, user: Option<UserProfile>) {
        let mut state = self.lock();
        state.session.user = user;
        state.session.loading = false;
    }

    fn purge_token(&self) {
        if let Err(error) = self.api.tokens().clear() {
            tracing::warn!(%error, "failed to remove stored token");
        }
    }
}
