//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply one guard decision: wait while the session
//! bootstraps, render when signed in, otherwise replace the history entry
//! with `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{GuardDecision, Redirect};

use crate::state::auth::AuthContext;

/// Navigation options that honor the guard's history mode.
pub fn redirect_options(redirect: Redirect) -> NavigateOptions {
    NavigateOptions { replace: redirect.replace, ..NavigateOptions::default() }
}

/// Navigate away whenever the guard decides to redirect.
pub fn install_auth_guard<F>(auth: AuthContext, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(redirect) = auth.decision() {
            navigate(redirect.path, redirect_options(redirect));
        }
    });
}

/// Sign out and leave for the landing page.
pub fn sign_out<F>(auth: AuthContext, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    let target = auth.logout();
    navigate(target, NavigateOptions::default());
}

/// Renders `children` only when the guard allows; a neutral placeholder
/// while the session is still loading.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = AuthContext::expect();
    install_auth_guard(auth, use_navigate());

    view! {
        <Show
            when=move || auth.decision().is_allowed()
            fallback=move || {
                view! {
                    <div class="page page--pending">
                        <p>
                            {move || {
                                if auth.state.get().loading { "Loading..." } else { "Redirecting to login..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
