//! Access page: sign in, or switch to the registration form.
//!
//! ERROR HANDLING
//! ==============
//! A failed sign-in always shows the same message so the form does not leak
//! which half of the credentials was wrong. Registration failures show the
//! API's detail when it has one.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::forms::{
    LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE, REGISTERED_MESSAGE, validate_login, validate_registration,
};
use session::{CONNECTIVITY_MESSAGE, SessionError, routes};

use crate::state::auth::AuthContext;

/// Message for a failed sign-in: connectivity problems are told apart,
/// everything else reads the same.
fn login_error_message(error: &SessionError) -> &'static str {
    if error.as_api().is_some_and(session::ApiError::is_connectivity) {
        CONNECTIVITY_MESSAGE
    } else {
        LOGIN_FAILED_MESSAGE
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let navigate = use_navigate();

    let mode = RwSignal::new(Mode::SignIn);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Covers both a successful sign-in and arriving here already signed in.
    Effect::new(move || {
        if auth.user().is_some() {
            navigate(routes::FEED, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(None);
        info.set(None);

        match mode.get() {
            Mode::SignIn => {
                let credentials = match validate_login(&username.get(), &password.get()) {
                    Ok(credentials) => credentials,
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        return;
                    }
                };
                busy.set(true);
                leptos::task::spawn_local(async move {
                    if let Err(e) = auth.login(credentials.username, credentials.password).await {
                        error.set(Some(login_error_message(&e).to_owned()));
                    }
                    busy.set(false);
                });
            }
            Mode::Register => {
                let registration = match validate_registration(&username.get(), &email.get(), &password.get()) {
                    Ok(registration) => registration,
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        return;
                    }
                };
                busy.set(true);
                let store = auth.store();
                leptos::task::spawn_local(async move {
                    match store.api().register(&registration).await {
                        Ok(_) => {
                            password.set(String::new());
                            mode.set(Mode::SignIn);
                            info.set(Some(REGISTERED_MESSAGE.to_owned()));
                        }
                        Err(e) => error.set(Some(e.user_message(REGISTER_FAILED_MESSAGE))),
                    }
                    busy.set(false);
                });
            }
        }
    };

    let toggle = move |_| {
        error.set(None);
        info.set(None);
        mode.update(|m| *m = if *m == Mode::SignIn { Mode::Register } else { Mode::SignIn });
    };

    let registering = move || mode.get() == Mode::Register;

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Mural"</h1>
                <p class="login-card__subtitle">
                    {move || if registering() { "Create an account" } else { "Sign in" }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <Show when=registering>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if registering() { "Register" } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || info.get().is_some()>
                    <p class="login-message">{move || info.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="btn btn--link" type="button" on:click=toggle>
                    {move || if registering() { "Already have an account? Sign in" } else { "No account? Register" }}
                </button>
            </div>
        </div>
    }
}
