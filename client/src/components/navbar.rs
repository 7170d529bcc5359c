//! Top navigation bar.
//!
//! Shows feed / new post / profile links and a logout button when signed in,
//! otherwise a login link. Renders nothing session-specific while loading.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::routes;

use crate::state::auth::AuthContext;
use crate::util::auth::sign_out;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = AuthContext::expect();

    // Held in a local store so the nested `Show` children stay `Fn`.
    let navigate = StoredValue::new_local(use_navigate());

    let username = move || auth.user().map(|user| user.username).unwrap_or_default();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href={routes::HOME}>"Mural"</a>
            <span class="navbar__spacer"></span>
            <Show when=move || !auth.state.get().loading>
                <Show
                    when=move || auth.user().is_some()
                    fallback=|| view! { <a class="navbar__link" href={routes::LOGIN}>"Login"</a> }
                >
                    <a class="navbar__link" href={routes::FEED}>"My feed"</a>
                    <a class="navbar__link" href={routes::NEW_POST}>"New post"</a>
                    <a class="navbar__link" href={routes::PROFILE}>"Profile"</a>
                    <span class="navbar__user">{username}</span>
                    <button class="btn navbar__logout" on:click=move |_| navigate.with_value(|navigate| sign_out(auth, navigate))>
                        "Logout"
                    </button>
                </Show>
            </Show>
        </nav>
    }
}
