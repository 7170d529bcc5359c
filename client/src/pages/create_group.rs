//! Create-forum form. The creator becomes the first member, so the profile is
//! refreshed before moving to the new forum's page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::forms::validate_group;
use session::{UNKNOWN_ERROR_MESSAGE, routes};

use crate::state::auth::{AuthContext, refresh_notice};
use crate::util::auth::RequireAuth;
use crate::util::browser::alert;

#[component]
pub fn CreateGroupPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let created = RwSignal::new(None::<i64>);

    Effect::new(move || {
        if let Some(id) = created.get() {
            navigate(&routes::group(id), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let group = match validate_group(&name.get(), &description.get()) {
            Ok(group) => group,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().create_group(&group).await {
                Ok(group) => {
                    if let Some(notice) = refresh_notice(&auth.refresh().await) {
                        alert(&notice);
                    }
                    created.set(Some(group.id));
                }
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
            busy.set(false);
        });
    };

    view! {
        <RequireAuth>
            <div class="page form-page">
                <h1>"New forum"</h1>
                <form class="form" on:submit=on_submit>
                    <label class="form__label">
                        "Name"
                        <input
                            class="input"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form__label">
                        "Description"
                        <textarea
                            class="input"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <Show when=move || error.get().is_some()>
                        <p class="form__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Create forum"
                    </button>
                </form>
            </div>
        </RequireAuth>
    }
}
