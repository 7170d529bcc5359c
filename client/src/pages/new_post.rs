//! New-post form. `?group=ID` preselects the forum; otherwise the first
//! joined forum is selected. Only joined forums are offered.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use session::forms::validate_post;
use session::{UNKNOWN_ERROR_MESSAGE, routes};

use crate::state::auth::AuthContext;
use crate::util::auth::RequireAuth;
use crate::util::format::parse_id;

#[component]
pub fn NewPostPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let query = use_query_map();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let text = RwSignal::new(String::new());
    let chosen = RwSignal::new(None::<i64>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let posted = RwSignal::new(false);

    let groups = move || auth.user().map(|user| user.groups).unwrap_or_default();

    // Explicit choice, then the query parameter, then the first joined forum.
    let selected = move || {
        chosen
            .get()
            .or_else(|| parse_id(query.get().get("group")))
            .or_else(|| groups().first().map(|group| group.id))
    };

    Effect::new(move || {
        if posted.get() {
            navigate(routes::FEED, NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let post = match validate_post(&title.get(), &text.get(), selected()) {
            Ok(post) => post,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().create_post(&post).await {
                Ok(_) => posted.set(true),
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
            busy.set(false);
        });
    };

    view! {
        <RequireAuth>
            <div class="page form-page">
                <h1>"New post"</h1>
                <Show
                    when=move || !groups().is_empty()
                    fallback=|| {
                        view! {
                            <p class="page__empty">
                                "Join a forum before posting. "
                                <a href={routes::HOME}>"Browse forums"</a>
                            </p>
                        }
                    }
                >
                    <form class="form" on:submit=on_submit>
                        <label class="form__label">
                            "Forum"
                            <select
                                class="input"
                                on:change=move |ev| chosen.set(event_target_value(&ev).parse().ok())
                            >
                                {move || {
                                    let current = selected();
                                    groups()
                                        .into_iter()
                                        .map(|group| {
                                            view! {
                                                <option value={group.id.to_string()} selected={current == Some(group.id)}>
                                                    {group.name}
                                                </option>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </select>
                        </label>
                        <label class="form__label">
                            "Title"
                            <input
                                class="input"
                                type="text"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="form__label">
                            "Text"
                            <textarea
                                class="input"
                                rows="6"
                                prop:value=move || text.get()
                                on:input=move |ev| text.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <Show when=move || error.get().is_some()>
                            <p class="form__error">{move || error.get().unwrap_or_default()}</p>
                        </Show>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Publish"
                        </button>
                    </form>
                </Show>
            </div>
        </RequireAuth>
    }
}
