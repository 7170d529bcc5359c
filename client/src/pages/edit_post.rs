//! Edit a post the signed-in user wrote. Loads the current title and text,
//! then sends both back with `PUT /posts/{id}`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use session::forms::validate_post_update;
use session::{UNKNOWN_ERROR_MESSAGE, routes};

use crate::state::auth::AuthContext;
use crate::util::auth::RequireAuth;
use crate::util::format::parse_id;

#[component]
pub fn EditPostPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let params = use_params_map();
    let navigate = use_navigate();

    let post_id = move || parse_id(params.get().get("id"));
    let title = RwSignal::new(String::new());
    let text = RwSignal::new(String::new());
    let loaded = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let saved = RwSignal::new(false);

    Effect::new(move || {
        if saved.get() {
            navigate(routes::FEED, NavigateOptions::default());
        }
    });

    Effect::new(move || {
        if !auth.decision().is_allowed() {
            return;
        }
        let Some(id) = post_id() else {
            error.set(Some("Post not found.".to_owned()));
            return;
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().get_post(id).await {
                Ok(post) => {
                    title.set(post.title);
                    text.set(post.text);
                    loaded.set(true);
                }
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(id) = post_id() else {
            return;
        };
        let update = match validate_post_update(&title.get(), &text.get()) {
            Ok(update) => update,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().update_post(id, &update).await {
                Ok(_) => saved.set(true),
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
            busy.set(false);
        });
    };

    view! {
        <RequireAuth>
            <div class="page form-page">
                <h1>"Edit post"</h1>
                <Show when=move || error.get().is_some()>
                    <p class="form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || loaded.get() fallback=|| view! { <p class="page__loading">"Loading post..."</p> }>
                    <form class="form" on:submit=on_submit>
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
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Save"
                        </button>
                        <a class="btn btn--link" href={routes::FEED}>"Cancel"</a>
                    </form>
                </Show>
            </div>
        </RequireAuth>
    }
}
