//! Forum detail page: description, members, and membership actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Which buttons appear is decided by [`session::Membership`]
//! from the details and the signed-in profile. Every membership change is
//! followed by a profile refresh so the feed sees it, then a re-fetch of the
//! details.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use session::types::GroupDetails;
use session::{Membership, UNKNOWN_ERROR_MESSAGE, routes};

use crate::state::auth::{AuthContext, refresh_notice};
use crate::util::browser::{alert, confirm};
use crate::util::format::{initial, parse_id};

#[derive(Clone, Copy)]
enum Action {
    Join,
    Leave,
    Delete,
}

#[component]
pub fn GroupPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let params = use_params_map();
    let navigate = use_navigate();

    let group_id = move || parse_id(params.get().get("id"));
    let details = RwSignal::new(None::<GroupDetails>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let deleted = RwSignal::new(false);

    Effect::new(move || {
        if deleted.get() {
            navigate(routes::HOME, NavigateOptions::default());
        }
    });

    let load = move |id: i64| {
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().group_details(id).await {
                Ok(found) => {
                    details.set(Some(found));
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
        });
    };

    Effect::new(move || match group_id() {
        Some(id) => load(id),
        None => error.set(Some("Forum not found.".to_owned())),
    });

    let run = move |action: Action| {
        let Some(id) = group_id() else {
            return;
        };
        if busy.get() {
            return;
        }
        if matches!(action, Action::Delete) && !confirm("Delete this forum? This cannot be undone.") {
            return;
        }
        busy.set(true);
        let store = auth.store();
        leptos::task::spawn_local(async move {
            let api = store.api();
            let result = match action {
                Action::Join => api.join_group(id).await.map(|_| ()),
                Action::Leave => api.leave_group(id).await.map(|_| ()),
                Action::Delete => api.delete_group(id).await,
            };
            match result {
                Ok(()) => {
                    if let Some(notice) = refresh_notice(&auth.refresh().await) {
                        alert(&notice);
                    }
                    if matches!(action, Action::Delete) {
                        deleted.set(true);
                    } else {
                        load(id);
                    }
                }
                Err(e) => alert(&e.user_message(UNKNOWN_ERROR_MESSAGE)),
            }
            busy.set(false);
        });
    };

    let membership = move || details.get().map(|d| Membership::of(&d, auth.user().as_ref()));

    view! {
        <div class="page group-page">
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            {move || {
                details
                    .get()
                    .map(|d| {
                        let members = d
                            .members
                            .iter()
                            .map(|member| {
                                let avatar = initial(&member.username);
                                let name = member.username.clone();
                                view! {
                                    <li class="member">
                                        <span class="member__avatar">{avatar}</span>
                                        <span class="member__name">{name}</span>
                                    </li>
                                }
                            })
                            .collect_view();
                        let creator = d.group.creator.as_ref().map(|c| c.username.clone());
                        view! {
                            <header class="page__header">
                                <h1>{d.group.name.clone()}</h1>
                            </header>
                            <p class="group-page__description">{d.group.description.clone().unwrap_or_default()}</p>
                            {creator.map(|name| view! { <p class="group-page__creator">"Created by " {name}</p> })}
                            <h2>{format!("Members ({})", d.members.len())}</h2>
                            <ul class="member-list">{members}</ul>
                        }
                    })
            }}

            <div class="group-page__actions">
                <Show when=move || membership().is_some_and(|m| !m.signed_in)>
                    <a class="btn btn--primary" href={routes::LOGIN}>"Sign in to join"</a>
                </Show>
                <Show when=move || membership().is_some_and(Membership::can_join)>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| run(Action::Join)>
                        "Join forum"
                    </button>
                </Show>
                <Show when=move || membership().is_some_and(Membership::can_post)>
                    <a
                        class="btn"
                        href=move || group_id().map(routes::new_post_in).unwrap_or_default()
                    >
                        "New post"
                    </a>
                </Show>
                <Show when=move || membership().is_some_and(Membership::can_leave)>
                    <button class="btn" disabled=move || busy.get() on:click=move |_| run(Action::Leave)>
                        "Leave forum"
                    </button>
                </Show>
                <Show when=move || membership().is_some_and(Membership::can_delete)>
                    <button class="btn btn--danger" disabled=move || busy.get() on:click=move |_| run(Action::Delete)>
                        "Delete forum"
                    </button>
                </Show>
            </div>
        </div>
    }
}
