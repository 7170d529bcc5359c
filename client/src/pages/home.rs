//! Public forum directory.
//!
//! Lists every forum with its description and creator. Signed-in users get a
//! link to create a new one.

use leptos::prelude::*;
use session::types::Group;
use session::{UNKNOWN_ERROR_MESSAGE, routes};

use crate::state::auth::AuthContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = AuthContext::expect();
    let groups = RwSignal::new(Vec::<Group>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let store = auth.store();
    leptos::task::spawn_local(async move {
        match store.api().list_groups().await {
            Ok(list) => groups.set(list),
            Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
        }
        loading.set(false);
    });

    view! {
        <div class="page home-page">
            <header class="page__header">
                <h1>"Forums"</h1>
                <Show when=move || auth.user().is_some()>
                    <a class="btn btn--primary" href={routes::CREATE_GROUP}>"+ New forum"</a>
                </Show>
            </header>

            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="page__loading">"Loading forums..."</p> }
            >
                <Show
                    when=move || !groups.get().is_empty()
                    fallback=|| view! { <p class="page__empty">"No forums yet."</p> }
                >
                    <ul class="group-list">
                        <For each=move || groups.get() key=|group| group.id let:group>
                            <GroupRow group=group/>
                        </For>
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn GroupRow(group: Group) -> impl IntoView {
    let creator = group.creator.map(|author| author.username);
    view! {
        <li class="group-list__item">
            <a class="group-list__name" href=routes::group(group.id)>{group.name}</a>
            <p class="group-list__description">{group.description.unwrap_or_default()}</p>
            {creator.map(|name| view! { <p class="group-list__creator">"Created by " {name}</p> })}
        </li>
    }
}
