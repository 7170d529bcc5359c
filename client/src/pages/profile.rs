//! The signed-in user's profile: account details, joined forums, their own
//! posts, and the comments those posts received, newest first.

use leptos::prelude::*;
use session::types::Post;
use session::{ReceivedComment, UNKNOWN_ERROR_MESSAGE, received_comments, routes};

use crate::state::auth::AuthContext;
use crate::util::auth::RequireAuth;
use crate::util::format::{count_label, short_date};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = AuthContext::expect();
    let posts = RwSignal::new(Vec::<Post>::new());
    let received = RwSignal::new(Vec::<ReceivedComment>::new());
    let error = RwSignal::new(None::<String>);

    let user_id = Memo::new(move |_| auth.user().map(|user| user.id));
    Effect::new(move || {
        let Some(id) = user_id.get() else {
            return;
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().author_posts(id).await {
                Ok(list) => {
                    received.set(received_comments(&list));
                    posts.set(list);
                }
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
        });
    });

    view! {
        <RequireAuth>
            <div class="page profile-page">
                {move || {
                    auth.user()
                        .map(|user| {
                            let forums = user
                                .groups
                                .into_iter()
                                .map(|group| {
                                    view! {
                                        <li>
                                            <a href=routes::group(group.id)>{group.name}</a>
                                        </li>
                                    }
                                })
                                .collect_view();
                            view! {
                                <header class="page__header">
                                    <h1>{user.username}</h1>
                                    <p class="profile-page__email">{user.email}</p>
                                </header>
                                <h2>"Forums"</h2>
                                <ul class="profile-page__forums">{forums}</ul>
                            }
                        })
                }}

                <Show when=move || error.get().is_some()>
                    <p class="page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <h2>"My posts"</h2>
                <Show when=move || !posts.get().is_empty() fallback=|| view! { <p class="page__empty">"No posts yet."</p> }>
                    <ul class="profile-page__posts">
                        {move || {
                            posts
                                .get()
                                .into_iter()
                                .map(|post| {
                                    let forum = post.group.map(|group| group.name).unwrap_or_default();
                                    let comments = count_label(post.comments.len(), "comment", "comments");
                                    view! {
                                        <li>
                                            <a href=routes::edit_post(post.id)>{post.title}</a>
                                            " in " {forum} " · " {short_date(&post.date).to_owned()} " · " {comments}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>

                <h2>"Comments on my posts"</h2>
                <Show
                    when=move || !received.get().is_empty()
                    fallback=|| view! { <p class="page__empty">"No comments yet."</p> }
                >
                    <ul class="profile-page__received">
                        {move || {
                            received
                                .get()
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <li>
                                            <strong>{item.comment.commenter.username}</strong>
                                            " on "
                                            <em>{item.post_title}</em>
                                            ": "
                                            {item.comment.text}
                                            " (" {short_date(&item.comment.date).to_owned()} ")"
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </div>
        </RequireAuth>
    }
}
