//! The signed-in user's feed: posts from every joined forum, by forum.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. Loads `/posts/` once the guard allows and again after
//! every mutation, then shapes it with [`session::assemble_feed`] against the
//! current profile so joined forums without posts still get a section.
//!
//! ERROR HANDLING
//! ==============
//! Load failures replace the feed with a message. Mutation failures are
//! shown with `alert` and leave the feed as it was.

use leptos::prelude::*;
use session::feed::drop_section;
use session::forms::validate_comment;
use session::{FeedSection, UNKNOWN_ERROR_MESSAGE, assemble_feed, routes};

use crate::components::post_card::PostCard;
use crate::state::auth::{AuthContext, refresh_notice};
use crate::util::auth::RequireAuth;
use crate::util::browser::{alert, confirm};

#[component]
pub fn FeedPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let sections = RwSignal::new(Vec::<FeedSection>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        let Some(profile) = auth.state.get_untracked().user else {
            return;
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().feed_posts().await {
                Ok(posts) => {
                    sections.set(assemble_feed(&profile, posts));
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message(UNKNOWN_ERROR_MESSAGE))),
            }
            loading.set(false);
        });
    };

    // Reloads whenever the signed-in profile changes (bootstrap, refresh).
    Effect::new(move || {
        if auth.decision().is_allowed() {
            load();
        }
    });

    let on_comment = move |(post_id, text): (i64, String)| {
        let comment = match validate_comment(&text) {
            Ok(comment) => comment,
            Err(e) => {
                alert(&e.to_string());
                return;
            }
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().add_comment(post_id, &comment).await {
                Ok(_) => load(),
                Err(e) => alert(&e.user_message(UNKNOWN_ERROR_MESSAGE)),
            }
        });
    };

    let on_delete_post = move |post_id: i64| {
        if !confirm("Delete this post?") {
            return;
        }
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().delete_post(post_id).await {
                Ok(()) => load(),
                Err(e) => alert(&e.user_message(UNKNOWN_ERROR_MESSAGE)),
            }
        });
    };

    let on_delete_comment = move |comment_id: i64| {
        if !confirm("Delete this comment?") {
            return;
        }
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().delete_comment(comment_id).await {
                Ok(()) => load(),
                Err(e) => alert(&e.user_message(UNKNOWN_ERROR_MESSAGE)),
            }
        });
    };

    let on_leave = move |group_id: i64| {
        if !confirm("Leave this forum?") {
            return;
        }
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match store.api().leave_group(group_id).await {
                Ok(_) => {
                    sections.update(|s| drop_section(s, group_id));
                    if let Some(notice) = refresh_notice(&auth.refresh().await) {
                        alert(&notice);
                    }
                }
                Err(e) => alert(&e.user_message(UNKNOWN_ERROR_MESSAGE)),
            }
        });
    };

    let viewer_id = move || auth.user().map(|user| user.id);

    view! {
        <RequireAuth>
            <div class="page feed-page">
                <header class="page__header">
                    <h1>"My feed"</h1>
                    <a class="btn btn--primary" href={routes::NEW_POST}>"+ New post"</a>
                </header>

                <Show when=move || error.get().is_some()>
                    <p class="page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="page__loading">"Loading feed..."</p> }
                >
                    <Show
                        when=move || !sections.get().is_empty()
                        fallback=|| {
                            view! {
                                <p class="page__empty">
                                    "You have not joined any forums yet. "
                                    <a href={routes::HOME}>"Browse forums"</a>
                                </p>
                            }
                        }
                    >
                        {move || {
                            sections
                                .get()
                                .into_iter()
                                .map(|section| {
                                    view! {
                                        <FeedSectionView
                                            section=section
                                            viewer_id=viewer_id()
                                            on_leave=on_leave
                                            on_delete_post=on_delete_post
                                            on_comment=on_comment
                                            on_delete_comment=on_delete_comment
                                        />
                                    }
                                })
                                .collect_view()
                        }}
                    </Show>
                </Show>
            </div>
        </RequireAuth>
    }
}

#[component]
fn FeedSectionView(
    section: FeedSection,
    viewer_id: Option<i64>,
    #[prop(into)] on_leave: Callback<i64>,
    #[prop(into)] on_delete_post: Callback<i64>,
    #[prop(into)] on_comment: Callback<(i64, String)>,
    #[prop(into)] on_delete_comment: Callback<i64>,
) -> impl IntoView {
    let group_id = section.group.id;
    let posts = if section.posts.is_empty() {
        view! { <p class="feed-section__empty">"No posts yet."</p> }.into_any()
    } else {
        section
            .posts
            .into_iter()
            .map(|post| {
                view! {
                    <PostCard
                        post=post
                        viewer_id=viewer_id
                        on_delete=on_delete_post
                        on_comment=on_comment
                        on_delete_comment=on_delete_comment
                    />
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <section class="feed-section">
            <header class="feed-section__header">
                <a class="feed-section__title" href=routes::group(group_id)>{section.group.name}</a>
                <a class="btn" href=routes::new_post_in(group_id)>"Post here"</a>
                <button class="btn btn--danger" on:click=move |_| on_leave.run(group_id)>"Leave"</button>
            </header>
            {posts}
        </section>
    }
}
