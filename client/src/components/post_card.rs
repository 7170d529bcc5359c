//! A post with its comments, as shown in the feed.
//!
//! DESIGN
//! ======
//! The card only renders and collects input. Deleting and commenting are
//! reported through callbacks so the owning page can call the API and
//! re-fetch in one place.

use leptos::prelude::*;
use session::routes;
use session::types::{Comment, Post};

use crate::util::format::{count_label, short_date};

/// One feed post. Edit/delete controls appear only for the post's author;
/// comment delete only for the comment's author.
#[component]
pub fn PostCard(
    post: Post,
    viewer_id: Option<i64>,
    #[prop(into)] on_delete: Callback<i64>,
    #[prop(into)] on_comment: Callback<(i64, String)>,
    #[prop(into)] on_delete_comment: Callback<i64>,
) -> impl IntoView {
    let post_id = post.id;
    let owned = viewer_id.is_some_and(|id| post.is_owned_by(id));
    let draft = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get();
        if text.trim().is_empty() {
            return;
        }
        on_comment.run((post_id, text));
        draft.set(String::new());
    };

    let comment_count = count_label(post.comments.len(), "comment", "comments");
    let comments = post
        .comments
        .into_iter()
        .map(|comment| view! { <CommentRow comment=comment viewer_id=viewer_id on_delete=on_delete_comment/> })
        .collect_view();

    view! {
        <article class="post-card">
            <header class="post-card__header">
                <h3 class="post-card__title">{post.title}</h3>
                <Show when=move || owned>
                    <a class="post-card__edit" href=routes::edit_post(post_id) title="Edit post">
                        "Edit"
                    </a>
                    <button
                        class="btn btn--danger post-card__delete"
                        on:click=move |_| on_delete.run(post_id)
                        title="Delete post"
                    >
                        "Delete"
                    </button>
                </Show>
            </header>
            <p class="post-card__meta">
                "by " <strong>{post.author.username}</strong> " on " {short_date(&post.date).to_owned()}
            </p>
            <p class="post-card__text">{post.text}</p>
            <section class="post-card__comments">
                <h4>{comment_count}</h4>
                {comments}
                <form class="post-card__comment-form" on:submit=on_submit>
                    <input
                        class="input"
                        type="text"
                        placeholder="Write a comment..."
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button class="btn" type="submit">"Comment"</button>
                </form>
            </section>
        </article>
    }
}

#[component]
fn CommentRow(comment: Comment, viewer_id: Option<i64>, on_delete: Callback<i64>) -> impl IntoView {
    let comment_id = comment.id;
    let owned = viewer_id.is_some_and(|id| comment.is_owned_by(id));
    view! {
        <div class="comment">
            <strong>{comment.commenter.username}</strong>
            ": "
            <span>{comment.text}</span>
            <Show when=move || owned>
                <button
                    class="btn btn--link comment__delete"
                    on:click=move |_| on_delete.run(comment_id)
                    title="Delete comment"
                >
                    "✕"
                </button>
            </Show>
        </div>
    }
}
