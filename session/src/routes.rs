//! Route table shared by the web router, the guard, and the terminal client.

/// Public landing view (forum list); logout lands here.
pub const HOME: &str = "/";
/// Login / registration view; the guard redirects here.
pub const LOGIN: &str = "/login";
pub const FEED: &str = "/feed";
pub const PROFILE: &str = "/profile";
pub const CREATE_GROUP: &str = "/create-group";
pub const NEW_POST: &str = "/posts/new";

/// `/groups/{id}`.
#[must_use]
pub fn group(group_id: i64) -> String {
    format!("/groups/{group_id}")
}

/// `/posts/new?group={id}`, pre-selecting the target forum.
#[must_use]
pub fn new_post_in(group_id: i64) -> String {
    format!("{NEW_POST}?group={group_id}")
}

/// `/posts/{id}/edit`.
#[must_use]
pub fn edit_post(post_id: i64) -> String {
    format!("/posts/{post_id}/edit")
}

/// Whether a path is only reachable when signed in.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    matches!(path, FEED | PROFILE | CREATE_GROUP | NEW_POST)
        || (path.starts_with("/posts/") && path.ends_with("/edit"))
}
