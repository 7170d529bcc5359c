//! Wire DTOs for the forum API.
//!
//! DESIGN
//! ======
//! Field names mirror the JSON the API emits so serde stays declarative.
//! Fields the API sometimes omits (`groups`, `description`, `comments`)
//! default instead of failing the whole payload.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title the API requires on comments; the UI never asks for one.
pub const DEFAULT_COMMENT_TITLE: &str = "Comment";

// =============================================================================
// IDENTITY
// =============================================================================

/// Minimal group reference embedded in the current user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
}

/// The canonical "who am I" record returned by `GET /users/me/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Groups the user belongs to.
    #[serde(default)]
    pub groups: Vec<GroupSummary>,
}

impl UserProfile {
    /// Whether the profile lists `group_id` among its memberships.
    #[must_use]
    pub fn is_member_of(&self, group_id: i64) -> bool {
        self.groups.iter().any(|group| group.id == group_id)
    }
}

/// Public author record attached to groups, posts, and comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

// =============================================================================
// GROUPS
// =============================================================================

/// A forum as listed by `GET /groups/` and embedded in posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<Author>,
}

impl Group {
    #[must_use]
    pub fn summary(&self) -> GroupSummary {
        GroupSummary { id: self.id, name: self.name.clone() }
    }
}

impl From<GroupSummary> for Group {
    fn from(summary: GroupSummary) -> Self {
        Self { id: summary.id, name: summary.name, description: None, creator: None }
    }
}

/// Group detail with its member list, from `GET /groups/{id}/details`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetails {
    #[serde(flatten)]
    pub group: Group,
    #[serde(default)]
    pub members: Vec<Author>,
}

// =============================================================================
// POSTS & COMMENTS
// =============================================================================

/// A message posted inside a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// ISO 8601 timestamp as sent by the API.
    pub date: String,
    pub author_id: i64,
    pub author: Author,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    #[must_use]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.author.id == user_id
    }
}

/// A comment on a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub text: String,
    /// ISO 8601 timestamp as sent by the API.
    pub date: String,
    pub post_id: i64,
    pub commenter_id: i64,
    pub commenter: Author,
}

impl Comment {
    #[must_use]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.commenter.id == user_id
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /login/`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /register/`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /login/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Body of `POST /groups/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
}

/// Body of `POST /posts/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub group_id: i64,
}

/// Body of `PUT /posts/{id}`; absent fields are left untouched by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of `POST /posts/{id}/comments/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub title: String,
    pub text: String,
}

impl NewComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { title: DEFAULT_COMMENT_TITLE.to_owned(), text: text.into() }
    }
}

/// Acknowledgement returned by join/leave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
