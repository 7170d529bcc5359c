//! In-process stub of the forum API for end-to-end tests.
//!
//! Serves the same routes as the real API from an in-memory store so the
//! `reqwest` transport and the commands run against real HTTP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

type Reply = (StatusCode, Json<Value>);

#[derive(Clone)]
struct UserRec {
    id: i64,
    username: String,
    email: String,
    password: String,
}

#[derive(Clone)]
struct GroupRec {
    id: i64,
    name: String,
    description: String,
    creator_id: i64,
    members: Vec<i64>,
}

#[derive(Clone)]
struct PostRec {
    id: i64,
    title: String,
    text: String,
    author_id: i64,
    group_id: i64,
}

#[derive(Clone)]
struct CommentRec {
    id: i64,
    text: String,
    post_id: i64,
    commenter_id: i64,
}

#[derive(Default)]
pub struct Forum {
    users: Vec<UserRec>,
    groups: Vec<GroupRec>,
    posts: Vec<PostRec>,
    comments: Vec<CommentRec>,
    tokens: HashMap<String, i64>,
    next_id: i64,
    /// `Authorization` header of every request, in arrival order.
    pub authorizations: Vec<Option<String>>,
}

pub type SharedForum = Arc<Mutex<Forum>>;

pub fn lock(forum: &SharedForum) -> MutexGuard<'_, Forum> {
    forum.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Forum {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Seed a user and return their id.
    pub fn add_user(&mut self, username: &str, password: &str) -> i64 {
        let id = self.next_id();
        self.users.push(UserRec {
            id,
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password: password.to_owned(),
        });
        id
    }

    /// Seed a group created by `creator_id`, who becomes its first member.
    pub fn add_group(&mut self, name: &str, creator_id: i64) -> i64 {
        let id = self.next_id();
        self.groups.push(GroupRec {
            id,
            name: name.to_owned(),
            description: format!("all about {name}"),
            creator_id,
            members: vec![creator_id],
        });
        id
    }

    pub fn add_post(&mut self, title: &str, author_id: i64, group_id: i64) -> i64 {
        let id = self.next_id();
        self.posts.push(PostRec { id, title: title.to_owned(), text: "hello".to_owned(), author_id, group_id });
        id
    }

    pub fn add_comment(&mut self, text: &str, post_id: i64, commenter_id: i64) -> i64 {
        let id = self.next_id();
        self.comments.push(CommentRec { id, text: text.to_owned(), post_id, commenter_id });
        id
    }

    pub fn is_member(&self, group_id: i64, user_id: i64) -> bool {
        self.groups.iter().any(|g| g.id == group_id && g.members.contains(&user_id))
    }

    pub fn has_post(&self, post_id: i64) -> bool {
        self.posts.iter().any(|p| p.id == post_id)
    }

    pub fn post_title(&self, post_id: i64) -> Option<String> {
        self.posts.iter().find(|p| p.id == post_id).map(|p| p.title.clone())
    }

    fn author(&self, id: i64) -> Value {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map_or(Value::Null, |u| json!({ "id": u.id, "username": u.username, "email": u.email }))
    }

    fn group(&self, group: &GroupRec) -> Value {
        json!({
            "id": group.id,
            "name": group.name,
            "description": group.description,
            "creator": self.author(group.creator_id),
        })
    }

    fn comment(&self, comment: &CommentRec) -> Value {
        json!({
            "id": comment.id,
            "title": "Comment",
            "text": comment.text,
            "date": format!("2024-01-01T00:00:{:02}", comment.id % 60),
            "post_id": comment.post_id,
            "commenter_id": comment.commenter_id,
            "commenter": self.author(comment.commenter_id),
        })
    }

    fn post(&self, post: &PostRec) -> Value {
        let group = self.groups.iter().find(|g| g.id == post.group_id).map(|g| self.group(g));
        let comments: Vec<Value> =
            self.comments.iter().filter(|c| c.post_id == post.id).map(|c| self.comment(c)).collect();
        json!({
            "id": post.id,
            "title": post.title,
            "text": post.text,
            "date": "2024-01-01T00:00:00",
            "author_id": post.author_id,
            "author": self.author(post.author_id),
            "group": group,
            "comments": comments,
        })
    }

    fn profile(&self, user_id: i64) -> Value {
        let mut profile = self.author(user_id);
        let groups: Vec<Value> = self
            .groups
            .iter()
            .filter(|g| g.members.contains(&user_id))
            .map(|g| json!({ "id": g.id, "name": g.name }))
            .collect();
        profile["groups"] = Value::Array(groups);
        profile
    }
}

/// Start the stub on an ephemeral port and return its base URL.
pub async fn spawn_stub_api(forum: SharedForum) -> String {
    let app = Router::new()
        .route("/login/", post(login))
        .route("/register/", post(register))
        .route("/users/me/", get(me))
        .route("/groups/", get(list_groups).post(create_group))
        .route("/groups/{id}", delete(delete_group))
        .route("/groups/{id}/details", get(group_details))
        .route("/groups/{id}/join", post(join_group))
        .route("/groups/{id}/leave", post(leave_group))
        .route("/posts/", get(feed).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/{id}/comments/", post(add_comment))
        .route("/comments/{id}", delete(delete_comment))
        .route("/authors/{id}/posts/", get(author_posts))
        .with_state(forum);

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.expect("bind stub api");
    let addr = listener.local_addr().expect("stub api addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "detail": message })))
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn caller(forum: &SharedForum, headers: &HeaderMap) -> Result<i64, Reply> {
    let authorization = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let mut state = lock(forum);
    state.authorizations.push(authorization.clone());
    authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.get(token).copied())
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
}

fn record(forum: &SharedForum, headers: &HeaderMap) {
    let authorization = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
    lock(forum).authorizations.push(authorization);
}

fn text_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_owned)
}

fn missing(field: &str) -> Reply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "loc": ["body", field], "msg": "Field required", "type": "missing" }] })),
    )
}

async fn login(State(forum): State<SharedForum>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    record(&forum, &headers);
    let mut state = lock(&forum);
    let username = text_field(&body, "username").unwrap_or_default();
    let password = text_field(&body, "password").unwrap_or_default();
    let Some(user_id) = state.users.iter().find(|u| u.username == username && u.password == password).map(|u| u.id)
    else {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    };
    let token = format!("token-{username}-{}", state.tokens.len() + 1);
    state.tokens.insert(token.clone(), user_id);
    ok(json!({ "access_token": token, "token_type": "bearer" }))
}

async fn register(State(forum): State<SharedForum>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    record(&forum, &headers);
    let (Some(username), Some(password)) = (text_field(&body, "username"), text_field(&body, "password")) else {
        return missing("username");
    };
    let mut state = lock(&forum);
    if state.users.iter().any(|u| u.username == username) {
        return detail(StatusCode::BAD_REQUEST, "Username already registered");
    }
    let id = state.add_user(&username, &password);
    ok(state.author(id))
}

async fn me(State(forum): State<SharedForum>, headers: HeaderMap) -> Reply {
    match caller(&forum, &headers) {
        Ok(user_id) => ok(lock(&forum).profile(user_id)),
        Err(reply) => reply,
    }
}

async fn list_groups(State(forum): State<SharedForum>, headers: HeaderMap) -> Reply {
    record(&forum, &headers);
    let state = lock(&forum);
    ok(Value::Array(state.groups.iter().map(|g| state.group(g)).collect()))
}

async fn create_group(State(forum): State<SharedForum>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let Some(name) = text_field(&body, "name") else {
        return missing("name");
    };
    let mut state = lock(&forum);
    if state.groups.iter().any(|g| g.name == name) {
        return detail(StatusCode::BAD_REQUEST, "Group name already exists");
    }
    let id = state.add_group(&name, user_id);
    if let Some(group) = state.groups.iter_mut().find(|g| g.id == id) {
        group.description = text_field(&body, "description").unwrap_or_default();
    }
    let group = state.groups.iter().find(|g| g.id == id).cloned();
    group.map_or_else(|| detail(StatusCode::INTERNAL_SERVER_ERROR, "lost group"), |g| ok(state.group(&g)))
}

async fn group_details(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    record(&forum, &headers);
    let state = lock(&forum);
    let Some(group) = state.groups.iter().find(|g| g.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Group not found");
    };
    let mut body = state.group(group);
    body["members"] = Value::Array(group.members.iter().map(|m| state.author(*m)).collect());
    ok(body)
}

async fn join_group(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    let Some(group) = state.groups.iter_mut().find(|g| g.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Group not found");
    };
    if group.members.contains(&user_id) {
        return detail(StatusCode::BAD_REQUEST, "You are already a member of this group");
    }
    group.members.push(user_id);
    ok(json!({ "message": format!("Joined {}", group.name) }))
}

async fn leave_group(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    let Some(group) = state.groups.iter_mut().find(|g| g.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Group not found");
    };
    if !group.members.contains(&user_id) {
        return detail(StatusCode::BAD_REQUEST, "You are not a member of this group");
    }
    group.members.retain(|m| *m != user_id);
    ok(json!({ "message": format!("Left {}", group.name) }))
}

async fn delete_group(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    match state.groups.iter().find(|g| g.id == id).map(|g| g.creator_id) {
        None => detail(StatusCode::NOT_FOUND, "Group not found"),
        Some(creator_id) if creator_id != user_id => {
            detail(StatusCode::FORBIDDEN, "Only the creator can delete this group")
        }
        Some(_) => {
            state.groups.retain(|g| g.id != id);
            state.posts.retain(|p| p.group_id != id);
            (StatusCode::NO_CONTENT, Json(Value::Null))
        }
    }
}

async fn feed(State(forum): State<SharedForum>, headers: HeaderMap) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let state = lock(&forum);
    let posts = state.posts.iter().filter(|p| state.is_member(p.group_id, user_id)).map(|p| state.post(p)).collect();
    ok(Value::Array(posts))
}

async fn create_post(State(forum): State<SharedForum>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let Some(group_id) = body.get("group_id").and_then(Value::as_i64) else {
        return missing("group_id");
    };
    let mut state = lock(&forum);
    if !state.is_member(group_id, user_id) {
        return detail(StatusCode::FORBIDDEN, "You must be a member of the group to post");
    }
    let id = state.add_post(&text_field(&body, "title").unwrap_or_default(), user_id, group_id);
    if let Some(post) = state.posts.iter_mut().find(|p| p.id == id) {
        post.text = text_field(&body, "text").unwrap_or_default();
    }
    let post = state.posts.iter().find(|p| p.id == id).cloned();
    post.map_or_else(|| detail(StatusCode::INTERNAL_SERVER_ERROR, "lost post"), |p| ok(state.post(&p)))
}

async fn get_post(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    if let Err(reply) = caller(&forum, &headers) {
        return reply;
    }
    let state = lock(&forum);
    state
        .posts
        .iter()
        .find(|p| p.id == id)
        .map_or_else(|| detail(StatusCode::NOT_FOUND, "Post not found"), |p| ok(state.post(p)))
}

async fn update_post(
    State(forum): State<SharedForum>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    let Some(post) = state.posts.iter_mut().find(|p| p.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Post not found");
    };
    if post.author_id != user_id {
        return detail(StatusCode::FORBIDDEN, "Not authorized to edit this post");
    }
    if let Some(title) = text_field(&body, "title") {
        post.title = title;
    }
    if let Some(text) = text_field(&body, "text") {
        post.text = text;
    }
    let post = post.clone();
    ok(state.post(&post))
}

async fn delete_post(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    match state.posts.iter().find(|p| p.id == id).map(|p| p.author_id) {
        None => detail(StatusCode::NOT_FOUND, "Post not found"),
        Some(author_id) if author_id != user_id => detail(StatusCode::FORBIDDEN, "Not authorized to delete this post"),
        Some(_) => {
            state.posts.retain(|p| p.id != id);
            (StatusCode::NO_CONTENT, Json(Value::Null))
        }
    }
}

async fn add_comment(
    State(forum): State<SharedForum>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    if !state.has_post(id) {
        return detail(StatusCode::NOT_FOUND, "Post not found");
    }
    let comment_id = state.add_comment(&text_field(&body, "text").unwrap_or_default(), id, user_id);
    let comment = state.comments.iter().find(|c| c.id == comment_id).cloned();
    comment.map_or_else(|| detail(StatusCode::INTERNAL_SERVER_ERROR, "lost comment"), |c| ok(state.comment(&c)))
}

async fn delete_comment(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let user_id = match caller(&forum, &headers) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    let mut state = lock(&forum);
    match state.comments.iter().find(|c| c.id == id).map(|c| c.commenter_id) {
        None => detail(StatusCode::NOT_FOUND, "Comment not found"),
        Some(commenter_id) if commenter_id != user_id => {
            detail(StatusCode::FORBIDDEN, "Not authorized to delete this comment")
        }
        Some(_) => {
            state.comments.retain(|c| c.id != id);
            (StatusCode::NO_CONTENT, Json(Value::Null))
        }
    }
}

async fn author_posts(State(forum): State<SharedForum>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    if let Err(reply) = caller(&forum, &headers) {
        return reply;
    }
    let state = lock(&forum);
    ok(Value::Array(state.posts.iter().filter(|p| p.author_id == id).map(|p| state.post(p)).collect()))
}
