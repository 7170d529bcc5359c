//! HTTP client adapter: the single chokepoint for calls to the forum API.
//!
//! DESIGN
//! ======
//! Every call reads the token store, attaches `Authorization: Bearer <token>`
//! when one is held, and races the transport against one timeout so a hung
//! request is dropped instead of waiting forever. Non-2xx answers become
//! [`ApiError::Status`] with the body's `detail` decoded. There is no retry
//! and no cache.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ErrorDetail};
use crate::tokens::TokenStore;
use crate::transport::{ApiRequest, Method, Transport};
use crate::types::{
    Author, Comment, Credentials, Group, GroupDetails, MessageResponse, NewComment, NewGroup, NewPost, Post,
    PostUpdate, Registration, TokenResponse, UserProfile,
};

/// Timeout applied to every call unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const LOGIN_ENDPOINT: &str = "/login/";
pub const REGISTER_ENDPOINT: &str = "/register/";
pub const ME_ENDPOINT: &str = "/users/me/";
pub const GROUPS_ENDPOINT: &str = "/groups/";
pub const POSTS_ENDPOINT: &str = "/posts/";

fn group_endpoint(group_id: i64) -> String {
    format!("/groups/{group_id}")
}

fn group_details_endpoint(group_id: i64) -> String {
    format!("/groups/{group_id}/details")
}

fn group_join_endpoint(group_id: i64) -> String {
    format!("/groups/{group_id}/join")
}

fn group_leave_endpoint(group_id: i64) -> String {
    format!("/groups/{group_id}/leave")
}

fn post_endpoint(post_id: i64) -> String {
    format!("/posts/{post_id}")
}

fn post_comments_endpoint(post_id: i64) -> String {
    format!("/posts/{post_id}/comments/")
}

fn comment_endpoint(comment_id: i64) -> String {
    format!("/comments/{comment_id}")
}

fn author_posts_endpoint(author_id: i64) -> String {
    format!("/authors/{author_id}/posts/")
}

/// Typed client for the forum API over an injected [`Transport`].
pub struct ApiClient<T, S> {
    transport: T,
    tokens: S,
    timeout: Duration,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(transport: T, tokens: S) -> Self {
        Self { transport, tokens, timeout: DEFAULT_TIMEOUT }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Token storage; only the session store writes through this.
    pub(crate) fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Whether a bearer token is currently held.
    pub fn has_token(&self) -> bool {
        self.tokens.load().is_some()
    }

    // =========================================================================
    // CORE REQUEST PATH
    // =========================================================================

    /// Send a request and return the raw JSON body of a 2xx answer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] when the deadline passes first,
    /// [`ApiError::Network`] when no response arrived, and
    /// [`ApiError::Status`] for non-2xx answers.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let request = ApiRequest { method, path: path.to_owned(), body, bearer: self.tokens.load() };
        tracing::debug!(method = method.as_str(), path, authenticated = request.bearer.is_some(), "api request");

        let response = self
            .race_deadline(self.transport.send(request))
            .await?
            .map_err(|error| ApiError::Network(error.0))?;

        if !response.is_success() {
            let detail = ErrorDetail::from_body(&response.body);
            tracing::debug!(method = method.as_str(), path, status = response.status, %detail, "api request rejected");
            return Err(ApiError::Status { status: response.status, detail });
        }
        Ok(response.body)
    }

    /// Send a request and decode the 2xx body as `R`.
    ///
    /// # Errors
    ///
    /// Everything [`ApiClient::send`] returns, plus [`ApiError::Decode`].
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R, ApiError> {
        let value = self.send(method, path, body).await?;
        serde_json::from_value(value).map_err(|error| ApiError::Decode(error.to_string()))
    }

    async fn race_deadline<F: Future>(&self, operation: F) -> Result<F::Output, ApiError> {
        let operation = pin!(operation);
        let deadline = pin!(self.transport.sleep(self.timeout));
        match select(operation, deadline).await {
            Either::Left((output, _)) => Ok(output),
            Either::Right(((), _)) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis(), "api request timed out");
                Err(ApiError::Timeout(self.timeout))
            }
        }
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /login/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; bad credentials answer 401.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.request(Method::Post, LOGIN_ENDPOINT, Some(encode(credentials)?)).await
    }

    /// `POST /register/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; duplicate usernames/emails answer 400.
    pub async fn register(&self, registration: &Registration) -> Result<Author, ApiError> {
        self.request(Method::Post, REGISTER_ENDPOINT, Some(encode(registration)?)).await
    }

    /// `GET /users/me/` resolves the current profile from the held token.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; a missing or stale token answers 401.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.request(Method::Get, ME_ENDPOINT, None).await
    }

    // =========================================================================
    // GROUPS
    // =========================================================================

    /// `GET /groups/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.request(Method::Get, GROUPS_ENDPOINT, None).await
    }

    /// `POST /groups/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn create_group(&self, group: &NewGroup) -> Result<Group, ApiError> {
        self.request(Method::Post, GROUPS_ENDPOINT, Some(encode(group)?)).await
    }

    /// `GET /groups/{id}/details`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn group_details(&self, group_id: i64) -> Result<GroupDetails, ApiError> {
        self.request(Method::Get, &group_details_endpoint(group_id), None).await
    }

    /// `POST /groups/{id}/join`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn join_group(&self, group_id: i64) -> Result<MessageResponse, ApiError> {
        self.request(Method::Post, &group_join_endpoint(group_id), None).await
    }

    /// `POST /groups/{id}/leave`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn leave_group(&self, group_id: i64) -> Result<MessageResponse, ApiError> {
        self.request(Method::Post, &group_leave_endpoint(group_id), None).await
    }

    /// `DELETE /groups/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; non-creators answer 403.
    pub async fn delete_group(&self, group_id: i64) -> Result<(), ApiError> {
        self.send(Method::Delete, &group_endpoint(group_id), None).await.map(drop)
    }

    // =========================================================================
    // POSTS & COMMENTS
    // =========================================================================

    /// `GET /posts/` lists posts from every group the caller belongs to.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn feed_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.request(Method::Get, POSTS_ENDPOINT, None).await
    }

    /// `POST /posts/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; non-members answer 403.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.request(Method::Post, POSTS_ENDPOINT, Some(encode(post)?)).await
    }

    /// `GET /posts/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get_post(&self, post_id: i64) -> Result<Post, ApiError> {
        self.request(Method::Get, &post_endpoint(post_id), None).await
    }

    /// `PUT /posts/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn update_post(&self, post_id: i64, update: &PostUpdate) -> Result<Post, ApiError> {
        self.request(Method::Put, &post_endpoint(post_id), Some(encode(update)?)).await
    }

    /// `DELETE /posts/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete_post(&self, post_id: i64) -> Result<(), ApiError> {
        self.send(Method::Delete, &post_endpoint(post_id), None).await.map(drop)
    }

    /// `POST /posts/{id}/comments/`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn add_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment, ApiError> {
        self.request(Method::Post, &post_comments_endpoint(post_id), Some(encode(comment)?)).await
    }

    /// `DELETE /comments/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ApiError> {
        self.send(Method::Delete, &comment_endpoint(comment_id), None).await.map(drop)
    }

    /// `GET /authors/{id}/posts/` lists an author's posts with their comments.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn author_posts(&self, author_id: i64) -> Result<Vec<Post>, ApiError> {
        self.request(Method::Get, &author_posts_endpoint(author_id), None).await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|error| ApiError::Encode(error.to_string()))
}
