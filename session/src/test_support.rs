//! Scripted transport and fixtures shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::{Value, json};

use crate::api::ApiClient;
use crate::tokens::MemoryTokenStore;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::types::{GroupSummary, UserProfile};

/// What the stub does with a matched request.
#[derive(Clone, Debug)]
pub(crate) enum StubReply {
    Respond(u16, Value),
    Fail(&'static str),
    Hang,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(Method, String), VecDeque<StubReply>>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from per-route reply queues.
///
/// The last queued reply for a route repeats; unscripted routes answer 404.
/// Clones share state so a test can keep a handle after moving one into a
/// client.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(&self, method: Method, path: &str, reply: StubReply) -> &Self {
        self.lock().routes.entry((method, path.to_owned())).or_default().push_back(reply);
        self
    }

    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.on(method, path, StubReply::Respond(status, body))
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_reply(&self, request: &ApiRequest) -> StubReply {
        let mut state = self.lock();
        state.requests.push(request.clone());
        let Some(queue) = state.routes.get_mut(&(request.method, request.path.clone())) else {
            return StubReply::Respond(404, json!({ "detail": "Not Found" }));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(StubReply::Fail("empty stub queue"))
        } else {
            queue.front().cloned().unwrap_or(StubReply::Fail("empty stub queue"))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        match self.next_reply(&request) {
            StubReply::Respond(status, body) => Ok(ApiResponse::new(status, body)),
            StubReply::Fail(reason) => Err(TransportError(reason.to_owned())),
            StubReply::Hang => std::future::pending().await,
        }
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub(crate) type StubClient = ApiClient<StubTransport, MemoryTokenStore>;

/// Client over a fresh stub and the given token slot, with a short timeout.
pub(crate) fn stub_client(transport: &StubTransport, tokens: &MemoryTokenStore) -> StubClient {
    ApiClient::new(transport.clone(), tokens.clone()).with_timeout(Duration::from_millis(50))
}

pub(crate) fn alice() -> UserProfile {
    UserProfile {
        id: 1,
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        groups: vec![GroupSummary { id: 10, name: "rust".to_owned() }],
    }
}

pub(crate) fn profile_json(profile: &UserProfile) -> Value {
    serde_json::to_value(profile).unwrap_or(Value::Null)
}

pub(crate) fn author_json(id: i64, username: &str) -> Value {
    json!({ "id": id, "username": username, "email": format!("{username}@example.com") })
}

pub(crate) fn post_json(id: i64, author_id: i64, group: Option<(i64, &str)>) -> Value {
    json!({
        "id": id,
        "title": format!("post {id}"),
        "text": "body",
        "date": format!("2024-01-0{}T10:00:00", id % 9 + 1),
        "author_id": author_id,
        "author": author_json(author_id, "alice"),
        "group": group.map(|(group_id, name)| json!({ "id": group_id, "name": name })),
        "comments": []
    })
}
