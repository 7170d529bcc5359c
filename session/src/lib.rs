//! Shared session core for the Mural forum clients.
//!
//! This crate owns everything the web client and the terminal client have in
//! common: the API wire types, the HTTP adapter that every call goes through,
//! the session store that decides who is signed in, and the route guard that
//! gates protected views on that decision.
//!
//! ARCHITECTURE
//! ============
//! The runtime is injected at two seams. [`Transport`] moves requests over
//! whatever HTTP stack the host has (`reqwest`, `gloo-net`, a test stub) and
//! [`TokenStore`] persists the bearer token wherever the host keeps durable
//! state (a file, `localStorage`, memory). Everything above those seams is
//! plain async Rust with no executor assumptions.

pub mod api;
pub mod error;
pub mod feed;
pub mod forms;
pub mod guard;
pub mod routes;
pub mod store;
pub mod tokens;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, DEFAULT_TIMEOUT};
pub use error::{
    ApiError, CONNECTIVITY_MESSAGE, ErrorDetail, FieldError, SessionError, StorageError, UNKNOWN_ERROR_MESSAGE,
};
pub use feed::{FeedSection, Membership, ReceivedComment, assemble_feed, received_comments};
pub use forms::FormError;
pub use guard::{GuardDecision, Redirect, guard};
pub use store::{BootstrapOutcome, Phase, RefreshOutcome, Session, SessionStore};
pub use tokens::{MemoryTokenStore, TOKEN_KEY, TokenStore};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError, bearer_header};
