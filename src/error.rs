//! Terminal client error type.

use session::{ApiError, FormError, SessionError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in; run `mural login` first")]
    NotSignedIn,
    #[error("refusing without --yes: {0}")]
    Unconfirmed(String),
    #[error("no config directory found; pass --token-file or set MURAL_TOKEN_FILE")]
    NoConfigDir,
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Form(#[from] FormError),
    #[error("token storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("could not read password: {0}")]
    Prompt(#[from] std::io::Error),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Render an API failure the way the views do, with `fallback` for
    /// bodies that carry no usable detail.
    pub fn api(error: &ApiError, fallback: &str) -> Self {
        Self::Api(error.user_message(fallback))
    }
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::api(&error, session::UNKNOWN_ERROR_MESSAGE)
    }
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Api(error) => error.into(),
            SessionError::Storage(error) => error.into(),
        }
    }
}
