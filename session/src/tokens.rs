//! Durable bearer-token storage seam.
//!
//! The token is the only piece of client state that survives a reload. Each
//! host decides where it lives; the session store is the only writer.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;

/// Fixed key the token is stored under.
pub const TOKEN_KEY: &str = "mural_token";

/// Host-provided persistence for the bearer token.
pub trait TokenStore {
    /// The stored token, if any. Unreadable storage reads as empty.
    fn load(&self) -> Option<String>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the token could not be persisted.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage rejected the removal.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local token store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token.to_owned()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
