//! Browser `localStorage` persistence for the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only state that survives a reload. It is stored under
//! [`session::TOKEN_KEY`]; every other piece of session state is rebuilt
//! from the API on mount.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{StorageError, TokenStore};

/// Token storage backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokens;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_owned()))
}

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let token = local_storage().ok()?.get_item(session::TOKEN_KEY).ok().flatten()?;
            (!token.is_empty()).then_some(token)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(session::TOKEN_KEY, token)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(StorageError::Unavailable("localStorage exists only in the browser".to_owned()))
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(session::TOKEN_KEY)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
