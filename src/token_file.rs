//! File-backed token storage for the terminal client.
//!
//! The token lives alone in a file (default `<config dir>/mural/token`),
//! created owner-only on unix. A missing or empty file means signed out.

#[cfg(test)]
#[path = "token_file_test.rs"]
mod token_file_test;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use session::{StorageError, TokenStore};

#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(token.as_bytes())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_owned())
            }
            Err(error) => {
                if error.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %error, "could not read token file");
                }
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.write(token).map_err(|error| StorageError::Write(format!("{}: {error}", self.path.display())))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Write(format!("{}: {error}", self.path.display()))),
        }
    }
}
