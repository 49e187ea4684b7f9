//! Bearer-token storage.
//!
//! The browser build kept the token in local storage under a fixed key; here
//! the same slot is a file on disk, read on every request so a login or
//! logout performed by another process is picked up without restarting.

use std::path::PathBuf;
use std::sync::Mutex;

/// Source of the bearer token attached to outgoing requests.
///
/// `None` means "no token stored": the request goes out unauthenticated and
/// auth enforcement is left to the server.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Token persisted as the trimmed contents of a file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

/// In-memory token slot for tests and embedders that manage auth themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }

    pub fn set(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}
