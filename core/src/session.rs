//! Session state and durable token storage.
//!
//! # Design
//! A `Session` pairs the auth token with its user record, so "both present
//! or both absent" holds structurally. The bearer slot is separate: at
//! startup a previously stored token is restored into it WITHOUT server
//! validation — requests carry the credential, but no authenticated user is
//! claimed until a real login succeeds. This preserves the trust gap of the
//! stored-token model instead of fabricating a session around it.
//!
//! Persistence is a single opaque string behind `TokenStore`. Storage
//! failures are logged, not propagated: a login that succeeded against the
//! server must not be reported as failed because the token file was
//! unwritable.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::types::{AuthResponse, User};

/// An authenticated session: the token and user record are set and cleared
/// together, never one without the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Durable storage for the single auth-token slot. Absence means anonymous.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
    fn clear(&mut self);
}

/// Token persisted as one string in a file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&mut self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            warn!(path = %self.path.display(), error = %e, "failed to persist auth token");
        }
    }

    fn clear(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove stored auth token");
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

/// Holds the current session and the bearer credential attached to requests.
pub struct SessionStore<S: TokenStore> {
    storage: S,
    bearer: Option<String>,
    session: Option<Session>,
}

impl<S: TokenStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            bearer: None,
            session: None,
        }
    }

    /// Load a previously stored token into the bearer slot. The session
    /// itself stays anonymous: the token has not been validated against the
    /// server and there is no user record to pair it with.
    ///
    /// Returns whether a token was found.
    pub fn restore(&mut self) -> bool {
        match self.storage.load() {
            Some(token) => {
                debug!("restored stored auth token");
                self.bearer = Some(token);
                true
            }
            None => false,
        }
    }

    /// Commit a successful auth response: bearer, session, and the durable
    /// token slot are all updated together.
    pub fn establish(&mut self, auth: AuthResponse) -> &Session {
        self.storage.save(&auth.token);
        self.bearer = Some(auth.token.clone());
        self.session.insert(Session {
            token: auth.token,
            user: auth.user,
        })
    }

    /// Drop the session, the bearer credential, and the stored token.
    /// Idempotent.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.bearer = None;
        self.session = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}
