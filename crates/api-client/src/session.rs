//! Session state shared by all clones of a client

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Holds the `x-picnic-auth` token
///
/// The lock is only held long enough to copy or replace the string.
#[derive(Default)]
pub struct Session {
    auth_key: RwLock<Option<String>>,
}

impl Session {
    /// Create a session, optionally with an existing token
    #[must_use]
    pub fn new(auth_key: Option<String>) -> Self {
        Self {
            auth_key: RwLock::new(auth_key),
        }
    }

    /// Current token, if any
    #[must_use]
    pub fn auth_key(&self) -> Option<String> {
        self.auth_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is present
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the token
    pub fn set_auth_key(&self, key: impl Into<String>) {
        *self.auth_key.write().unwrap_or_else(PoisonError::into_inner) = Some(key.into());
    }

    /// Drop the token
    pub fn clear(&self) {
        *self.auth_key.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
