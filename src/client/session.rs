//! Session token state and persistence.
//!
//! The session token is the bearer credential issued at login. It lives in
//! two places: an in-memory slot read at header-composition time, and a
//! persisted copy behind the [`TokenStore`] seam so a session survives
//! process restarts when the host provides durable key-value storage.
//!
//! [`Session::set`] is the only writer path; reads happen synchronously with
//! the request that triggered them, so a plain `RwLock` is all the
//! coordination needed. An in-flight request keeps whatever header was
//! composed at dispatch time.

use parking_lot::RwLock;
use std::sync::Arc;

/// Well-known key under which implementations backed by a shared key-value
/// store should persist the token. Absence means "no active session".
pub const SESSION_TOKEN_KEY: &str = "hivebase.session_token";

/// Persistence seam for the session token.
///
/// The SDK ships [`MemoryTokenStore`]; hosts with durable storage implement
/// this trait over it (keyed by [`SESSION_TOKEN_KEY`]) and pass it to
/// [`HivebaseClient::with_store`](crate::client::HivebaseClient::with_store).
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`; `None` removes the persisted value.
    fn save(&self, token: Option<&str>);
}

/// Process-lifetime token store; the default when no host storage is wired.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.read().clone()
    }

    fn save(&self, token: Option<&str>) {
        *self.slot.write() = token.map(str::to_string);
    }
}

/// In-memory session state over a [`TokenStore`].
///
/// Hydrates from the store at construction, then writes through on every
/// [`set`](Session::set).
pub struct Session {
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Create a session hydrated from `store`.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = RwLock::new(store.load());
        Session { token, store }
    }

    /// The current token, if a session is active.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Replace the token in memory and in the store; `None` clears both.
    ///
    /// Takes effect for subsequent requests only.
    pub fn set(&self, token: Option<&str>) {
        *self.token.write() = token.map(str::to_string);
        self.store.save(token);
        tracing::debug!(active = token.is_some(), "session token updated");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token value stays out of debug output.
        f.debug_struct("Session")
            .field("active", &self.token.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        store.save(Some("tok"));
        assert_eq!(store.load(), Some("tok".to_string()));
        store.save(None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_session_hydrates_from_store() {
        let store = Arc::new(MemoryTokenStore::default());
        store.save(Some("persisted"));
        let session = Session::new(store);
        assert_eq!(session.token(), Some("persisted".to_string()));
    }

    #[test]
    fn test_set_writes_through() {
        let store = Arc::new(MemoryTokenStore::default());
        let session = Session::new(store.clone());
        session.set(Some("tok123"));
        assert_eq!(store.load(), Some("tok123".to_string()));
        session.set(None);
        assert_eq!(session.token(), None);
        assert_eq!(store.load(), None);
    }
}
