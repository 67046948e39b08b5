//! In-memory session store.
//!
//! ARCHITECTURE
//! ============
//! The browser only ever holds an opaque random token in an HttpOnly cookie.
//! The Spotify access token it maps to stays server-side and expires with the
//! grant, after which the token is rejected and the client re-enters login.
//!
//! TRADE-OFFS
//! ==========
//! Sessions live in process memory, so a restart logs everyone out. Nothing
//! else in this backend needs durable state.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone)]
struct SessionRecord {
    access_token: String,
    expires_at: Instant,
}

/// Session token → Spotify access token, shared across handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an access token, returning the session token.
    pub async fn create(&self, access_token: String, ttl: Duration) -> String {
        self.create_at(access_token, ttl, Instant::now()).await
    }

    pub(crate) async fn create_at(&self, access_token: String, ttl: Duration, now: Instant) -> String {
        let token = generate_token();
        let record = SessionRecord { access_token, expires_at: now + ttl };
        self.inner.write().await.insert(token.clone(), record);
        token
    }

    /// Return the access token behind a live session.
    ///
    /// An expired session is removed on the way out.
    pub async fn validate(&self, token: &str) -> Option<String> {
        self.validate_at(token, Instant::now()).await
    }

    pub(crate) async fn validate_at(&self, token: &str, now: Instant) -> Option<String> {
        {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                None => return None,
                Some(record) if record.expires_at > now => return Some(record.access_token.clone()),
                Some(_) => {}
            }
        }
        self.inner.write().await.remove(token);
        None
    }

    pub async fn delete(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    /// Drop every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    pub(crate) async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| record.expires_at > now);
        before - sessions.len()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Periodically purge expired sessions.
pub fn spawn_purge_task(store: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                let live = store.count().await;
                tracing::debug!(purged, live, "expired sessions purged");
            }
        }
    })
}
