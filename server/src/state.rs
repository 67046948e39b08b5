//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed config, the optional Spotify client, and the in-memory
//! session store.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::session::SessionStore;
use crate::services::spotify::SpotifyClient;

/// Clone is required by Axum: all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` if Spotify env vars are not configured; login routes answer 503.
    pub spotify: Option<Arc<SpotifyClient>>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, spotify: Option<SpotifyClient>) -> Self {
        Self { config: Arc::new(config), spotify: spotify.map(Arc::new), sessions: SessionStore::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
