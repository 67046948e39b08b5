//! Backend configuration parsed from environment variables.
//!
//! Both config types are built from a key lookup function so parsing can be
//! tested without touching the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

use reqwest::Url;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
/// Loopback spelling of the dev frontend; browsers treat it as a distinct origin.
pub const DEFAULT_FRONTEND_ALIAS: &str = "http://127.0.0.1:5173";
pub const DEFAULT_TOP_ARTISTS_LIMIT: u8 = 4;
pub const MAX_TOP_ARTISTS_LIMIT: u8 = 50;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const SCOPE: &str = "user-top-read user-read-recently-played";

/// Parse the usual spellings of a boolean flag.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn trim_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Split a comma-separated origin list, dropping blanks and duplicates.
fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for origin in raw.split(',').map(trim_url).filter(|o| !o.is_empty()) {
        if !origins.contains(&origin) {
            origins.push(origin);
        }
    }
    origins
}

// =============================================================================
// SERVER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Origin of the browser client the callback sends users back to.
    pub frontend_url: String,
    /// Origins allowed to make credentialed cross-origin requests.
    pub allowed_origins: Vec<String>,
    pub top_artists_limit: u8,
    /// Session lifetime when the token grant carries no `expires_in`.
    pub session_ttl: Duration,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// - `PORT`: default 5001
    /// - `FRONTEND_URL`: default `http://localhost:5173`
    /// - `TOP_ARTISTS_LIMIT`: default 50, clamped to 1..=50
    /// - `SESSION_TTL_SECS`: default 3600
    /// - `COOKIE_SECURE`: explicit flag, else inferred from an `https://` `REDIRECT_URI`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let allowed_origins = lookup("FRONTEND_URL")
            .map(|v| parse_origins(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_FRONTEND_URL.to_owned(), DEFAULT_FRONTEND_ALIAS.to_owned()]);
        let frontend_url = allowed_origins
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());
        let top_artists_limit = lookup("TOP_ARTISTS_LIMIT")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(DEFAULT_TOP_ARTISTS_LIMIT)
            .clamp(1, MAX_TOP_ARTISTS_LIMIT);
        let session_ttl_secs = lookup("SESSION_TTL_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);
        let cookie_secure = lookup("COOKIE_SECURE")
            .and_then(|v| parse_bool(&v))
            .unwrap_or_else(|| lookup("REDIRECT_URI").is_some_and(|uri| uri.trim().starts_with("https://")));

        Self {
            port,
            frontend_url,
            allowed_origins,
            top_artists_limit,
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_secure,
        }
    }

    /// Where the callback sends the browser once the session cookie is set.
    #[must_use]
    pub fn post_login_url(&self) -> String {
        format!("{}{}", self.frontend_url, wrapped::config::WRAPPED_PATH)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// =============================================================================
// SPOTIFY
// =============================================================================

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    authorize_endpoint: Url,
    token_endpoint: Url,
    api_base: String,
}

impl SpotifyConfig {
    /// Build a config against explicit accounts and API base URLs.
    ///
    /// # Errors
    ///
    /// Returns the offending value if either base URL does not parse.
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        accounts_url: &str,
        api_url: &str,
    ) -> Result<Self, String> {
        let accounts = trim_url(accounts_url);
        let authorize_endpoint =
            Url::parse(&format!("{accounts}/authorize")).map_err(|e| format!("{accounts_url}: {e}"))?;
        let token_endpoint = Url::parse(&format!("{accounts}/api/token")).map_err(|e| format!("{accounts_url}: {e}"))?;
        let api_base = trim_url(api_url);
        Url::parse(&api_base).map_err(|e| format!("{api_url}: {e}"))?;
        Ok(Self { client_id, client_secret, redirect_uri, authorize_endpoint, token_endpoint, api_base })
    }

    /// Load from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `REDIRECT_URI`,
    /// plus optional `SPOTIFY_ACCOUNTS_URL` / `SPOTIFY_API_URL` overrides.
    /// Returns `None` if a required value is missing or a URL is invalid
    /// (login will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let required = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let redirect_uri = required("REDIRECT_URI")?;
        let accounts_url = lookup("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_owned());
        let api_url = lookup("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        match Self::new(client_id, client_secret, redirect_uri, &accounts_url, &api_url) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "invalid Spotify base URL");
                None
            }
        }
    }

    /// Build the provider authorization URL for one login attempt.
    #[must_use]
    pub fn authorize_url(&self, oauth_state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SCOPE)
            .append_pair("state", oauth_state);
        url.into()
    }

    #[must_use]
    pub fn token_endpoint(&self) -> &Url {
        &self.token_endpoint
    }

    /// Web API URL for a path like `/me/top/artists`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
