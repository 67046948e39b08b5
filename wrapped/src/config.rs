//! Client-side configuration: where the backend lives and where the gate sends
//! visitors.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:5001";
pub const ENTRY_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const WRAPPED_PATH: &str = "/wrapped";
/// Cookie the backend issues; only native clients ever name it.
pub const SESSION_COOKIE_NAME: &str = "session_token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash. Empty means same-origin.
    pub backend_origin: String,
    /// Identity-provider login entry (the backend's `/login` by default).
    pub login_url: String,
    /// Unauthenticated entry point the gate returns to.
    pub entry_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl ClientConfig {
    /// Build a config from optional externally supplied values.
    ///
    /// - `backend_origin`: `None` uses [`DEFAULT_BACKEND_ORIGIN`]; a blank
    ///   value keeps requests same-origin.
    /// - `login_url`: `None` or blank derives `{backend_origin}/login`; an
    ///   explicit URL is only trimmed of whitespace.
    #[must_use]
    pub fn from_values(backend_origin: Option<&str>, login_url: Option<&str>) -> Self {
        let backend_origin = normalize(backend_origin.unwrap_or(DEFAULT_BACKEND_ORIGIN));
        let login_url = login_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{backend_origin}{LOGIN_PATH}"));
        Self { backend_origin, login_url, entry_url: ENTRY_PATH.to_owned() }
    }

    /// Absolute (or same-origin relative) URL of the session-scoped data endpoint.
    #[must_use]
    pub fn wrapped_url(&self) -> String {
        format!("{}{WRAPPED_PATH}", self.backend_origin)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
