//! Browser transport for `GET /wrapped`.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: the type exists so pages compile, but only the WASM build
//! implements the transport.
//!
//! The session cookie is never touched here. Cross-origin fetches only carry
//! it when the request opts in with `credentials: include`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use wrapped::CredentialContext;
#[cfg(feature = "csr")]
use wrapped::{RawResponse, TransportError, WrappedTransport};

/// Fetch `credentials` mode for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchCredentials {
    Include,
    Omit,
}

/// Map a credential context onto the fetch mode.
///
/// An explicit session token cannot be attached by script (the cookie is
/// HttpOnly), so it is treated like the ambient cookie.
pub fn fetch_credentials(credentials: &CredentialContext) -> FetchCredentials {
    if credentials.forwards_credentials() {
        FetchCredentials::Include
    } else {
        FetchCredentials::Omit
    }
}

#[cfg(feature = "csr")]
impl From<FetchCredentials> for web_sys::RequestCredentials {
    fn from(mode: FetchCredentials) -> Self {
        match mode {
            FetchCredentials::Include => Self::Include,
            FetchCredentials::Omit => Self::Omit,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BrowserTransport {
    url: String,
}

impl BrowserTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "csr")]
impl WrappedTransport for BrowserTransport {
    async fn get_wrapped(&self, credentials: &CredentialContext) -> Result<RawResponse, TransportError> {
        let resp = gloo_net::http::Request::get(&self.url)
            .credentials(fetch_credentials(credentials).into())
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
