//! Spotify service: code exchange and top-items fetches.

#[cfg(test)]
#[path = "spotify_test.rs"]
mod tests;

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use wrapped::ArtistSummary;

use crate::config::SpotifyConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const TIME_RANGE: &str = "long_term";
pub const TOP_TRACKS_LIMIT: u8 = 10;

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("spotify request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The token endpoint answered without an `access_token`; carries its body.
    #[error("token grant rejected: {0}")]
    TokenRejected(Value),
    #[error("spotify api returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl SpotifyError {
    /// Upstream HTTP status, when the provider answered at all.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::TokenRejected(_) => None,
        }
    }

    /// Whether the provider rejected the access token itself.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.upstream_status() == Some(401)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    items: Vec<T>,
}

pub(crate) fn parse_token_grant(body: Value) -> Result<TokenGrant, SpotifyError> {
    let Some(access_token) = body.get("access_token").and_then(Value::as_str) else {
        return Err(SpotifyError::TokenRejected(body));
    };
    let expires_in = body
        .get("expires_in")
        .and_then(Value::as_u64)
        .map(Duration::from_secs);
    Ok(TokenGrant { access_token: access_token.to_owned(), expires_in })
}

pub struct SpotifyClient {
    config: SpotifyConfig,
    http: reqwest::Client,
}

impl SpotifyClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SpotifyConfig) -> Result<Self, SpotifyError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Client credentials travel only in the Basic `Authorization` header.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, SpotifyError> {
        let config = &self.config;
        let body: Value = self
            .http
            .post(config.token_endpoint().clone())
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        parse_token_grant(body)
    }

    /// The user's long-term top artists, provider order.
    pub async fn top_artists(&self, access_token: &str, limit: u8) -> Result<Vec<ArtistSummary>, SpotifyError> {
        let page: Paging<ArtistSummary> = self
            .get_top(access_token, "/me/top/artists", limit)
            .await?
            .json()
            .await?;
        Ok(page.items)
    }

    /// The user's long-term top tracks as returned by the provider.
    pub async fn top_tracks(&self, access_token: &str) -> Result<Value, SpotifyError> {
        Ok(self
            .get_top(access_token, "/me/top/tracks", TOP_TRACKS_LIMIT)
            .await?
            .json()
            .await?)
    }

    async fn get_top(&self, access_token: &str, path: &str, limit: u8) -> Result<reqwest::Response, SpotifyError> {
        let limit = limit.to_string();
        let resp = self
            .http
            .get(self.config.api_url(path))
            .bearer_auth(access_token)
            .query(&[("time_range", TIME_RANGE), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpotifyError::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }
}
