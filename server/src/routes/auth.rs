//! Auth routes: Spotify OAuth flow and session cookies.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::session;
use crate::services::spotify::SpotifyError;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = wrapped::config::SESSION_COOKIE_NAME;
pub(crate) const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
const OAUTH_STATE_MAX_AGE_MINUTES: i64 = 10;

fn build_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = build_cookie(name, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

fn not_configured() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "Spotify OAuth not configured").into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Live session resolved from the `session_token` cookie.
/// Use as a handler parameter to require authentication (401 otherwise).
pub struct AuthSession {
    pub token: String,
    pub access_token: String,
}

/// Resolve the session behind a cookie jar, if any.
pub(crate) async fn resolve_session(state: &AppState, jar: &CookieJar) -> Option<AuthSession> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return None;
    }
    let access_token = state.sessions.validate(token).await?;
    Some(AuthSession { token: token.to_owned(), access_token })
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let app_state = AppState::from_ref(state);
        resolve_session(&app_state, &jar)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /login`: redirect to the Spotify authorization page.
pub async fn login(State(state): State<AppState>) -> Response {
    let Some(spotify) = &state.spotify else {
        return not_configured();
    };

    let oauth_state = session::generate_token();
    let mut cookie = build_cookie(OAUTH_STATE_COOKIE_NAME, oauth_state.clone(), state.config.cookie_secure);
    cookie.set_max_age(Duration::minutes(OAUTH_STATE_MAX_AGE_MINUTES));

    let authorize_url = spotify.config().authorize_url(&oauth_state);
    tracing::debug!(redirect_uri = %spotify.config().redirect_uri, "redirecting to spotify login");

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&authorize_url)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    state: Option<String>,
}

/// `GET /callback`: exchange the code, open a session, set the cookie, and
/// send the browser to the client's wrapped view.
pub async fn callback(State(state): State<AppState>, jar: CookieJar, Query(params): Query<CallbackQuery>) -> Response {
    let Some(spotify) = &state.spotify else {
        return not_configured();
    };
    let secure = state.config.cookie_secure;

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(error, "spotify returned an authorization error");
        return (StatusCode::BAD_REQUEST, format!("Authorization failed: {error}")).into_response();
    }
    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Authorization failed: No code received").into_response();
    };

    // Verify OAuth CSRF state from cookie.
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || params.state.as_deref() != Some(expected_state) {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }

    let grant = match spotify.exchange_code(code).await {
        Ok(grant) => grant,
        Err(SpotifyError::TokenRejected(body)) => {
            tracing::warn!(%body, "spotify token grant rejected");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "oauth code exchange failed");
            return (StatusCode::BAD_GATEWAY, "OAuth code exchange failed").into_response();
        }
    };

    let ttl = grant.expires_in.unwrap_or(state.config.session_ttl);
    let token = state.sessions.create(grant.access_token, ttl).await;
    tracing::info!(ttl_secs = ttl.as_secs(), "session created");

    let jar = jar
        .add(build_cookie(COOKIE_NAME, token, secure))
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary(&state.config.post_login_url())).into_response()
}

/// `POST /logout`: delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> impl IntoResponse {
    state.sessions.delete(&auth.token).await;
    let jar = CookieJar::new().add(expired_cookie(COOKIE_NAME, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
