//! Session-scoped data routes: `/wrapped`, `/top`, `/top-artists`.
//!
//! `/wrapped` is the endpoint the client loader consumes, so its contract is
//! strict: 401 whenever the session is missing or Spotify rejects its token,
//! otherwise `{"top_artists":[{"name":...}]}` with at most the configured
//! number of artists. The other two are browser
//! conveniences that bounce an anonymous visitor to `/login`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use wrapped::config::LOGIN_PATH;
use wrapped::WrappedResponse;

use super::auth::{AuthSession, resolve_session};
use crate::services::spotify::{SpotifyClient, SpotifyError};
use crate::state::AppState;

const TOP_ARTISTS_ERROR: &str = "Failed to fetch top artists";
const TOP_TRACKS_ERROR: &str = "Failed to fetch top tracks";
const TOP_ARTISTS_PRINT_LIMIT: u8 = 50;

fn spotify_client(state: &AppState) -> Result<&SpotifyClient, Response> {
    state
        .spotify
        .as_deref()
        .ok_or_else(|| (StatusCode::SERVICE_UNAVAILABLE, "Spotify OAuth not configured").into_response())
}

/// Map an upstream failure to a JSON error carrying the upstream status when
/// there is one, 502 otherwise.
fn upstream_error(err: &SpotifyError, message: &str) -> Response {
    let status = err
        .upstream_status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// `GET /wrapped`: top artists for the session's Spotify account.
pub async fn get_wrapped(State(state): State<AppState>, auth: AuthSession) -> Response {
    let spotify = match spotify_client(&state) {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    let limit = state.config.top_artists_limit;
    match spotify.top_artists(&auth.access_token, limit).await {
        Ok(mut top_artists) => {
            top_artists.truncate(usize::from(limit));
            Json(WrappedResponse { top_artists }).into_response()
        }
        Err(e) if e.is_unauthorized() => {
            // Spotify no longer honours the token; drop the session so the
            // client goes back through login.
            tracing::info!("spotify rejected access token, ending session");
            state.sessions.delete(&auth.token).await;
            StatusCode::UNAUTHORIZED.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "top artists fetch failed");
            upstream_error(&e, TOP_ARTISTS_ERROR)
        }
    }
}

/// `GET /top`: top tracks passed through as Spotify returns them.
pub async fn top_tracks(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(auth) = resolve_session(&state, &jar).await else {
        return Redirect::temporary(LOGIN_PATH).into_response();
    };
    let spotify = match spotify_client(&state) {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    match spotify.top_tracks(&auth.access_token).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "top tracks fetch failed");
            upstream_error(&e, TOP_TRACKS_ERROR)
        }
    }
}

/// `GET /top-artists`: log the ranked top artists server-side.
pub async fn top_artists(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(auth) = resolve_session(&state, &jar).await else {
        return Redirect::temporary(LOGIN_PATH).into_response();
    };
    let spotify = match spotify_client(&state) {
        Ok(client) => client,
        Err(resp) => return resp,
    };

    match spotify
        .top_artists(&auth.access_token, TOP_ARTISTS_PRINT_LIMIT)
        .await
    {
        Ok(artists) => {
            for (rank, artist) in artists.iter().enumerate() {
                tracing::info!(rank = rank + 1, name = %artist.name, "top artist");
            }
            Json(serde_json::json!({ "message": "Top 50 artist names printed in console." })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "top artists fetch failed");
            upstream_error(&e, TOP_ARTISTS_ERROR)
        }
    }
}

#[cfg(test)]
#[path = "wrapped_test.rs"]
mod tests;
