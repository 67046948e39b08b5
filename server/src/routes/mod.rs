//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client is served from its own origin (`FRONTEND_URL`) and
//! calls this backend cross-origin with credentials included, so CORS must
//! name that origin exactly and allow credentials.

pub mod auth;
pub mod wrapped;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// CORS for credentialed clients at the listed origins.
///
/// Origins that are not valid header values are skipped; with none left,
/// cross-origin access is disabled.
pub(crate) fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, origin, "invalid FRONTEND_URL entry; skipped");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        tracing::warn!("no valid FRONTEND_URL origins; cross-origin requests disabled");
        return layer;
    }
    layer.allow_origin(AllowOrigin::list(allowed))
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/callback/", get(auth::callback))
        .route("/logout", post(auth::logout))
        .route("/wrapped", get(wrapped::get_wrapped))
        .route("/top", get(wrapped::top_tracks))
        .route("/top-artists", get(wrapped::top_artists))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
