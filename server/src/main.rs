mod config;
mod routes;
mod services;
mod state;

use std::time::Duration;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let port = config.port;

    // Spotify client is optional: login and data routes answer 503 without it.
    let spotify = match config::SpotifyConfig::from_env() {
        Some(spotify_config) => {
            tracing::info!(redirect_uri = %spotify_config.redirect_uri, "spotify oauth configured");
            match services::spotify::SpotifyClient::new(spotify_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!(error = %e, "spotify client init failed; login disabled");
                    None
                }
            }
        }
        None => {
            tracing::warn!("SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET / REDIRECT_URI not set; login disabled");
            None
        }
    };

    tracing::info!(origins = ?config.allowed_origins, "allowing credentialed requests from frontend");
    let state = state::AppState::new(config, spotify);

    let _purge = services::session::spawn_purge_task(state.sessions.clone(), SESSION_PURGE_INTERVAL);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "wrapped backend listening");
    axum::serve(listener, app).await.expect("server failed");
}
