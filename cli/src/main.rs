//! # wrapped-cli
//!
//! Terminal client for the Spotify Wrapped backend. It drives the same
//! session gate and wrapped loader as the browser client, with a reqwest
//! transport that sends the session cookie explicitly.

use std::cell::RefCell;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::header::{COOKIE, HeaderValue};
use wrapped::config::{DEFAULT_BACKEND_ORIGIN, SESSION_COOKIE_NAME};
use wrapped::{
    ArtistSummary, ClientConfig, CredentialContext, DiagnosticSink, LoadIssue, LoadState, Navigator, RawResponse,
    SessionGate, TransportError, WrappedLoader, WrappedTransport,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("session rejected; log in again at {login_url}")]
    SessionRejected { login_url: String },
    #[error("invalid session token: {0}")]
    InvalidSessionToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("http client init failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wrapped load finished without a result")]
    Unresolved,
}

#[derive(Parser, Debug)]
#[command(name = "wrapped-cli", about = "Spotify Wrapped terminal client")]
struct Cli {
    #[arg(long, env = "WRAPPED_BACKEND_ORIGIN", default_value = DEFAULT_BACKEND_ORIGIN)]
    backend_origin: String,

    #[arg(long, env = "WRAPPED_LOGIN_URL")]
    login_url: Option<String>,

    /// Value of the backend's `session_token` cookie (copy it from the browser).
    #[arg(long, env = "WRAPPED_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL that starts the Spotify login.
    LoginUrl,
    /// Fetch and print the session's top artists.
    Wrapped,
}

// =============================================================================
// PORTS
// =============================================================================

struct ReqwestTransport {
    http: reqwest::Client,
    url: String,
}

fn session_cookie_header(token: &str) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={token}"))
}

impl WrappedTransport for ReqwestTransport {
    async fn get_wrapped(&self, credentials: &CredentialContext) -> Result<RawResponse, TransportError> {
        let mut request = self.http.get(&self.url);
        if let Some(token) = credentials.session_token() {
            let cookie = session_cookie_header(token).map_err(|e| TransportError::new(e.to_string()))?;
            request = request.header(COOKIE, cookie);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// A terminal cannot navigate; it remembers where the user has to go.
#[derive(Default)]
struct TerminalNavigator {
    target: RefCell<Option<String>>,
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        *self.target.borrow_mut() = Some(url.to_owned());
    }
}

struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, issue: &LoadIssue) {
        tracing::warn!(%issue, "wrapped fetch degraded to an empty result");
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn render_artists(artists: &[ArtistSummary]) -> Vec<String> {
    artists
        .iter()
        .enumerate()
        .map(|(i, artist)| format!("{}. {}", i + 1, artist.name))
        .collect()
}

/// Terminal sessions have no `/` page to return to, so the login URL doubles
/// as the gate's entry point.
fn terminal_gate(config: &ClientConfig) -> SessionGate {
    SessionGate::new(config.login_url.clone(), config.login_url.clone())
}

fn run_login_url(config: &ClientConfig) {
    let nav = TerminalNavigator::default();
    terminal_gate(config).login(&nav);
    if let Some(url) = nav.target.into_inner() {
        println!("{url}");
    }
}

async fn run_wrapped(config: &ClientConfig, session_token: Option<String>) -> Result<(), CliError> {
    let credentials = match session_token {
        Some(token) => {
            session_cookie_header(&token)?;
            CredentialContext::Session(token)
        }
        None => CredentialContext::Anonymous,
    };
    let transport = ReqwestTransport { http: reqwest::Client::builder().build()?, url: config.wrapped_url() };
    let nav = TerminalNavigator::default();

    let state = WrappedLoader::new(transport, credentials, terminal_gate(config), &nav, TracingDiagnostics)
        .load()
        .await;

    let artists = settle(state, nav.target.into_inner(), config)?;
    if artists.is_empty() {
        eprintln!("no top artists");
    }
    for line in render_artists(&artists) {
        println!("{line}");
    }
    Ok(())
}

/// Turn the loader's final state into the artists to print or the reason to
/// exit non-zero.
fn settle(state: LoadState, reauth_url: Option<String>, config: &ClientConfig) -> Result<Vec<ArtistSummary>, CliError> {
    match state {
        LoadState::Loaded(artists) => Ok(artists),
        LoadState::Redirecting => Err(CliError::SessionRejected {
            login_url: reauth_url.unwrap_or_else(|| config.login_url.clone()),
        }),
        LoadState::Loading => Err(CliError::Unresolved),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::from_values(Some(&cli.backend_origin), cli.login_url.as_deref());

    let result = match cli.command {
        Command::LoginUrl => {
            run_login_url(&config);
            Ok(())
        }
        Command::Wrapped => run_wrapped(&config, cli.session_token).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
