//! Single-shot loader for the session-scoped `/wrapped` endpoint.
//!
//! DESIGN
//! ======
//! One [`WrappedLoader`] exists per mount of the protected view and
//! [`WrappedLoader::load`] consumes it, so a second request from the same
//! mount cannot be expressed. The session credential is never inspected:
//! it is handed to the transport as an explicit [`CredentialContext`] and the
//! backend's verdict is read off the response status.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. A 401 re-enters the session gate, and every other
//! failure degrades to an empty artist list plus exactly one
//! [`DiagnosticSink::record`] call.

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;

use std::future::Future;

use crate::gate::{Navigator, SessionGate};
use crate::model::{ArtistSummary, LoadState, ShapeError, WrappedResponse};

pub const STATUS_UNAUTHORIZED: u16 = 401;

// =============================================================================
// CREDENTIALS
// =============================================================================

/// How the session credential travels with the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialContext {
    /// Whatever the transport's own cookie store holds. Browsers only forward
    /// it cross-origin with `credentials: include`.
    Ambient,
    /// An explicit `session_token` cookie value held by a native client.
    Session(String),
    /// No credential at all.
    Anonymous,
}

impl CredentialContext {
    /// Whether the transport must opt in to credential forwarding.
    #[must_use]
    pub fn forwards_credentials(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        match self {
            Self::Session(token) => Some(token),
            Self::Ambient | Self::Anonymous => None,
        }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Status and body of a response that did arrive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// The request failed before any response arrived (DNS, refused, aborted).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Issues `GET /wrapped` with the given credentials.
pub trait WrappedTransport {
    fn get_wrapped(&self, credentials: &CredentialContext) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

impl<T: WrappedTransport + ?Sized> WrappedTransport for &T {
    fn get_wrapped(
        &self,
        credentials: &CredentialContext,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> {
        (**self).get_wrapped(credentials)
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// A degraded load, reported to the diagnostic channel only.
#[derive(Debug, thiserror::Error)]
pub enum LoadIssue {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("unexpected response shape (status {status}): {source}")]
    Shape {
        status: u16,
        #[source]
        source: ShapeError,
    },
}

pub trait DiagnosticSink {
    fn record(&self, issue: &LoadIssue);
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &D {
    fn record(&self, issue: &LoadIssue) {
        (**self).record(issue);
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[derive(Debug)]
pub enum Outcome {
    Unauthorized,
    Artists(Vec<ArtistSummary>),
    Degraded(LoadIssue),
}

/// Classify the single request's result.
///
/// A 401 is decided before the body is looked at. Any other status is judged
/// by body shape alone, so an error page and an empty dataset both end up as
/// an empty list, told apart only by the reported [`LoadIssue`].
#[must_use]
pub fn classify(result: Result<RawResponse, TransportError>) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return Outcome::Degraded(LoadIssue::Transport(err)),
    };

    if response.status == STATUS_UNAUTHORIZED {
        return Outcome::Unauthorized;
    }

    match WrappedResponse::parse(&response.body) {
        Ok(parsed) => Outcome::Artists(parsed.top_artists),
        Err(source) => Outcome::Degraded(LoadIssue::Shape { status: response.status, source }),
    }
}

// =============================================================================
// LOADER
// =============================================================================

pub struct WrappedLoader<T, N, D> {
    transport: T,
    credentials: CredentialContext,
    gate: SessionGate,
    navigator: N,
    diagnostics: D,
}

impl<T, N, D> WrappedLoader<T, N, D>
where
    T: WrappedTransport,
    N: Navigator,
    D: DiagnosticSink,
{
    #[must_use]
    pub fn new(transport: T, credentials: CredentialContext, gate: SessionGate, navigator: N, diagnostics: D) -> Self {
        Self { transport, credentials, gate, navigator, diagnostics }
    }

    /// Issue the request and resolve to a terminal [`LoadState`].
    ///
    /// On [`LoadState::Redirecting`] the gate has already navigated away.
    pub async fn load(self) -> LoadState {
        let result = self.transport.get_wrapped(&self.credentials).await;
        match classify(result) {
            Outcome::Unauthorized => {
                self.gate.reenter(&self.navigator);
                LoadState::Redirecting
            }
            Outcome::Artists(artists) => LoadState::Loaded(artists),
            Outcome::Degraded(issue) => {
                self.diagnostics.record(&issue);
                LoadState::Loaded(Vec::new())
            }
        }
    }
}
