use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;

// =============================================================================
// FAKES
// =============================================================================

struct FakeTransport {
    result: Result<RawResponse, TransportError>,
    calls: Cell<usize>,
    seen: RefCell<Vec<CredentialContext>>,
}

impl FakeTransport {
    fn responding(status: u16, body: &str) -> Self {
        Self::with_result(Ok(RawResponse::new(status, body)))
    }

    fn failing(message: &str) -> Self {
        Self::with_result(Err(TransportError::new(message)))
    }

    fn with_result(result: Result<RawResponse, TransportError>) -> Self {
        Self { result, calls: Cell::new(0), seen: RefCell::new(Vec::new()) }
    }
}

impl WrappedTransport for FakeTransport {
    async fn get_wrapped(&self, credentials: &CredentialContext) -> Result<RawResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(credentials.clone());
        self.result.clone()
    }
}

/// Backend stand-in that accepts only one session token.
struct SessionBackend {
    valid_token: &'static str,
}

impl WrappedTransport for SessionBackend {
    async fn get_wrapped(&self, credentials: &CredentialContext) -> Result<RawResponse, TransportError> {
        if credentials.session_token() == Some(self.valid_token) {
            Ok(RawResponse::new(200, r#"{"top_artists":[{"name":"Taylor Swift"}]}"#))
        } else {
            Ok(RawResponse::new(401, ""))
        }
    }
}

#[derive(Default)]
struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.borrow_mut().push(url.to_owned());
    }
}

#[derive(Default)]
struct RecordingDiagnostics {
    issues: RefCell<Vec<String>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn record(&self, issue: &LoadIssue) {
        self.issues.borrow_mut().push(issue.to_string());
    }
}

fn gate() -> SessionGate {
    SessionGate::new("http://localhost:5001/login", "/")
}

fn load_with<T: WrappedTransport>(
    transport: T,
    credentials: CredentialContext,
    nav: &RecordingNavigator,
    diag: &RecordingDiagnostics,
) -> LoadState {
    block_on(WrappedLoader::new(transport, credentials, gate(), nav, diag).load())
}

fn names(state: &LoadState) -> Vec<&str> {
    state.artists().iter().map(|a| a.name.as_str()).collect()
}

// =============================================================================
// classify
// =============================================================================

#[test]
fn classify_unauthorized_ignores_body() {
    let outcome = classify(Ok(RawResponse::new(401, r#"{"top_artists":[{"name":"A"}]}"#)));
    assert!(matches!(outcome, Outcome::Unauthorized));
}

#[test]
fn classify_transport_error() {
    let outcome = classify(Err(TransportError::new("connection refused")));
    assert!(matches!(outcome, Outcome::Degraded(LoadIssue::Transport(_))));
}

#[test]
fn classify_error_status_judged_by_body() {
    let outcome = classify(Ok(RawResponse::new(500, r#"{"error":"Failed to fetch top artists"}"#)));
    assert!(matches!(
        outcome,
        Outcome::Degraded(LoadIssue::Shape { status: 500, source: ShapeError::MissingField })
    ));
}

#[test]
fn classify_success() {
    let outcome = classify(Ok(RawResponse::new(200, r#"{"top_artists":[{"name":"A"},{"name":"B"}]}"#)));
    let Outcome::Artists(artists) = outcome else {
        panic!("expected artists, got {outcome:?}");
    };
    assert_eq!(artists, vec![ArtistSummary::new("A"), ArtistSummary::new("B")]);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn happy_path_loads_artists_in_order() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();
    let transport = FakeTransport::responding(200, r#"{"top_artists":[{"name":"Taylor Swift"},{"name":"Drake"}]}"#);

    let state = load_with(&transport, CredentialContext::Ambient, &nav, &diag);

    assert_eq!(
        state,
        LoadState::Loaded(vec![ArtistSummary::new("Taylor Swift"), ArtistSummary::new("Drake")])
    );
    assert_eq!(transport.calls.get(), 1);
    assert!(nav.visits.borrow().is_empty());
    assert!(diag.issues.borrow().is_empty());
}

#[test]
fn denied_session_navigates_once_to_entry() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();
    let transport = FakeTransport::responding(401, "");

    let state = load_with(&transport, CredentialContext::Ambient, &nav, &diag);

    assert_eq!(state, LoadState::Redirecting);
    assert!(state.artists().is_empty());
    assert_eq!(*nav.visits.borrow(), ["/"]);
    assert!(diag.issues.borrow().is_empty());
}

#[test]
fn empty_dataset_is_not_an_error() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();

    let transport = FakeTransport::responding(200, r#"{"top_artists":[]}"#);
    let state = load_with(transport, CredentialContext::Ambient, &nav, &diag);

    assert_eq!(state, LoadState::Loaded(Vec::new()));
    assert!(diag.issues.borrow().is_empty());
    assert!(nav.visits.borrow().is_empty());
}

#[test]
fn network_outage_degrades_with_one_diagnostic() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();

    let state = load_with(FakeTransport::failing("dns lookup failed"), CredentialContext::Ambient, &nav, &diag);

    assert_eq!(state, LoadState::Loaded(Vec::new()));
    assert_eq!(*diag.issues.borrow(), ["transport failure: dns lookup failed"]);
    assert!(nav.visits.borrow().is_empty());
}

#[test]
fn malformed_bodies_degrade_to_empty() {
    let bodies = [
        "not json",
        "",
        "{}",
        r#"{"top_artists":null}"#,
        r#"{"top_artists":"Drake"}"#,
        r#"{"top_artists":[{"title":"x"}]}"#,
        "[]",
    ];
    for body in bodies {
        let nav = RecordingNavigator::default();
        let diag = RecordingDiagnostics::default();

        let state = load_with(FakeTransport::responding(200, body), CredentialContext::Ambient, &nav, &diag);

        assert_eq!(state, LoadState::Loaded(Vec::new()), "body {body:?}");
        assert!(state.is_terminal());
        assert_eq!(diag.issues.borrow().len(), 1, "body {body:?}");
        assert!(nav.visits.borrow().is_empty());
    }
}

#[test]
fn order_preserved_and_duplicates_kept() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();
    let body = r#"{"top_artists":[{"name":"B"},{"name":"A"},{"name":"B"}]}"#;

    let state = load_with(FakeTransport::responding(200, body), CredentialContext::Ambient, &nav, &diag);

    assert_eq!(names(&state), ["B", "A", "B"]);
}

// =============================================================================
// Mount semantics
// =============================================================================

#[test]
fn each_mount_issues_exactly_one_request() {
    let transport = FakeTransport::responding(200, r#"{"top_artists":[{"name":"A"}]}"#);
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();

    let first = load_with(&transport, CredentialContext::Ambient, &nav, &diag);
    assert_eq!(transport.calls.get(), 1);

    let second = load_with(&transport, CredentialContext::Ambient, &nav, &diag);
    assert_eq!(transport.calls.get(), 2);
    assert_eq!(first, second);
}

#[test]
fn fresh_mount_does_not_reuse_prior_state() {
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();

    let transport = FakeTransport::responding(200, r#"{"top_artists":[{"name":"A"}]}"#);
    let first = load_with(transport, CredentialContext::Ambient, &nav, &diag);
    let second = load_with(FakeTransport::responding(401, ""), CredentialContext::Ambient, &nav, &diag);

    assert_eq!(names(&first), ["A"]);
    assert_eq!(second, LoadState::Redirecting);
}

// =============================================================================
// Credential contexts
// =============================================================================

#[test]
fn credentials_passed_through_to_transport() {
    let transport = FakeTransport::responding(200, r#"{"top_artists":[]}"#);
    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();

    load_with(&transport, CredentialContext::Session("tok".to_owned()), &nav, &diag);

    assert_eq!(*transport.seen.borrow(), [CredentialContext::Session("tok".to_owned())]);
}

#[test]
fn valid_invalid_and_absent_sessions() {
    let backend = SessionBackend { valid_token: "good" };

    let nav = RecordingNavigator::default();
    let diag = RecordingDiagnostics::default();
    let valid = load_with(&backend, CredentialContext::Session("good".to_owned()), &nav, &diag);
    assert_eq!(names(&valid), ["Taylor Swift"]);
    assert!(nav.visits.borrow().is_empty());

    let nav = RecordingNavigator::default();
    let invalid = load_with(&backend, CredentialContext::Session("stale".to_owned()), &nav, &diag);
    assert_eq!(invalid, LoadState::Redirecting);
    assert_eq!(*nav.visits.borrow(), ["/"]);

    let nav = RecordingNavigator::default();
    let absent = load_with(&backend, CredentialContext::Anonymous, &nav, &diag);
    assert_eq!(absent, LoadState::Redirecting);
    assert_eq!(*nav.visits.borrow(), ["/"]);
}

#[test]
fn only_anonymous_skips_credential_forwarding() {
    assert!(CredentialContext::Ambient.forwards_credentials());
    assert!(CredentialContext::Session("t".to_owned()).forwards_credentials());
    assert!(!CredentialContext::Anonymous.forwards_credentials());
}

#[test]
fn session_token_only_for_explicit_session() {
    assert_eq!(CredentialContext::Session("t".to_owned()).session_token(), Some("t"));
    assert_eq!(CredentialContext::Ambient.session_token(), None);
    assert_eq!(CredentialContext::Anonymous.session_token(), None);
}
