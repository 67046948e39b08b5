//! Session gate and wrapped-data loader shared by the browser and CLI clients.
//!
//! This crate is UI-framework agnostic. Everything that touches the outside
//! world (the HTTP transport, full-page navigation, the diagnostic channel)
//! is a small trait so each client plugs in its own implementation and tests
//! can substitute fakes.
//!
//! FLOW
//! ====
//! `/` shows the [`SessionGate`] login action, which hands control to the
//! identity provider. The provider eventually lands the browser on `/wrapped`
//! with a session cookie, where a fresh [`WrappedLoader`] issues its single
//! request and resolves to a terminal [`LoadState`].

pub mod config;
pub mod gate;
pub mod loader;
pub mod model;

pub use config::ClientConfig;
pub use gate::{Navigator, SessionGate};
pub use loader::{
    CredentialContext, DiagnosticSink, LoadIssue, Outcome, RawResponse, TransportError, WrappedLoader,
    WrappedTransport, classify,
};
pub use model::{ArtistSummary, LoadState, ShapeError, WrappedResponse};
