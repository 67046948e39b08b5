//! Console diagnostics for degraded loads.

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod diagnostics_test;

use wrapped::{DiagnosticSink, LoadIssue};

fn diagnostic_message(issue: &LoadIssue) -> String {
    format!("Error fetching artists: {issue}")
}

/// Writes each issue to the browser console at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleDiagnostics;

impl DiagnosticSink for ConsoleDiagnostics {
    fn record(&self, issue: &LoadIssue) {
        let message = diagnostic_message(issue);
        #[cfg(feature = "csr")]
        log::error!("{message}");
        #[cfg(not(feature = "csr"))]
        let _ = message;
    }
}
