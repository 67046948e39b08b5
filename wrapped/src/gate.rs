//! Session gate: the login action and the forced return after a rejected
//! session.
//!
//! Both transitions are full navigations. The session cookie is only ever
//! established by the identity provider's handshake, so control leaves this
//! process entirely and resumes through a fresh mount of the protected view.

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;

use crate::config::ClientConfig;

/// Full-page navigation of the hosting context.
///
/// Implementations must discard in-memory page state (a browser `location`
/// assignment, or handing the URL to the user in a terminal).
pub trait Navigator {
    fn navigate(&self, url: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, url: &str) {
        (**self).navigate(url);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionGate {
    login_url: String,
    entry_url: String,
}

impl SessionGate {
    #[must_use]
    pub fn new(login_url: impl Into<String>, entry_url: impl Into<String>) -> Self {
        Self { login_url: login_url.into(), entry_url: entry_url.into() }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.login_url.clone(), config.entry_url.clone())
    }

    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    #[must_use]
    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    /// Hand the visitor to the identity provider.
    pub fn login<N: Navigator>(&self, navigator: &N) {
        navigator.navigate(&self.login_url);
    }

    /// Send the visitor back to the unauthenticated entry point.
    pub fn reenter<N: Navigator>(&self, navigator: &N) {
        navigator.navigate(&self.entry_url);
    }
}
