//! Login page with the Spotify redirect button.

use leptos::prelude::*;
use wrapped::{ClientConfig, SessionGate};

use crate::util::navigation::BrowserNavigator;

/// Login page: clicking the button leaves the app for the provider's login.
#[component]
pub fn LoginPage() -> impl IntoView {
    let gate = SessionGate::from_config(&expect_context::<ClientConfig>());
    let on_login = move |_| gate.login(&BrowserNavigator);

    view! {
        <div class="page login-page">
            <h1>"Spotify Wrapped"</h1>
            <button class="login-button" on:click=on_login>
                "Log in with Spotify"
            </button>
        </div>
    }
}
