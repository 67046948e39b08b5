//! Protected wrapped view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route after the provider handshake. Each mount owns a fresh
//! `LoadState` signal and spawns exactly one loader; re-renders only read the
//! signal.

#[cfg(test)]
#[path = "wrapped_test.rs"]
mod wrapped_test;

use leptos::prelude::*;
use wrapped::LoadState;

const LOADING_MESSAGE: &str = "Loading your wrapped...";
const REDIRECTING_MESSAGE: &str = "Redirecting to login...";

/// Placeholder text for non-loaded states; `None` once artists can render.
fn status_message(state: &LoadState) -> Option<&'static str> {
    match state {
        LoadState::Loading => Some(LOADING_MESSAGE),
        LoadState::Redirecting => Some(REDIRECTING_MESSAGE),
        LoadState::Loaded(_) => None,
    }
}

fn artist_labels(state: &LoadState) -> Vec<String> {
    state.artists().iter().map(|artist| artist.name.clone()).collect()
}

#[component]
pub fn WrappedPage() -> impl IntoView {
    let state = RwSignal::new(LoadState::Loading);

    #[cfg(feature = "csr")]
    {
        use wrapped::{ClientConfig, CredentialContext, SessionGate, WrappedLoader};

        use crate::net::api::BrowserTransport;
        use crate::util::diagnostics::ConsoleDiagnostics;
        use crate::util::navigation::BrowserNavigator;

        let config = expect_context::<ClientConfig>();
        leptos::task::spawn_local(async move {
            let loader = WrappedLoader::new(
                BrowserTransport::new(config.wrapped_url()),
                CredentialContext::Ambient,
                SessionGate::from_config(&config),
                BrowserNavigator,
                ConsoleDiagnostics,
            );
            let resolved = loader.load().await;
            // The view may have been left while the request was in flight.
            let _ = state.try_set(resolved);
        });
    }

    view! {
        <div class="page wrapped-page">
            {move || {
                state
                    .with(|current| match status_message(current) {
                        Some(message) => view! { <p class="status">{message}</p> }.into_any(),
                        None => {
                            let chips = artist_labels(current)
                                .into_iter()
                                .map(|name| view! { <button class="artist-chip">{name}</button> })
                                .collect_view();
                            view! {
                                <h1>"Your Spotify Wrapped"</h1>
                                <div class="artist-list">{chips}</div>
                            }
                                .into_any()
                        }
                    })
            }}
        </div>
    }
}
