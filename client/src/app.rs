//! Root application component with routing and the config context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use wrapped::ClientConfig;

use crate::pages::{login::LoginPage, wrapped::WrappedPage};

/// Config baked in at build time (`WRAPPED_BACKEND_ORIGIN`, `WRAPPED_LOGIN_URL`).
pub fn build_config() -> ClientConfig {
    ClientConfig::from_values(option_env!("WRAPPED_BACKEND_ORIGIN"), option_env!("WRAPPED_LOGIN_URL"))
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(build_config());

    view! {
        <Title text="Spotify Wrapped"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("wrapped") view=WrappedPage/>
            </Routes>
        </Router>
    }
}
