//! # client
//!
//! Leptos + WASM frontend for Spotify Wrapped.
//!
//! Two routes: `/` hosts the session gate's login action and `/wrapped` runs
//! the wrapped loader once per mount. All decision logic lives in the
//! `wrapped` crate; this crate supplies the browser transport, navigator,
//! console diagnostics, and views.

pub mod app;
pub mod net;
pub mod pages;
pub mod util;

/// WASM entry point: install the panic hook and console logger, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
