//! Full-page navigation through `window.location`.

use wrapped::Navigator;

/// Assigns `window.location.href`, discarding all in-memory page state.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                log::error!("no window to navigate to {url}");
                return;
            };
            if let Err(err) = window.location().set_href(url) {
                log::error!("navigation to {url} failed: {err:?}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
        }
    }
}
