//! Offline support via service worker
//!
//! Caching policy lives in `web/sw.js`; this only registers it.

use wasm_bindgen_futures::JsFuture;

/// Service worker script, relative to the page
pub const SERVICE_WORKER_URL: &str = "./sw.js";

/// Register the service worker. Failure only costs offline play.
pub fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let container = window.navigator().service_worker();
    let promise = container.register(SERVICE_WORKER_URL);

    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("Service worker registered"),
            Err(e) => log::warn!("Service worker registration failed: {:?}", e),
        }
    });
}
