//! Browser binding for hashsync
//!
//! Exposes the sync operations to JavaScript and to Rust web apps:
//! `save_to_hash()` writes the form into the URL, `hash_to_inputs()` reads it
//! back, and `on_load()` does the latter now and on every `hashchange`.

pub mod browser;
pub mod listener;

pub use browser::BrowserEnvironment;
pub use listener::HashChangeListener;

use hashsync_core::{HashParamSync, RestoreReport, SyncError};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Sync bound to the current page with the default config
pub fn browser_sync() -> Result<HashParamSync<BrowserEnvironment>, SyncError> {
    Ok(HashParamSync::new(BrowserEnvironment::new()?))
}

pub fn restore_from_hash() -> Result<RestoreReport, SyncError> {
    browser_sync()?.hash_to_inputs()
}

fn to_js(e: SyncError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Collect the form and replace the URL hash with it. Returns the new hash.
#[wasm_bindgen]
pub fn save_to_hash() -> Result<String, JsValue> {
    Ok(browser_sync().map_err(to_js)?.save_to_hash())
}

/// Restore the form from the URL hash.
#[wasm_bindgen]
pub fn hash_to_inputs() -> Result<(), JsValue> {
    restore_from_hash().map(|_| ()).map_err(to_js)
}

/// Keeps the form following the URL hash until dropped (or `free()`d from JS).
#[wasm_bindgen]
pub struct HashWatcher {
    _listener: HashChangeListener,
}

/// Restore from the hash once, then again on every `hashchange`.
///
/// A failed first restore (e.g. a shared URL naming an input that no longer
/// exists) is logged; the watcher stays installed for later hash changes.
#[wasm_bindgen]
pub fn on_load() -> Result<HashWatcher, JsValue> {
    let sync = browser_sync().map_err(to_js)?;
    let window = sync.environment().window().clone();

    let restore = move || {
        if let Err(e) = sync.hash_to_inputs() {
            warn!("Failed to restore inputs from URL hash: {e}");
        }
    };
    restore();

    let listener = HashChangeListener::new(window, move |_| restore());

    Ok(HashWatcher {
        _listener: listener,
    })
}
