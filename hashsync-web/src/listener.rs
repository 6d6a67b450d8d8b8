//! RAII `hashchange` listener
//!
//! The closure has to outlive the listener registration. Rather than
//! `Closure::forget()`, which leaks it and keeps the listener attached
//! forever, the closure is owned by [`HashChangeListener`] and the listener is
//! removed in `Drop`.

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

const HASHCHANGE: &str = "hashchange";

/// A window `hashchange` listener that removes itself when dropped.
pub struct HashChangeListener {
    window: Window,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl HashChangeListener {
    pub fn new(window: Window, callback: impl FnMut(JsValue) + 'static) -> Self {
        let callback: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(callback));

        if let Err(e) =
            window.add_event_listener_with_callback(HASHCHANGE, callback.as_ref().unchecked_ref())
        {
            warn!("Failed to add {HASHCHANGE} listener: {e:?}");
        }

        Self { window, callback }
    }
}

impl Drop for HashChangeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(HASHCHANGE, self.callback.as_ref().unchecked_ref());
    }
}
