//! `Environment` over the live page

use hashsync_core::{Environment, SyncError};
use js_sys::Reflect;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, Window};

/// The current window's location hash and document.
///
/// Values are read and written through the `value` property, so inputs,
/// selects and textareas all work without knowing the concrete element type.
pub struct BrowserEnvironment {
    window: Window,
    document: Document,
}

impl BrowserEnvironment {
    pub fn new() -> Result<Self, SyncError> {
        let window =
            web_sys::window().ok_or_else(|| SyncError::Browser("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SyncError::Browser("window has no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Environment for BrowserEnvironment {
    type Element = Element;

    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn set_fragment(&self, body: &str) {
        if let Err(e) = self.window.location().set_hash(body) {
            warn!("Failed to set location hash: {e:?}");
        }
    }

    fn query_elements(&self, class: &str) -> Vec<Element> {
        // Live collection: snapshot it before anything mutates the DOM
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn find_element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn element_id(&self, element: &Element) -> String {
        element.id()
    }

    fn value(&self, element: &Element) -> Option<String> {
        Reflect::get(element, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.as_string())
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Err(e) = Reflect::set(
            element,
            &JsValue::from_str("value"),
            &JsValue::from_str(value),
        ) {
            warn!("Failed to set value on #{}: {e:?}", element.id());
        }
    }

    fn activate(&self, element: &Element) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html_elem) => html_elem.click(),
            None => warn!("#{} is not an HTML element, cannot click it", element.id()),
        }
    }

    fn notify_change(&self, element: &Element) {
        let event = match Event::new("change") {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to create change event: {e:?}");
                return;
            }
        };
        let _ = element.dispatch_event(&event);
    }
}
