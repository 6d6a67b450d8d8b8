//! Access to the page the sync runs against
//!
//! The browser binding lives in `hashsync-web`. [`MemoryEnvironment`] backs the
//! tests here and is exported behind the `test-utils` feature.

/// The URL fragment and form elements of a page.
///
/// Methods take `&self`: implementations wrap handles to state owned by the
/// page, and everything runs on a single thread.
pub trait Environment {
    type Element;

    /// Current fragment, including the leading `#` when non-empty
    fn fragment(&self) -> String;

    /// Replace the fragment. `body` has no leading `#`.
    fn set_fragment(&self, body: &str);

    /// Elements carrying `class`, in document order
    fn query_elements(&self, class: &str) -> Vec<Self::Element>;

    fn find_element(&self, id: &str) -> Option<Self::Element>;

    fn element_id(&self, element: &Self::Element) -> String;

    /// `None` when the element has no readable value
    fn value(&self, element: &Self::Element) -> Option<String>;

    fn set_value(&self, element: &Self::Element, value: &str);

    /// Simulated user activation (click)
    fn activate(&self, element: &Self::Element);

    /// Fire a `change` notification on the element
    fn notify_change(&self, element: &Self::Element);
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{EnvEvent, MemoryEnvironment};

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::cell::RefCell;

    use super::Environment;
    use crate::config::SyncConfig;
    use crate::fragment::strip_marker;

    /// Something the sync did to a [`MemoryEnvironment`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EnvEvent {
        FragmentSet(String),
        Assigned { id: String, value: String },
        Activated(String),
        Changed(String),
    }

    #[derive(Debug, Clone)]
    struct MemoryElement {
        id: String,
        classes: Vec<String>,
        value: Option<String>,
    }

    /// In-memory page: a fragment plus a flat list of elements in document order.
    ///
    /// Activating an element flips its value between the configured toggle
    /// spellings, like a switch whose click handler updates its `value`.
    #[derive(Debug)]
    pub struct MemoryEnvironment {
        config: SyncConfig,
        fragment: RefCell<String>,
        elements: RefCell<Vec<MemoryElement>>,
        events: RefCell<Vec<EnvEvent>>,
    }

    impl Default for MemoryEnvironment {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemoryEnvironment {
        pub fn new() -> Self {
            Self::with_config(SyncConfig::default())
        }

        pub fn with_config(config: SyncConfig) -> Self {
            Self {
                config,
                fragment: RefCell::new(String::new()),
                elements: RefCell::new(Vec::new()),
                events: RefCell::new(Vec::new()),
            }
        }

        /// Start with a fragment already in the URL (not recorded as an event)
        pub fn fragment_preset(self, fragment: &str) -> Self {
            *self.fragment.borrow_mut() = normalize(fragment);
            self
        }

        /// Append a regular input carrying the configured input class
        pub fn input(self, id: &str, value: &str) -> Self {
            let class = self.config.input_class.clone();
            self.element(id, &[class.as_str()], value)
        }

        /// Append a toggle control carrying the configured toggle class
        pub fn toggle(self, id: &str, value: &str) -> Self {
            let class = self.config.toggle_class.clone();
            self.element(id, &[class.as_str()], value)
        }

        pub fn element(self, id: &str, classes: &[&str], value: &str) -> Self {
            self.push(id, classes, Some(value.to_string()))
        }

        /// Append an element whose `value` can't be read, like a plain `div`
        pub fn element_without_value(self, id: &str, classes: &[&str]) -> Self {
            self.push(id, classes, None)
        }

        fn push(self, id: &str, classes: &[&str], value: Option<String>) -> Self {
            self.elements.borrow_mut().push(MemoryElement {
                id: id.to_string(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
                value,
            });
            self
        }

        /// Value of the first element with this id
        pub fn value_of(&self, id: &str) -> Option<String> {
            self.elements
                .borrow()
                .iter()
                .find(|e| e.id == id)
                .and_then(|e| e.value.clone())
        }

        pub fn events(&self) -> Vec<EnvEvent> {
            self.events.borrow().clone()
        }

        pub fn activations(&self, id: &str) -> usize {
            self.count(|e| matches!(e, EnvEvent::Activated(i) if i == id))
        }

        pub fn change_notifications(&self, id: &str) -> usize {
            self.count(|e| matches!(e, EnvEvent::Changed(i) if i == id))
        }

        pub fn fragment_writes(&self) -> usize {
            self.count(|e| matches!(e, EnvEvent::FragmentSet(_)))
        }

        fn count(&self, pred: impl Fn(&EnvEvent) -> bool) -> usize {
            self.events.borrow().iter().filter(|e| pred(e)).count()
        }

        fn record(&self, event: EnvEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    fn normalize(fragment: &str) -> String {
        let body = strip_marker(fragment);
        if body.is_empty() {
            String::new()
        } else {
            format!("#{body}")
        }
    }

    impl Environment for MemoryEnvironment {
        type Element = usize;

        fn fragment(&self) -> String {
            self.fragment.borrow().clone()
        }

        fn set_fragment(&self, body: &str) {
            *self.fragment.borrow_mut() = normalize(body);
            self.record(EnvEvent::FragmentSet(body.to_string()));
        }

        fn query_elements(&self, class: &str) -> Vec<usize> {
            self.elements
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, e)| e.classes.iter().any(|c| c == class))
                .map(|(i, _)| i)
                .collect()
        }

        // Like getElementById, the empty id never matches
        fn find_element(&self, id: &str) -> Option<usize> {
            if id.is_empty() {
                return None;
            }
            self.elements.borrow().iter().position(|e| e.id == id)
        }

        fn element_id(&self, element: &usize) -> String {
            self.elements.borrow()[*element].id.clone()
        }

        fn value(&self, element: &usize) -> Option<String> {
            self.elements
                .borrow()
                .get(*element)
                .and_then(|e| e.value.clone())
        }

        fn set_value(&self, element: &usize, value: &str) {
            let id = {
                let mut elements = self.elements.borrow_mut();
                let e = &mut elements[*element];
                e.value = Some(value.to_string());
                e.id.clone()
            };
            self.record(EnvEvent::Assigned {
                id,
                value: value.to_string(),
            });
        }

        fn activate(&self, element: &usize) {
            let id = {
                let mut elements = self.elements.borrow_mut();
                let e = &mut elements[*element];
                let on = &self.config.toggle_on;
                let off = &self.config.toggle_off;
                if e.value.as_ref() == Some(on) {
                    e.value = Some(off.clone());
                } else if e.value.as_ref() == Some(off) {
                    e.value = Some(on.clone());
                }
                e.id.clone()
            };
            self.record(EnvEvent::Activated(id));
        }

        fn notify_change(&self, element: &usize) {
            let id = self.element_id(element);
            self.record(EnvEvent::Changed(id));
        }
    }
}
