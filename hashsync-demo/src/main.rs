//! hashsync demo - parameter sidebar whose state round-trips through the URL hash
//!
//! Inputs carry `form-control`, switches carry `custom-control-input` and an
//! id starting with `_`. "Save to URL" writes them into the hash; reloading
//! the page (or "Load from URL") puts them back.

use dioxus::prelude::*;
use tracing::{info, warn};

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// (id, label, initial value)
const NUMBER_INPUTS: &[(&str, &str, &str)] = &[
    ("n_days", "Days to project", "60"),
    ("hosp_los", "Hospital length of stay", "7"),
    ("icu_los", "ICU length of stay", "9"),
    ("vent_los", "Ventilated length of stay", "10"),
    ("market_share", "Hospital market share (%)", "15"),
];

/// (id, label)
const SWITCHES: &[(&str, &str)] = &[
    ("_as_date", "Present result as dates"),
    ("_show_tables", "Show data tables"),
    ("_show_additional_projections", "Show additional projections"),
];

#[component]
fn App() -> Element {
    let mut status = use_signal(String::new);

    // Restore once the sidebar is in the DOM
    use_effect(move || match hashsync_web::restore_from_hash() {
        Ok(report) => {
            if !report.assigned.is_empty() || !report.activated.is_empty() {
                status.set(format!(
                    "Loaded {} values from URL",
                    report.assigned.len() + report.activated.len()
                ));
            }
        }
        Err(e) => {
            warn!("Could not restore parameters: {e}");
            status.set(e.to_string());
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "sidebar",
            for (id, label, initial) in NUMBER_INPUTS.iter().copied() {
                label { key: "{id}",
                    "{label}"
                    input {
                        id,
                        class: "form-control",
                        r#type: "number",
                        value: initial,
                        onchange: move |e| info!("{id} changed to {}", e.value()),
                    }
                }
            }
            for (id, label) in SWITCHES.iter().copied() {
                Switch { key: "{id}", id, label }
            }
            button {
                onclick: move |_| match hashsync_web::browser_sync() {
                    Ok(sync) => {
                        let hash = sync.save_to_hash();
                        status.set(format!("Saved: {hash}"));
                    }
                    Err(e) => status.set(e.to_string()),
                },
                "Save to URL"
            }
            button {
                onclick: move |_| match hashsync_web::restore_from_hash() {
                    Ok(report) => status.set(format!("Restored {:?}", report)),
                    Err(e) => status.set(e.to_string()),
                },
                "Load from URL"
            }
            p { class: "status", "{status}" }
        }
    }
}

/// On/off switch whose `value` attribute mirrors its state
#[component]
fn Switch(id: &'static str, label: &'static str) -> Element {
    let mut on = use_signal(|| false);
    let value = if on() { "on" } else { "off" };

    rsx! {
        label {
            "{label}"
            button {
                id,
                class: "custom-control-input",
                value,
                onclick: move |_| on.set(!on()),
                onchange: move |_| info!("{id} changed"),
                "{value}"
            }
        }
    }
}

fn main() {
    dioxus::launch(App);
}
