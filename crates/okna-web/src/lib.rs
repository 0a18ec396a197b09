//! Browser entry point for the landing page.

mod app;
mod dom;
mod logging;
mod page;
mod selectors;
mod submit;
mod views;

use std::cell::RefCell;

use okna_core::models::{PriceTable, SelectionState};
use okna_core::ui::Subscription;
use wasm_bindgen::prelude::*;

thread_local! {
    static MOUNT: RefCell<Option<Subscription>> = const { RefCell::new(None) };
    static PRICES: RefCell<PriceTable> = RefCell::new(PriceTable::default());
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(mount_page);
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
            tracing::error!("Failed to wait for DOMContentLoaded: {}", dom::js_message(&e));
        }
    } else {
        mount_page();
    }
}

fn mount_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = app::load_config(&document);
    PRICES.with(|prices| *prices.borrow_mut() = config.prices.clone());

    let subscription = app::mount(&window, &document, &config);
    tracing::info!(listeners = subscription.len(), "Page ready");
    let previous = MOUNT.with(|mount| mount.borrow_mut().replace(subscription));
    drop(previous);
}

/// Remove every listener installed by [`start`].
#[wasm_bindgen]
pub fn teardown() {
    if let Some(subscription) = MOUNT.with(|mount| mount.borrow_mut().take()) {
        tracing::info!(listeners = subscription.len(), "Detaching page listeners");
        subscription.detach();
    }
}

/// Quote a JSON selection without the modal, e.g.
/// `{"service":"door","size":"large","quantity":2,"extras":["sill"]}`.
#[wasm_bindgen]
pub fn estimate(selection_json: &str) -> String {
    let prices = PRICES.with(|prices| prices.borrow().clone());
    estimate_with(&prices, selection_json)
}

fn estimate_with(prices: &PriceTable, selection_json: &str) -> String {
    match serde_json::from_str::<SelectionState>(selection_json) {
        Ok(selection) => serde_json::to_string(&prices.quote(&selection)).unwrap_or_else(|_| "{}".to_string()),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}
