use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use okna_core::error::OknaError;
use okna_core::theme::KeyValueStore;
use okna_core::ui::{Page, Scheduler, Spawn};
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Storage, Window};

use crate::dom::js_message;

pub struct BrowserPage {
    window: Window,
    document: Document,
    header: Option<HtmlElement>,
}

impl BrowserPage {
    pub fn new(window: Window, document: Document, header: Option<HtmlElement>) -> Self {
        Self {
            window,
            document,
            header,
        }
    }
}

impl Page for BrowserPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|header| f64::from(header.offset_height()))
            .unwrap_or(0.0)
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .map(|element| element.get_bounding_client_rect().top())
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let overflow = if locked { "hidden" } else { "" };
        if let Err(e) = body.style().set_property("overflow", overflow) {
            tracing::warn!("Failed to set body overflow: {}", js_message(&e));
        }
    }
}

/// `setTimeout` through gloo; timers are never cancelled.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

pub struct LocalSpawner;

impl Spawn for LocalSpawner {
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

/// `window.localStorage`. Reads fail soft, writes report the error.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::debug!("localStorage unavailable");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), OknaError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| OknaError::Storage("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| OknaError::Storage(js_message(&e)))
    }
}
