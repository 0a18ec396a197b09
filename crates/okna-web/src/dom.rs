//! web-sys adapters: elements as [`Control`]s and DOM lookups.

use std::collections::BTreeMap;

use okna_core::ui::{Control, EventFlow, EventKind, Handler, Key, Subscription, UiEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent, MediaQueryListEvent, MouseEvent, NodeList, TouchEvent,
};

/// Any event target: an element, the document, the window or a media query.
#[derive(Clone)]
pub struct DomControl {
    target: EventTarget,
}

impl DomControl {
    pub fn new(target: impl Into<EventTarget>) -> Self {
        Self { target: target.into() }
    }
}

impl Control for DomControl {
    fn listen(&self, kind: EventKind, mut handler: Handler) -> Subscription {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(ui_event) = to_ui_event(kind, &event) else {
                return;
            };
            if handler(&ui_event) == EventFlow::PreventDefault {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(kind.is_passive());
        if let Err(e) = self.target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.dom_name(),
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            tracing::warn!(event = kind.dom_name(), "Failed to add listener: {}", js_message(&e));
            return Subscription::empty();
        }

        let target = self.target.clone();
        Subscription::new(move || {
            let _ = target.remove_event_listener_with_callback(kind.dom_name(), callback.as_ref().unchecked_ref());
            drop(callback);
        })
    }
}

fn to_ui_event(kind: EventKind, event: &Event) -> Option<UiEvent> {
    match kind {
        EventKind::Click => Some(UiEvent::Click),
        EventKind::Scroll => Some(UiEvent::Scroll),
        EventKind::KeyDown => {
            let event = event.dyn_ref::<KeyboardEvent>()?;
            Some(UiEvent::Key(Key::from_dom(&event.key())))
        }
        EventKind::Change => {
            let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
            Some(UiEvent::Change {
                name: input.name(),
                value: input.value(),
                checked: input.checked(),
            })
        }
        EventKind::Input => {
            let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
            Some(UiEvent::Input { value: input.value() })
        }
        EventKind::Submit => {
            let form = event.current_target()?.dyn_into::<HtmlFormElement>().ok()?;
            Some(UiEvent::Submit {
                fields: form_fields(&form),
            })
        }
        EventKind::MouseDown | EventKind::MouseMove => {
            let event = event.dyn_ref::<MouseEvent>()?;
            Some(UiEvent::Pointer {
                page_x: f64::from(event.page_x()),
            })
        }
        EventKind::TouchStart | EventKind::TouchMove => {
            let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
            Some(UiEvent::Pointer {
                page_x: f64::from(touch.page_x()),
            })
        }
        EventKind::MouseUp | EventKind::MouseLeave | EventKind::TouchEnd => Some(UiEvent::Release),
        EventKind::ColorSchemeChange => {
            let event = event.dyn_ref::<MediaQueryListEvent>()?;
            Some(UiEvent::ColorScheme { dark: event.matches() })
        }
    }
}

/// Name and value of every named text-like field in `form`.
fn form_fields(form: &HtmlFormElement) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for element in query_all(form, crate::selectors::NAMED_FIELD) {
        let field = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some((input.name(), input.value()))
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            Some((area.name(), area.value()))
        } else {
            element
                .dyn_ref::<HtmlSelectElement>()
                .map(|select| (select.name(), select.value()))
        };
        if let Some((name, value)) = field {
            fields.insert(name, value);
        }
    }
    fields
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        tracing::debug!(id, "Element not found");
    }
    element
}

pub fn query(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

pub fn query_all(parent: &Element, selector: &str) -> Vec<Element> {
    parent
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn document_query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn elements(nodes: NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| "unknown js error".into())
}
