//! DOM renderings of every feature's view trait.

use okna_core::calculator::CalculatorView;
use okna_core::carousel::CarouselView;
use okna_core::contact::{ContactView, FormMessage};
use okna_core::faq::FaqView;
use okna_core::header::HeaderView;
use okna_core::menu::MenuView;
use okna_core::models::Quantity;
use okna_core::theme::{Theme, ThemeView};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, MediaQueryList};

use crate::dom::{js_message, query};
use crate::selectors;

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, "Failed to toggle class: {}", js_message(&e));
    }
}

fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(e) = element.set_attribute(name, value) {
        tracing::warn!(name, "Failed to set attribute: {}", js_message(&e));
    }
}

pub struct RootTheme {
    pub root: Element,
    pub dark_query: Option<MediaQueryList>,
}

impl ThemeView for RootTheme {
    fn apply(&self, theme: Theme) {
        set_attribute(&self.root, "data-theme", theme.as_str());
    }

    fn system_prefers_dark(&self) -> bool {
        self.dark_query.as_ref().is_some_and(MediaQueryList::matches)
    }
}

pub struct HeaderElement(pub Element);

impl HeaderView for HeaderElement {
    fn set_scrolled(&self, scrolled: bool) {
        set_class(&self.0, selectors::HEADER_SCROLLED, scrolled);
    }
}

pub struct MenuElements {
    pub burger: Element,
    pub menu: Element,
}

impl MenuView for MenuElements {
    fn set_open(&self, open: bool) {
        set_class(&self.burger, selectors::ACTIVE, open);
        set_class(&self.menu, selectors::ACTIVE, open);
    }
}

pub struct FaqItem {
    pub item: Element,
    pub question: Element,
}

pub struct FaqElements(pub Vec<FaqItem>);

impl FaqView for FaqElements {
    fn set_expanded(&self, index: usize, expanded: bool) {
        let Some(entry) = self.0.get(index) else {
            return;
        };
        set_class(&entry.item, selectors::ACTIVE, expanded);
        set_attribute(&entry.question, "aria-expanded", if expanded { "true" } else { "false" });
    }
}

pub struct CalculatorModal {
    pub modal: Element,
    pub quantity: Option<HtmlInputElement>,
    pub result: Option<Element>,
}

impl CalculatorView for CalculatorModal {
    fn set_open(&self, open: bool) {
        set_class(&self.modal, selectors::ACTIVE, open);
    }

    fn set_quantity(&self, quantity: Quantity) {
        if let Some(input) = &self.quantity {
            input.set_value(&quantity.to_string());
        }
    }

    fn set_result(&self, label: &str) {
        if let Some(result) = &self.result {
            result.set_text_content(Some(label));
        }
    }
}

pub struct ContactFormElements {
    pub document: Document,
    pub form: HtmlFormElement,
    pub submit: Option<HtmlButtonElement>,
}

impl ContactView for ContactFormElements {
    fn set_submitting(&self, submitting: bool, label: &str) {
        if let Some(submit) = &self.submit {
            submit.set_disabled(submitting);
            submit.set_text_content(Some(label));
        }
    }

    fn submit_label(&self) -> String {
        self.submit
            .as_ref()
            .and_then(|submit| submit.text_content())
            .unwrap_or_default()
    }

    fn show_message(&self, message: &FormMessage) {
        self.clear_message();
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                tracing::warn!("Failed to create form message: {}", js_message(&e));
                return;
            }
        };
        element.set_class_name(&format!(
            "{} {}--{}",
            selectors::MESSAGE_CLASS,
            selectors::MESSAGE_CLASS,
            message.kind.as_str()
        ));
        element.set_text_content(Some(&message.text));
        let first = self.form.first_child();
        if let Err(e) = self.form.insert_before(&element, first.as_ref()) {
            tracing::warn!("Failed to insert form message: {}", js_message(&e));
        }
    }

    fn clear_message(&self) {
        if let Some(existing) = query(&self.form, selectors::CONTACT_MESSAGE) {
            existing.remove();
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub struct CarouselElement(pub HtmlElement);

impl CarouselView for CarouselElement {
    fn offset_left(&self) -> f64 {
        f64::from(self.0.offset_left())
    }

    fn scroll_left(&self) -> f64 {
        f64::from(self.0.scroll_left())
    }

    fn set_scroll_left(&self, value: f64) {
        self.0.set_scroll_left(value.round() as i32);
    }

    fn set_paused(&self, paused: bool) {
        set_class(&self.0, selectors::DRAGGING, paused);
    }
}

/// Narrow a looked-up element to the HTML type a view needs.
pub fn cast<T: JsCast>(element: Element) -> Option<T> {
    element.dyn_into::<T>().ok()
}
