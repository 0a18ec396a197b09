//! Finds the page's elements and attaches every feature that has them.

use std::cell::RefCell;
use std::rc::Rc;

use okna_core::anchors::{self, AnchorLink};
use okna_core::calculator::{self, CalculatorBindings, PriceCalculator};
use okna_core::carousel::{self, Carousel};
use okna_core::config::SiteConfig;
use okna_core::contact::{self, ContactForm};
use okna_core::faq::{self, Accordion};
use okna_core::header::{self, HeaderState};
use okna_core::menu::{self, MenuBindings, MobileMenu};
use okna_core::models::Direction;
use okna_core::theme::{self, ThemeBindings, ThemeController};
use okna_core::ui::{Scheduler, SharedUiState, Subscription, UiState};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::dom::{by_id, document_query_all, query, query_all, DomControl};
use crate::page::{BrowserPage, BrowserScheduler, LocalSpawner, LocalStore};
use crate::selectors;
use crate::submit::SimulatedSubmitter;
use crate::views::{
    cast, CalculatorModal, CarouselElement, ContactFormElements, FaqElements, FaqItem, HeaderElement, MenuElements,
    RootTheme,
};

/// Built-in config, replaced by an inline `#site-config` TOML block when
/// the page carries a valid one.
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(source) = document
        .get_element_by_id(selectors::SITE_CONFIG)
        .and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_toml(&source) {
        Ok(config) => {
            tracing::debug!("Using inline site config");
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring inline site config: {e}");
            SiteConfig::default()
        }
    }
}

struct Context<'a> {
    window: &'a Window,
    document: &'a Document,
    config: &'a SiteConfig,
    ui: SharedUiState,
    scheduler: Rc<dyn Scheduler>,
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Subscription {
    let header = by_id(document, selectors::HEADER);
    let page = BrowserPage::new(
        window.clone(),
        document.clone(),
        header.clone().and_then(cast::<HtmlElement>),
    );
    let cx = Context {
        window,
        document,
        config,
        ui: UiState::shared(Rc::new(page)),
        scheduler: Rc::new(BrowserScheduler),
    };

    let mut subscription = Subscription::empty();
    subscription.push(mount_theme(&cx));
    let features = [
        header.map(|header| mount_header(&cx, header)),
        mount_menu(&cx),
        Some(mount_anchors(&cx)),
        Some(mount_faq(&cx)),
        mount_contact(&cx),
        mount_calculator(&cx),
        mount_carousel(&cx),
    ];
    for feature in features.into_iter().flatten() {
        subscription.push(feature);
    }
    subscription
}

fn mount_theme(cx: &Context<'_>) -> Subscription {
    let Some(root) = cx.document.document_element() else {
        return Subscription::empty();
    };
    let dark_query = cx.window.match_media(selectors::DARK_SCHEME_QUERY).ok().flatten();
    let controller = ThemeController::new(
        Rc::new(LocalStore::new(cx.window)),
        Rc::new(RootTheme {
            root,
            dark_query: dark_query.clone(),
        }),
        cx.ui.clone(),
        cx.config.theme.storage_key.clone(),
    );
    theme::attach(
        Rc::new(controller),
        ThemeBindings {
            toggle: by_id(cx.document, selectors::THEME_TOGGLE).map(DomControl::new),
            color_scheme: dark_query.map(DomControl::new),
        },
    )
}

fn mount_header(cx: &Context<'_>, header: Element) -> Subscription {
    let state = Rc::new(RefCell::new(HeaderState::new(cx.config.header.scrolled_threshold)));
    header::attach(
        &state,
        &DomControl::new(cx.window.clone()),
        Rc::new(HeaderElement(header)),
        cx.ui.clone(),
    )
}

fn mount_menu(cx: &Context<'_>) -> Option<Subscription> {
    let burger = by_id(cx.document, selectors::BURGER)?;
    let panel = by_id(cx.document, selectors::MOBILE_MENU)?;
    let links = query_all(&panel, selectors::MOBILE_MENU_LINK)
        .into_iter()
        .map(DomControl::new)
        .collect();
    let view = MenuElements {
        burger: burger.clone(),
        menu: panel,
    };
    let state = Rc::new(RefCell::new(MobileMenu::new(cx.ui.clone(), Rc::new(view))));
    Some(menu::attach(
        &state,
        MenuBindings {
            burger: DomControl::new(burger),
            links,
            document: DomControl::new(cx.document.clone()),
        },
    ))
}

fn mount_anchors(cx: &Context<'_>) -> Subscription {
    let links = document_query_all(cx.document, selectors::ANCHOR_LINK)
        .into_iter()
        .map(|link| AnchorLink {
            href: link.get_attribute("href").unwrap_or_default(),
            control: DomControl::new(link),
        })
        .collect();
    anchors::attach(links, cx.ui.clone())
}

fn mount_faq(cx: &Context<'_>) -> Subscription {
    let items: Vec<FaqItem> = document_query_all(cx.document, selectors::FAQ_ITEM)
        .into_iter()
        .filter_map(|item| {
            let question = query(&item, selectors::FAQ_QUESTION)?;
            Some(FaqItem { item, question })
        })
        .collect();
    let initially_open = items
        .iter()
        .position(|entry| entry.item.class_list().contains(selectors::ACTIVE));
    let questions = items
        .iter()
        .map(|entry| DomControl::new(entry.question.clone()))
        .collect();
    let accordion = Rc::new(RefCell::new(Accordion::new(items.len(), initially_open)));
    faq::attach(&accordion, questions, Rc::new(FaqElements(items)))
}

fn mount_contact(cx: &Context<'_>) -> Option<Subscription> {
    let element = by_id(cx.document, selectors::CONTACT_FORM)?;
    let form = cast(element.clone())?;
    let view = ContactFormElements {
        document: cx.document.clone(),
        submit: query(&element, selectors::CONTACT_SUBMIT).and_then(cast),
        form,
    };
    let config = cx.config.contact.clone();
    let form = ContactForm::new(
        SimulatedSubmitter::new(config.submit_delay()),
        Rc::new(view),
        cx.scheduler.clone(),
        config,
    );
    Some(contact::attach(
        Rc::new(form),
        &DomControl::new(element),
        Rc::new(LocalSpawner),
    ))
}

fn mount_calculator(cx: &Context<'_>) -> Option<Subscription> {
    let modal = by_id(cx.document, selectors::CALCULATOR_MODAL)?;
    let form = by_id(cx.document, selectors::CALCULATOR_FORM)?;

    let steppers = query_all(&form, selectors::COUNTER_BUTTON)
        .into_iter()
        .filter_map(|button| {
            let direction = Direction::from_action(&button.get_attribute("data-action")?)?;
            Some((DomControl::new(button), direction))
        })
        .collect();
    let quantity = query(&form, selectors::QUANTITY_INPUT);

    let view = CalculatorModal {
        modal: modal.clone(),
        quantity: quantity.clone().and_then(cast),
        result: by_id(cx.document, selectors::CALCULATOR_RESULT),
    };
    let state = Rc::new(RefCell::new(PriceCalculator::new(
        cx.config.prices.clone(),
        cx.config.calculator.contacts_section.clone(),
        cx.ui.clone(),
    )));
    Some(calculator::attach(
        &state,
        CalculatorBindings {
            open: by_id(cx.document, selectors::OPEN_CALCULATOR).map(DomControl::new),
            close: by_id(cx.document, selectors::CLOSE_CALCULATOR).map(DomControl::new),
            overlay: query(&modal, selectors::MODAL_OVERLAY).map(DomControl::new),
            document: DomControl::new(cx.document.clone()),
            form: DomControl::new(form),
            steppers,
            quantity: quantity.map(DomControl::new),
            order: by_id(cx.document, selectors::CALCULATOR_ORDER).map(DomControl::new),
        },
        Rc::new(view),
    ))
}

fn mount_carousel(cx: &Context<'_>) -> Option<Subscription> {
    let element = cx.document.query_selector(selectors::CAROUSEL).ok().flatten()?;
    query(&element, selectors::CAROUSEL_TRACK)?;
    let strip: HtmlElement = cast(element)?;
    let state = Rc::new(RefCell::new(Carousel::from_config(&cx.config.carousel)));
    Some(carousel::attach(
        &state,
        &DomControl::new(strip.clone()),
        Rc::new(CarouselElement(strip)),
        cx.scheduler.clone(),
    ))
}
