//! Ids, selectors and state classes of the landing page markup.

pub const THEME_TOGGLE: &str = "theme-toggle";
pub const HEADER: &str = "header";
pub const BURGER: &str = "burger";
pub const MOBILE_MENU: &str = "mobile-menu";
pub const CONTACT_FORM: &str = "contact-form";
pub const OPEN_CALCULATOR: &str = "open-calculator";
pub const CLOSE_CALCULATOR: &str = "close-calculator";
pub const CALCULATOR_MODAL: &str = "calculator-modal";
pub const CALCULATOR_FORM: &str = "calculator-form";
pub const CALCULATOR_RESULT: &str = "calc-result";
pub const CALCULATOR_ORDER: &str = "calc-order";
pub const SITE_CONFIG: &str = "site-config";

pub const MOBILE_MENU_LINK: &str = ".mobile-menu__link";
pub const ANCHOR_LINK: &str = "a[href^=\"#\"]";
pub const FAQ_ITEM: &str = ".faq__item";
pub const FAQ_QUESTION: &str = ".faq__question";
pub const CONTACT_SUBMIT: &str = ".contact-form__submit";
pub const CONTACT_MESSAGE: &str = ".contact-form__message";
pub const MODAL_OVERLAY: &str = ".modal__overlay";
pub const COUNTER_BUTTON: &str = ".calculator__counter-btn";
pub const QUANTITY_INPUT: &str = "[name=\"quantity\"]";
pub const CAROUSEL: &str = ".reviews-carousel";
pub const CAROUSEL_TRACK: &str = ".reviews-carousel__track";
pub const NAMED_FIELD: &str = "[name]";

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub const ACTIVE: &str = "active";
pub const HEADER_SCROLLED: &str = "header--scrolled";
pub const DRAGGING: &str = "dragging";
pub const MESSAGE_CLASS: &str = "contact-form__message";
