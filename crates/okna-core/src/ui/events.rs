use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// DOM event families the features listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    KeyDown,
    Scroll,
    Submit,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    /// `prefers-color-scheme` media query flipped.
    ColorSchemeChange,
}

impl EventKind {
    /// Event type string passed to `addEventListener`.
    pub fn dom_name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change | Self::ColorSchemeChange => "change",
            Self::Input => "input",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::Submit => "submit",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::MouseLeave => "mouseleave",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
        }
    }

    /// Listeners that never cancel the default action can be registered
    /// as passive.
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Scroll | Self::TouchStart | Self::TouchMove)
    }
}

/// Keys the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A DOM event reduced to what the features read from it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click,
    Key(Key),
    /// Committed change of a form input.
    Change {
        name: String,
        value: String,
        checked: bool,
    },
    /// In-progress typing in a text input.
    Input { value: String },
    Scroll,
    /// Form submission with every named field's value.
    Submit { fields: BTreeMap<String, String> },
    /// Press or move at a page-relative x coordinate (mouse or first touch).
    Pointer { page_x: f64 },
    /// Mouse up, mouse leave or touch end.
    Release,
    ColorScheme { dark: bool },
}

/// What the adapter should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFlow {
    #[default]
    Continue,
    PreventDefault,
}

pub type Handler = Box<dyn FnMut(&UiEvent) -> EventFlow>;

/// Anything that can deliver events: an element, the document, the window,
/// a media query list.
pub trait Control {
    fn listen(&self, kind: EventKind, handler: Handler) -> Subscription;
}

/// Listener registrations that are removed when the handle is dropped.
#[must_use = "dropping a Subscription detaches its listeners"]
#[derive(Default)]
pub struct Subscription {
    teardown: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// A handle that runs `teardown` on detach.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: vec![Box::new(teardown)],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Take over `other`'s listeners; they now detach with `self`.
    pub fn push(&mut self, mut other: Subscription) {
        self.teardown.append(&mut other.teardown);
    }

    pub fn is_empty(&self) -> bool {
        self.teardown.is_empty()
    }

    /// Number of listener registrations held.
    pub fn len(&self) -> usize {
        self.teardown.len()
    }

    /// Remove every listener now.
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        while let Some(teardown) = self.teardown.pop() {
            teardown();
        }
    }
}

impl FromIterator<Subscription> for Subscription {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        let mut all = Subscription::empty();
        for sub in iter {
            all.push(sub);
        }
        all
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("listeners", &self.teardown.len())
            .finish()
    }
}

/// Listen on `control` with a handler that mutably borrows `state`.
///
/// An event that arrives while `state` is already borrowed (a handler
/// re-entering through a synchronous DOM call) is dropped with a warning.
pub fn bind<C, T, F>(control: &C, kind: EventKind, state: &Rc<RefCell<T>>, mut handler: F) -> Subscription
where
    C: Control + ?Sized,
    T: 'static,
    F: FnMut(&mut T, &UiEvent) -> EventFlow + 'static,
{
    let state = Rc::clone(state);
    control.listen(
        kind,
        Box::new(move |event| match state.try_borrow_mut() {
            Ok(mut state) => handler(&mut state, event),
            Err(_) => {
                tracing::warn!(event = kind.dom_name(), "Dropped re-entrant event");
                EventFlow::Continue
            }
        }),
    )
}
