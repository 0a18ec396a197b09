use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::{bind, Control, EventFlow, EventKind, SharedUiState, Subscription};

pub trait HeaderView {
    fn set_scrolled(&self, scrolled: bool);
}

/// Compact-header flag driven by the page scroll offset.
#[derive(Debug, Clone)]
pub struct HeaderState {
    threshold: f64,
    scrolled: bool,
}

impl HeaderState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    /// Re-evaluate against `scroll_y`. Returns whether the flag flipped.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

/// Sync the header once now, then on every window scroll.
pub fn attach<C: Control>(
    header: &Rc<RefCell<HeaderState>>,
    window: &C,
    view: Rc<dyn HeaderView>,
    ui: SharedUiState,
) -> Subscription {
    {
        let mut state = header.borrow_mut();
        state.update(ui.borrow().page().scroll_y());
        view.set_scrolled(state.is_scrolled());
    }

    bind(window, EventKind::Scroll, header, move |state, _| {
        if state.update(ui.borrow().page().scroll_y()) {
            view.set_scrolled(state.is_scrolled());
        }
        EventFlow::Continue
    })
}
