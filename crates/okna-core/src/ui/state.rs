use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::theme::Theme;
use crate::ui::Page;

/// Features that can suppress page scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScrollHolder {
    MobileMenu,
    Calculator,
}

/// Page-wide state shared by every feature.
///
/// The scroll lock is held per feature: the body stays locked while any
/// holder remains, so closing the menu under an open calculator does not
/// unlock the page.
pub struct UiState {
    page: Rc<dyn Page>,
    scroll_holders: BTreeSet<ScrollHolder>,
    theme: Option<Theme>,
}

/// Handle passed to each feature at attach time.
pub type SharedUiState = Rc<RefCell<UiState>>;

impl UiState {
    pub fn new(page: Rc<dyn Page>) -> Self {
        Self {
            page,
            scroll_holders: BTreeSet::new(),
            theme: None,
        }
    }

    pub fn shared(page: Rc<dyn Page>) -> SharedUiState {
        Rc::new(RefCell::new(Self::new(page)))
    }

    pub fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }

    pub fn lock_scroll(&mut self, holder: ScrollHolder) {
        let was_locked = self.is_scroll_locked();
        self.scroll_holders.insert(holder);
        if !was_locked {
            tracing::debug!(?holder, "Scroll locked");
            self.page.set_scroll_locked(true);
        }
    }

    pub fn release_scroll(&mut self, holder: ScrollHolder) {
        if self.scroll_holders.remove(&holder) && !self.is_scroll_locked() {
            tracing::debug!(?holder, "Scroll released");
            self.page.set_scroll_locked(false);
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        !self.scroll_holders.is_empty()
    }

    pub fn holds_scroll(&self, holder: ScrollHolder) -> bool {
        self.scroll_holders.contains(&holder)
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    /// Absolute scroll offset that puts section `id` just below the header.
    pub fn section_offset(&self, id: &str) -> Option<f64> {
        let top = self.page.element_top(id)?;
        Some(top + self.page.scroll_y() - self.page.header_height())
    }

    /// Smooth-scroll to section `id`. Returns `false` if it does not exist.
    pub fn scroll_to_section(&self, id: &str) -> bool {
        match self.section_offset(id) {
            Some(offset) => {
                tracing::debug!(section = id, offset, "Scrolling to section");
                self.page.scroll_to(offset);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for UiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiState")
            .field("scroll_holders", &self.scroll_holders)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
