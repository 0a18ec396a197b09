use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::{bind, Control, EventFlow, EventKind, Key, ScrollHolder, SharedUiState, Subscription, UiEvent};

pub trait MenuView {
    /// Mark both the burger button and the menu panel active or not.
    fn set_open(&self, open: bool);
}

/// Mobile navigation drawer. Holds the scroll lock while open.
pub struct MobileMenu {
    open: bool,
    ui: SharedUiState,
    view: Rc<dyn MenuView>,
}

impl MobileMenu {
    pub fn new(ui: SharedUiState, view: Rc<dyn MenuView>) -> Self {
        Self {
            open: false,
            ui,
            view,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.view.set_open(open);
        let mut ui = self.ui.borrow_mut();
        if open {
            ui.lock_scroll(ScrollHolder::MobileMenu);
        } else {
            ui.release_scroll(ScrollHolder::MobileMenu);
        }
    }
}

pub struct MenuBindings<C> {
    pub burger: C,
    /// Links inside the drawer; following one closes it.
    pub links: Vec<C>,
    pub document: C,
}

pub fn attach<C: Control>(menu: &Rc<RefCell<MobileMenu>>, bindings: MenuBindings<C>) -> Subscription {
    let mut subscription = bind(&bindings.burger, EventKind::Click, menu, |menu, _| {
        menu.toggle();
        EventFlow::Continue
    });

    for link in &bindings.links {
        subscription.push(bind(link, EventKind::Click, menu, |menu, _| {
            menu.close();
            EventFlow::Continue
        }));
    }

    subscription.push(bind(&bindings.document, EventKind::KeyDown, menu, |menu, event| {
        if matches!(event, UiEvent::Key(Key::Escape)) && menu.is_open() {
            menu.close();
        }
        EventFlow::Continue
    }));

    subscription
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeControl, FakePage};
    use crate::ui::UiState;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<bool>>);

    impl MenuView for Recorder {
        fn set_open(&self, open: bool) {
            self.0.borrow_mut().push(open);
        }
    }

    struct Fixture {
        page: Rc<FakePage>,
        view: Rc<Recorder>,
        menu: Rc<RefCell<MobileMenu>>,
        burger: FakeControl,
        link: FakeControl,
        document: FakeControl,
        _sub: Subscription,
    }

    fn fixture() -> Fixture {
        let page = FakePage::new();
        let ui = UiState::shared(page.clone());
        let view = Rc::new(Recorder::default());
        let menu = Rc::new(RefCell::new(MobileMenu::new(ui, view.clone())));
        let (burger, link, document) = (FakeControl::new(), FakeControl::new(), FakeControl::new());
        let sub = attach(
            &menu,
            MenuBindings {
                burger: burger.clone(),
                links: vec![link.clone()],
                document: document.clone(),
            },
        );
        Fixture {
            page,
            view,
            menu,
            burger,
            link,
            document,
            _sub: sub,
        }
    }

    #[test]
    fn test_burger_toggles_and_locks_scroll() {
        let f = fixture();
        f.burger.click();
        assert!(f.menu.borrow().is_open());
        assert!(f.page.locked());

        f.burger.click();
        assert!(!f.menu.borrow().is_open());
        assert!(!f.page.locked());
        assert_eq!(*f.view.0.borrow(), vec![true, false]);
    }

    #[test]
    fn test_link_closes_menu() {
        let f = fixture();
        f.burger.click();
        f.link.click();
        assert!(!f.menu.borrow().is_open());
        assert!(!f.page.locked());
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        let f = fixture();
        f.document.emit(EventKind::KeyDown, UiEvent::Key(Key::Escape));
        assert!(f.view.0.borrow().is_empty());

        f.burger.click();
        f.document.emit(EventKind::KeyDown, UiEvent::Key(Key::Other("a".into())));
        assert!(f.menu.borrow().is_open());
        f.document.emit(EventKind::KeyDown, UiEvent::Key(Key::Escape));
        assert!(!f.menu.borrow().is_open());
    }
}
