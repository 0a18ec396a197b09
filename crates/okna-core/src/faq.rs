use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::{bind, Control, EventFlow, EventKind, Subscription};

pub trait FaqView {
    /// Show or hide answer `index` and mirror it in `aria-expanded`.
    fn set_expanded(&self, index: usize, expanded: bool);
}

/// Single-open accordion over `len` questions.
#[derive(Debug, Clone)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize, initially_open: Option<usize>) -> Self {
        Self {
            len,
            open: initially_open.filter(|i| *i < len),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn expanded(&self) -> Option<usize> {
        self.open
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Collapse every other item and flip `index`.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.open;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open
    }
}

/// `questions[i]` toggles item `i`.
pub fn attach<C: Control>(
    accordion: &Rc<RefCell<Accordion>>,
    questions: Vec<C>,
    view: Rc<dyn FaqView>,
) -> Subscription {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let view = view.clone();
            bind(question, EventKind::Click, accordion, move |accordion, _| {
                accordion.toggle(index);
                for i in 0..accordion.len() {
                    view.set_expanded(i, accordion.is_expanded(i));
                }
                EventFlow::Continue
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::testing::FakeControl;

    #[derive(Default)]
    struct Recorder(RefCell<BTreeMap<usize, bool>>);

    impl FaqView for Recorder {
        fn set_expanded(&self, index: usize, expanded: bool) {
            self.0.borrow_mut().insert(index, expanded);
        }
    }

    #[test]
    fn test_toggle_keeps_single_item_open() {
        let mut acc = Accordion::new(3, None);
        assert_eq!(acc.toggle(1), Some(1));
        assert_eq!(acc.toggle(2), Some(2));
        assert!(!acc.is_expanded(1));
        assert_eq!(acc.toggle(2), None);
        assert_eq!(acc.toggle(7), None);
    }

    #[test]
    fn test_initially_open_out_of_range_ignored() {
        assert_eq!(Accordion::new(2, Some(5)).expanded(), None);
        assert_eq!(Accordion::new(2, Some(1)).expanded(), Some(1));
    }

    #[test]
    fn test_clicks_update_every_item() {
        let accordion = Rc::new(RefCell::new(Accordion::new(3, None)));
        let questions: Vec<FakeControl> = (0..3).map(|_| FakeControl::new()).collect();
        let view = Rc::new(Recorder::default());
        let _sub = attach(&accordion, questions.clone(), view.clone());

        questions[0].click();
        questions[2].click();
        let expected: BTreeMap<_, _> = [(0, false), (1, false), (2, true)].into();
        assert_eq!(*view.0.borrow(), expected);

        questions[2].click();
        assert!(view.0.borrow().values().all(|open| !open));
    }
}
