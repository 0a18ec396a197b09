//! Price calculator modal.
//!
//! [`PriceCalculator`] owns the selection and the modal flag and knows
//! nothing about the DOM. [`attach`] wires it to the modal's controls and
//! pushes every change back out through a [`CalculatorView`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::format;
use crate::models::{Direction, Extra, PriceTable, Quantity, SelectionField, SelectionState};
use crate::ui::{bind, Control, EventFlow, EventKind, Key, ScrollHolder, SharedUiState, Subscription, UiEvent};

pub trait CalculatorView {
    fn set_open(&self, open: bool);
    /// Write the clamped quantity back into the stepper's text box.
    fn set_quantity(&self, quantity: Quantity);
    fn set_result(&self, label: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

pub struct PriceCalculator {
    prices: PriceTable,
    contacts_section: String,
    ui: SharedUiState,
    selection: SelectionState,
    modal: ModalState,
}

impl PriceCalculator {
    pub fn new(prices: PriceTable, contacts_section: impl Into<String>, ui: SharedUiState) -> Self {
        Self {
            prices,
            contacts_section: contacts_section.into(),
            ui,
            selection: SelectionState::default(),
            modal: ModalState::Closed,
        }
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn is_open(&self) -> bool {
        self.modal == ModalState::Open
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn open(&mut self) {
        self.modal = ModalState::Open;
        self.ui.borrow_mut().lock_scroll(ScrollHolder::Calculator);
        tracing::debug!("Calculator opened");
    }

    /// Hide the modal and give back the scroll lock. Safe to call when closed.
    pub fn close(&mut self) {
        if self.modal == ModalState::Open {
            tracing::debug!("Calculator closed");
        }
        self.modal = ModalState::Closed;
        self.ui.borrow_mut().release_scroll(ScrollHolder::Calculator);
    }

    /// Apply a raw form `(field, value)` pair; see [`SelectionState::apply`].
    pub fn set_selection(&mut self, field: &str, value: &str) -> bool {
        let applied = self.selection.apply(field, value);
        if !applied {
            tracing::debug!(field, value, "Ignored calculator input");
        }
        applied
    }

    /// Follow a checkbox: `checked` is its state after the click.
    pub fn set_extra(&mut self, extra: Extra, checked: bool) {
        if checked {
            self.selection.extras.insert(extra);
        } else {
            self.selection.extras.remove(&extra);
        }
    }

    /// Step the quantity. Returns `false` at a bound.
    pub fn adjust_quantity(&mut self, direction: Direction) -> bool {
        match self.selection.quantity.step(direction) {
            Some(quantity) => {
                self.selection.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn set_quantity_text(&mut self, raw: &str) -> Quantity {
        self.selection.quantity = Quantity::parse_lossy(raw);
        self.selection.quantity
    }

    pub fn compute_price(&self) -> u64 {
        self.prices.total(&self.selection)
    }

    pub fn price_label(&self) -> String {
        format::price_label(self.compute_price())
    }

    /// Close the modal and bring the contact form into view.
    ///
    /// Returns whether the contacts section was found to scroll to.
    pub fn place_order(&mut self) -> bool {
        self.close();
        tracing::info!(total = self.compute_price(), "Order placed from calculator");
        let scrolled = self.ui.borrow().scroll_to_section(&self.contacts_section);
        if !scrolled {
            tracing::debug!(section = %self.contacts_section, "Contacts section missing");
        }
        scrolled
    }
}

impl std::fmt::Debug for PriceCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceCalculator")
            .field("selection", &self.selection)
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

pub struct CalculatorBindings<C> {
    pub open: Option<C>,
    pub close: Option<C>,
    pub overlay: Option<C>,
    pub document: C,
    /// The calculator form; change events from every input bubble here.
    pub form: C,
    /// Counter buttons with the direction from their `data-action`.
    pub steppers: Vec<(C, Direction)>,
    /// The quantity text box, for in-progress typing.
    pub quantity: Option<C>,
    pub order: Option<C>,
}

fn render(calculator: &PriceCalculator, view: &dyn CalculatorView) {
    view.set_open(calculator.is_open());
    view.set_quantity(calculator.selection().quantity);
    view.set_result(&calculator.price_label());
}

pub fn attach<C: Control>(
    calculator: &Rc<RefCell<PriceCalculator>>,
    bindings: CalculatorBindings<C>,
    view: Rc<dyn CalculatorView>,
) -> Subscription {
    render(&calculator.borrow(), view.as_ref());

    let mut subscription = Subscription::empty();

    let on_click = |action: fn(&mut PriceCalculator)| {
        let view = view.clone();
        move |calculator: &mut PriceCalculator, _: &UiEvent| {
            action(calculator);
            render(calculator, view.as_ref());
            EventFlow::Continue
        }
    };

    if let Some(open) = &bindings.open {
        subscription.push(bind(open, EventKind::Click, calculator, on_click(PriceCalculator::open)));
    }
    for close in bindings.close.iter().chain(&bindings.overlay) {
        subscription.push(bind(close, EventKind::Click, calculator, on_click(PriceCalculator::close)));
    }
    if let Some(order) = &bindings.order {
        subscription.push(bind(
            order,
            EventKind::Click,
            calculator,
            on_click(|calculator| {
                calculator.place_order();
            }),
        ));
    }

    {
        let view = view.clone();
        subscription.push(bind(&bindings.document, EventKind::KeyDown, calculator, move |calculator, event| {
            if matches!(event, UiEvent::Key(Key::Escape)) && calculator.is_open() {
                calculator.close();
                render(calculator, view.as_ref());
            }
            EventFlow::Continue
        }));
    }

    for (button, direction) in &bindings.steppers {
        let view = view.clone();
        let direction = *direction;
        subscription.push(bind(button, EventKind::Click, calculator, move |calculator, _| {
            if calculator.adjust_quantity(direction) {
                render(calculator, view.as_ref());
            }
            EventFlow::Continue
        }));
    }

    {
        let view = view.clone();
        subscription.push(bind(&bindings.form, EventKind::Change, calculator, move |calculator, event| {
            let UiEvent::Change { name, value, checked } = event else {
                return EventFlow::Continue;
            };
            match SelectionField::from_name(name) {
                Some(SelectionField::Service | SelectionField::Size) if *checked => {
                    calculator.set_selection(name, value);
                }
                Some(SelectionField::Extras) => match Extra::from_key(value) {
                    Some(extra) => calculator.set_extra(extra, *checked),
                    None => tracing::debug!(value = %value, "Unknown extra"),
                },
                Some(SelectionField::Quantity) => {
                    calculator.set_quantity_text(value);
                }
                _ => return EventFlow::Continue,
            }
            render(calculator, view.as_ref());
            EventFlow::Continue
        }));
    }

    if let Some(quantity) = &bindings.quantity {
        subscription.push(bind(quantity, EventKind::Input, calculator, move |calculator, event| {
            if let UiEvent::Input { value } = event {
                calculator.set_quantity_text(value);
                view.set_result(&calculator.price_label());
            }
            EventFlow::Continue
        }));
    }

    subscription
}
