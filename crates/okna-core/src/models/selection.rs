use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Extra, ServiceKind, SizeKind};

/// Number of units in an order, always within `[Quantity::MIN, Quantity::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: Quantity = Quantity(1);
    pub const MAX: Quantity = Quantity(20);

    /// Clamp `n` into range.
    pub fn new(n: u32) -> Self {
        let n = n.clamp(u32::from(Self::MIN.0), u32::from(Self::MAX.0));
        Self(n as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One step in `direction`, or `None` when already at that bound.
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Increment if self < Self::MAX => Some(Self(self.0 + 1)),
            Direction::Decrement if self > Self::MIN => Some(Self(self.0 - 1)),
            _ => None,
        }
    }

    /// Parse the stepper's text box. Leading integer wins, anything
    /// unparseable (or zero) counts as one unit.
    pub fn parse_lossy(s: &str) -> Self {
        let digits: String = s
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => Self::MIN,
            Ok(n) => Self::new(n),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Self::new(n)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        u32::from(q.0)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stepper button direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// Map a counter button's `data-action` value.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "plus" => Some(Self::Increment),
            "minus" => Some(Self::Decrement),
            _ => None,
        }
    }
}

/// Form fields the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    Service,
    Size,
    Extras,
    Quantity,
}

impl SelectionField {
    /// Map an input's `name` attribute.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "service" => Some(Self::Service),
            "size" => Some(Self::Size),
            "extras" => Some(Self::Extras),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }
}

/// Current calculator inputs.
///
/// `service` and `size` stay `None` until the user picks one; the price
/// table substitutes the defaults at compute time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    pub service: Option<ServiceKind>,
    pub size: Option<SizeKind>,
    pub quantity: Quantity,
    pub extras: BTreeSet<Extra>,
}

impl SelectionState {
    pub fn effective_service(&self) -> ServiceKind {
        self.service.unwrap_or_default()
    }

    pub fn effective_size(&self) -> SizeKind {
        self.size.unwrap_or_default()
    }

    /// Flip membership of `extra`. Returns whether it is selected afterwards.
    pub fn toggle_extra(&mut self, extra: Extra) -> bool {
        if !self.extras.remove(&extra) {
            self.extras.insert(extra);
            true
        } else {
            false
        }
    }

    /// Apply a raw `(field, value)` pair from the form.
    ///
    /// Service and size replace the previous value, extras toggle, quantity
    /// is parsed and clamped. Unknown fields or values are ignored and
    /// reported as `false`.
    pub fn apply(&mut self, field: &str, value: &str) -> bool {
        match SelectionField::from_name(field) {
            Some(SelectionField::Service) => match ServiceKind::from_key(value) {
                Some(kind) => {
                    self.service = Some(kind);
                    true
                }
                None => false,
            },
            Some(SelectionField::Size) => match SizeKind::from_key(value) {
                Some(kind) => {
                    self.size = Some(kind);
                    true
                }
                None => false,
            },
            Some(SelectionField::Extras) => match Extra::from_key(value) {
                Some(extra) => {
                    self.toggle_extra(extra);
                    true
                }
                None => false,
            },
            Some(SelectionField::Quantity) => {
                self.quantity = Quantity::parse_lossy(value);
                true
            }
            None => false,
        }
    }
}
