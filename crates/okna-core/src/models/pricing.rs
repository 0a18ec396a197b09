use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OknaError;
use crate::models::SelectionState;

/// What is being installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[default]
    Window,
    Door,
    Balcony,
}

impl ServiceKind {
    /// Form value of the radio input.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Door => "door",
            Self::Balcony => "balcony",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "window" => Some(Self::Window),
            "door" => Some(Self::Door),
            "balcony" => Some(Self::Balcony),
            _ => None,
        }
    }

    pub const ALL: &[ServiceKind] = &[Self::Window, Self::Door, Self::Balcony];
}

/// Opening size. `Small` carries no surcharge in the stock table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKind {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizeKind {
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub const ALL: &[SizeKind] = &[Self::Small, Self::Medium, Self::Large];
}

/// Optional add-on work, each priced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extra {
    Sill,
    Slopes,
    Mosquito,
    Dismount,
}

impl Extra {
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Sill => "sill",
            Self::Slopes => "slopes",
            Self::Mosquito => "mosquito",
            Self::Dismount => "dismount",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "sill" => Some(Self::Sill),
            "slopes" => Some(Self::Slopes),
            "mosquito" => Some(Self::Mosquito),
            "dismount" => Some(Self::Dismount),
            _ => None,
        }
    }

    pub const ALL: &[Extra] = &[Self::Sill, Self::Slopes, Self::Mosquito, Self::Dismount];
}

macro_rules! key_traits {
    ($ty:ty, $field:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_key())
            }
        }

        impl FromStr for $ty {
            type Err = OknaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_key(s).ok_or_else(|| OknaError::UnknownOption {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

key_traits!(ServiceKind, "service");
key_traits!(SizeKind, "size");
key_traits!(Extra, "extra");

/// Base price per service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePrices {
    pub window: u64,
    pub door: u64,
    pub balcony: u64,
}

impl ServicePrices {
    pub fn get(&self, kind: ServiceKind) -> u64 {
        match kind {
            ServiceKind::Window => self.window,
            ServiceKind::Door => self.door,
            ServiceKind::Balcony => self.balcony,
        }
    }
}

/// Surcharge per size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePrices {
    pub small: u64,
    pub medium: u64,
    pub large: u64,
}

impl SizePrices {
    pub fn get(&self, kind: SizeKind) -> u64 {
        match kind {
            SizeKind::Small => self.small,
            SizeKind::Medium => self.medium,
            SizeKind::Large => self.large,
        }
    }
}

/// Surcharge per extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPrices {
    pub sill: u64,
    pub slopes: u64,
    pub mosquito: u64,
    pub dismount: u64,
}

impl ExtraPrices {
    pub fn get(&self, extra: Extra) -> u64 {
        match extra {
            Extra::Sill => self.sill,
            Extra::Slopes => self.slopes,
            Extra::Mosquito => self.mosquito,
            Extra::Dismount => self.dismount,
        }
    }
}

/// Read-only price list the calculator quotes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    pub service: ServicePrices,
    pub size: SizePrices,
    pub extras: ExtraPrices,
}

impl PriceTable {
    /// Price of a single unit: base + size surcharge + every selected extra.
    ///
    /// Missing service/size selections fall back to `window`/`small`.
    pub fn unit_price(&self, selection: &SelectionState) -> u64 {
        let base = self
            .service
            .get(selection.effective_service())
            .saturating_add(self.size.get(selection.effective_size()));
        selection
            .extras
            .iter()
            .fold(base, |total, extra| total.saturating_add(self.extras.get(*extra)))
    }

    /// Unit price times quantity. Saturates on absurd user-supplied tables.
    pub fn total(&self, selection: &SelectionState) -> u64 {
        self.unit_price(selection)
            .saturating_mul(u64::from(selection.quantity.get()))
    }

    pub fn quote(&self, selection: &SelectionState) -> Quote {
        let total = self.total(selection);
        Quote {
            total,
            label: crate::format::price_label(total),
        }
    }
}

/// A computed total with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub total: u64,
    pub label: String,
}

impl Default for PriceTable {
    fn default() -> Self {
        crate::config::SiteConfig::default().prices
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::Quantity;

    fn selection(
        service: ServiceKind,
        size: SizeKind,
        quantity: u32,
        extras: &[Extra],
    ) -> SelectionState {
        SelectionState {
            service: Some(service),
            size: Some(size),
            quantity: Quantity::new(quantity),
            extras: extras.iter().copied().collect(),
        }
    }

    #[test]
    fn test_stock_prices() {
        let table = PriceTable::default();
        assert_eq!(table.service.get(ServiceKind::Window), 3000);
        assert_eq!(table.service.get(ServiceKind::Door), 4000);
        assert_eq!(table.service.get(ServiceKind::Balcony), 8000);
        assert_eq!(table.size.get(SizeKind::Small), 0);
        assert_eq!(table.size.get(SizeKind::Large), 2000);
        assert_eq!(table.extras.get(Extra::Slopes), 1500);
    }

    #[test]
    fn test_door_large_two_units() {
        let table = PriceTable::default();
        let sel = selection(
            ServiceKind::Door,
            SizeKind::Large,
            2,
            &[Extra::Sill, Extra::Mosquito],
        );
        assert_eq!(table.unit_price(&sel), 8000);
        assert_eq!(table.total(&sel), 16000);
    }

    #[test]
    fn test_defaults_when_nothing_selected() {
        let table = PriceTable::default();
        assert_eq!(table.total(&SelectionState::default()), 3000);
    }

    #[test]
    fn test_formula_holds_for_every_combination() {
        let table = PriceTable::default();
        // Every subset of extras, encoded as a bitmask.
        for mask in 0u8..16 {
            let extras: BTreeSet<Extra> = Extra::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, e)| *e)
                .collect();
            let extras_sum: u64 = extras.iter().map(|e| table.extras.get(*e)).sum();

            for &service in ServiceKind::ALL {
                for &size in SizeKind::ALL {
                    for quantity in 1..=20u32 {
                        let sel = SelectionState {
                            service: Some(service),
                            size: Some(size),
                            quantity: Quantity::new(quantity),
                            extras: extras.clone(),
                        };
                        let expected = (table.service.get(service)
                            + table.size.get(size)
                            + extras_sum)
                            * u64::from(quantity);
                        assert_eq!(table.total(&sel), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_huge_prices_saturate() {
        let mut table = PriceTable::default();
        table.service.window = i64::MAX as u64;
        table.size.large = i64::MAX as u64;
        table.extras.sill = i64::MAX as u64;

        let sel = selection(ServiceKind::Window, SizeKind::Large, 3, &[Extra::Sill]);
        assert_eq!(table.unit_price(&sel), u64::MAX);
        assert_eq!(table.total(&sel), u64::MAX);
    }

    #[test]
    fn test_quote_carries_label() {
        let quote = PriceTable::default().quote(&SelectionState::default());
        assert_eq!(quote.total, 3000);
        assert_eq!(quote.label, "от 3\u{a0}000 ₽");
    }

    #[test]
    fn test_keys_parse() {
        assert_eq!("door".parse::<ServiceKind>().unwrap(), ServiceKind::Door);
        assert_eq!("medium".parse::<SizeKind>().unwrap(), SizeKind::Medium);
        assert_eq!("mosquito".parse::<Extra>().unwrap(), Extra::Mosquito);
        assert!("garage".parse::<ServiceKind>().is_err());
        assert_eq!(Extra::Dismount.to_string(), "dismount");
    }
}
