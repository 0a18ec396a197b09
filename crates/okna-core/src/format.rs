//! Display formatting for prices.

/// Group separator used by the `ru-RU` locale (no-break space).
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Currency sign appended to every price label.
pub const CURRENCY: &str = "₽";

/// Format `amount` with thousands grouped in threes, `ru-RU` style.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// The calculator's result line, e.g. `от 16 000 ₽`.
pub fn price_label(amount: u64) -> String {
    format!("от {} {CURRENCY}", group_thousands(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(800), "800");
        assert_eq!(group_thousands(3000), "3\u{a0}000");
        assert_eq!(group_thousands(16000), "16\u{a0}000");
        assert_eq!(group_thousands(250000), "250\u{a0}000");
        assert_eq!(group_thousands(1234567), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(16000), "от 16\u{a0}000 ₽");
        assert_eq!(price_label(3000), "от 3\u{a0}000 ₽");
    }
}
