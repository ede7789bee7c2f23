//! Currency amounts in the smallest unit (cents).

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A signed currency amount stored as whole cents.
///
/// Arithmetic saturates at the `i64` range instead of overflowing.
///
/// Serialized as a decimal string (`"8.50"`); deserializes from either a
/// decimal string or a JSON number.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "String")]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Round a floating-point amount in currency units to the nearest cent.
    ///
    /// Returns `None` for non-finite input.
    pub fn from_f64(units: f64) -> Option<Self> {
        if !units.is_finite() {
            return None;
        }
        Some(Self((units * 100.0).round() as i64))
    }

    /// Amount in currency units, for ratio computations.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// `self × count`, saturating at the representable range.
    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(count)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Accepts `"8"`, `"8.5"`, `"8.50"`, `"8,50"` and a leading `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || DomainError::validation(format!("invalid amount: {s:?}"));

        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = match digits.split_once(['.', ',']) {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(DomainError::validation(format!(
                "amount has more than two decimal places: {s:?}"
            )));
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Text(String),
    Number(f64),
}

impl TryFrom<MoneyRepr> for Money {
    type Error = DomainError;

    fn try_from(value: MoneyRepr) -> Result<Self, Self::Error> {
        match value {
            MoneyRepr::Text(s) => s.parse(),
            MoneyRepr::Number(n) => Money::from_f64(n)
                .ok_or_else(|| DomainError::validation("amount must be finite")),
        }
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_decimal_text() {
        assert_eq!("8.50".parse::<Money>().unwrap(), Money::from_cents(850));
        assert_eq!("8,5".parse::<Money>().unwrap(), Money::from_cents(850));
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!(" -0.07 ".parse::<Money>().unwrap(), Money::from_cents(-7));
        assert_eq!(".5".parse::<Money>().unwrap(), Money::from_cents(50));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "abc", "1.2.3", "1.234", "-", ".", "1e3", "+5"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(8500).to_string(), "85.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn times_multiplies_rate_by_count() {
        assert_eq!(Money::from_cents(850).times(10), Money::from_cents(8500));
        assert_eq!(Money::from_cents(780).times(0), Money::ZERO);
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!(huge + Money::from_cents(10), Money::from_cents(i64::MAX));
        assert_eq!(-huge - Money::from_cents(10), Money::from_cents(i64::MIN));
        assert_eq!(-Money::from_cents(i64::MIN), Money::from_cents(i64::MAX));

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc, Money::from_cents(i64::MAX));

        let total: Money = [huge, huge, Money::from_cents(-5)].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX - 5));
    }

    #[test]
    fn serde_accepts_strings_and_numbers() {
        let from_text: Money = serde_json::from_str("\"9.00\"").unwrap();
        let from_number: Money = serde_json::from_str("9").unwrap();
        assert_eq!(from_text, Money::from_cents(900));
        assert_eq!(from_number, Money::from_cents(900));
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"9.00\"");
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert_eq!(Money::from_f64(f64::NAN), None);
        assert_eq!(Money::from_f64(55.0), Some(Money::from_cents(5500)));
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(cents in -10_000_000i64..10_000_000i64) {
            let money = Money::from_cents(cents);
            prop_assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }

        #[test]
        fn sum_matches_cent_sum(values in prop::collection::vec(-100_000i64..100_000i64, 0..20)) {
            let total: Money = values.iter().map(|c| Money::from_cents(*c)).sum();
            prop_assert_eq!(total.cents(), values.iter().sum::<i64>());
        }
    }
}
