//! Money type for representing monetary values.
//!
//! Uses an integer amount in the smallest currency unit (poisha for taka,
//! cents for dollars) so that cart totals never drift the way floating-point
//! sums do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Bangladeshi taka, the storefront's trading currency.
    #[default]
    BDT,
    /// US dollar, accepted for imported listings.
    USD,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BDT => "BDT",
            Currency::USD => "USD",
        }
    }

    /// Symbol placed before the amount.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BDT => "\u{09f3}",
            Currency::USD => "$",
        }
    }

    /// Minor units per major unit (poisha per taka, cents per dollar).
    pub fn minor_per_major(&self) -> i64 {
        100
    }

    /// Parse an ISO code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        [Currency::BDT, Currency::USD]
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units.
    ///
    /// ```
    /// use astharhat_commerce::money::{Money, Currency};
    /// let price = Money::from_major(5500, Currency::BDT);
    /// assert_eq!(price.amount_minor, 550_000);
    /// ```
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string with thousands separators (e.g., "৳5,925").
    ///
    /// The minor part is only printed when it is non-zero.
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "5,925" or "22.50").
    fn display_amount(&self) -> String {
        let per_major = self.currency.minor_per_major();
        let abs = self.amount_minor.unsigned_abs();
        let major = abs / per_major as u64;
        let minor = abs % per_major as u64;
        let sign = if self.amount_minor < 0 { "-" } else { "" };

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if minor == 0 {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped}.{minor:02}")
        }
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount_minor as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(5500, Currency::BDT);
        assert_eq!(m.amount_minor, 550_000);
        assert_eq!(m.currency, Currency::BDT);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_major(5925, Currency::BDT).display(), "\u{09f3}5,925");
        assert_eq!(Money::from_major(3_000_000, Currency::BDT).display(), "\u{09f3}3,000,000");
        assert_eq!(Money::new(2250, Currency::BDT).display_amount(), "22.50");
        assert_eq!(Money::new(-15_000, Currency::BDT).display_amount(), "-150");
        assert_eq!(Money::zero(Currency::USD).display(), "$0");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::BDT);
        let b = Money::new(500, Currency::BDT);
        assert_eq!(a.try_add(&b), Some(Money::new(1500, Currency::BDT)));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let bdt = Money::new(1000, Currency::BDT);
        let usd = Money::new(1000, Currency::USD);
        assert_eq!(bdt.try_add(&usd), None);
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::BDT);
        assert_eq!(m.try_multiply(2), None);
        assert_eq!(m.try_add(&Money::new(1, Currency::BDT)), None);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::from_major(5500, Currency::BDT);
        assert_eq!(m.percentage(5.0), Money::from_major(275, Currency::BDT));
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(100, Currency::BDT), Money::new(250, Currency::BDT)];
        assert_eq!(
            Money::try_sum(values.iter(), Currency::BDT),
            Some(Money::new(350, Currency::BDT))
        );
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::BDT),
            Some(Money::zero(Currency::BDT))
        );
    }

    #[test]
    fn test_money_ordering() {
        let sale = Money::from_major(5500, Currency::BDT);
        let original = Money::from_major(7500, Currency::BDT);
        assert!(original > sale);

        let mut prices = vec![original, sale, Money::zero(Currency::BDT)];
        prices.sort();
        assert_eq!(prices, vec![Money::zero(Currency::BDT), sale, original]);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BDT"), Some(Currency::BDT));
        assert_eq!(Currency::from_code(" usd "), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
