//! Type-safe price representation using decimal arithmetic.
//!
//! All monetary amounts in Verde are [`rust_decimal::Decimal`] values wrapped
//! in a [`Price`] carrying an ISO 4217 currency code. Floats are never used
//! for money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error combining prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Arithmetic across different currencies is not defined.
    #[error("currency mismatch: {0:?} vs {1:?}")]
    CurrencyMismatch(CurrencyCode, CurrencyCode),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Create a price from a whole-unit amount (e.g., `from_major(50)` is $50.00).
    #[must_use]
    pub fn from_major(units: i64) -> Self {
        Self::new(Decimal::new(units, 0), CurrencyCode::default())
    }

    /// Create a price from the smallest currency unit (e.g., `from_cents(999)` is $9.99).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::default())
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Get the currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Multiply the price by a quantity (line totals).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(
            self.amount * Decimal::from(quantity),
            self.currency_code,
        )
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if the currencies differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch(
                self.currency_code,
                other.currency_code,
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency_code))
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1999);
        assert_eq!(price.amount(), Decimal::new(1999, 2));
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_times() {
        let line = Price::from_cents(2000).times(3);
        assert_eq!(line, Price::from_major(60));
    }

    #[test]
    fn test_checked_add_same_currency() {
        let total = Price::from_cents(5500)
            .checked_add(&Price::from_cents(999))
            .expect("same currency");
        assert_eq!(total, Price::from_cents(6499));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let usd = Price::from_major(10);
        let eur = Price::new(Decimal::new(10, 0), CurrencyCode::EUR);
        assert_eq!(
            usd.checked_add(&eur),
            Err(PriceError::CurrencyMismatch(
                CurrencyCode::USD,
                CurrencyCode::EUR
            ))
        );
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::from_major(50).display(), "$50.00");
        assert_eq!(Price::zero(CurrencyCode::USD).display(), "$0.00");
    }
}
