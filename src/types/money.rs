//! Currency and money value types
//!
//! Amounts are whole currency units (`u64`), so the non-negative invariant is
//! carried by the type itself.

use super::error::AtmError;
use std::fmt;
use std::str::FromStr;

/// Three-letter ISO-4217 currency code
///
/// Stored as upper-case ASCII bytes so the type stays `Copy` and can be used
/// as a map key without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 3]);

impl Currency {
    /// Polish zloty
    pub const PLN: Currency = Currency(*b"PLN");
    /// Euro
    pub const EUR: Currency = Currency(*b"EUR");
    /// United States dollar
    pub const USD: Currency = Currency(*b"USD");

    /// The currency code as a string slice
    pub fn code(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Currency {
    type Err = AtmError;

    /// Parse a currency code, normalising to upper case
    ///
    /// Anything other than exactly three ASCII letters is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();

        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(AtmError::invalid_currency(s));
        }

        let mut code = [0u8; 3];
        for (slot, byte) in code.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_uppercase();
        }

        Ok(Currency(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in a given currency
///
/// `Money::ZERO` carries no currency and is accepted by a machine operating in
/// any currency. Every other value is bound to exactly one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    amount: u64,
    currency: Option<Currency>,
}

impl Money {
    /// The "no withdrawal" sentinel
    pub const ZERO: Money = Money {
        amount: 0,
        currency: None,
    };

    /// Create an amount in the given currency
    pub const fn new(amount: u64, currency: Currency) -> Self {
        Money {
            amount,
            currency: Some(currency),
        }
    }

    /// Amount in whole currency units
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Currency of this amount, `None` for the zero sentinel
    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Whether this amount may be handled by something operating in `currency`
    ///
    /// The currency-less zero sentinel matches every currency.
    pub fn is_in(&self, currency: Currency) -> bool {
        self.currency.is_none_or(|own| own == currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency {
            Some(currency) => write!(f, "{} {}", self.amount, currency),
            None => write!(f, "{}", self.amount),
        }
    }
}
