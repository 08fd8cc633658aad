//! Banknote denominations and per-currency catalogs

use super::money::Currency;
use std::fmt;

/// A physical banknote the machine can dispense
///
/// Each note belongs to exactly one currency and carries its face value in
/// whole units of that currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banknote {
    Pl10,
    Pl20,
    Pl50,
    Pl100,
    Pl200,
    Pl500,
    Eur5,
    Eur10,
    Eur20,
    Eur50,
    Eur100,
    Eur200,
    Eur500,
}

/// Zloty notes, highest face value first
const PLN_CATALOG: [Banknote; 6] = [
    Banknote::Pl500,
    Banknote::Pl200,
    Banknote::Pl100,
    Banknote::Pl50,
    Banknote::Pl20,
    Banknote::Pl10,
];

/// Euro notes, highest face value first
const EUR_CATALOG: [Banknote; 7] = [
    Banknote::Eur500,
    Banknote::Eur200,
    Banknote::Eur100,
    Banknote::Eur50,
    Banknote::Eur20,
    Banknote::Eur10,
    Banknote::Eur5,
];

impl Banknote {
    /// Face value in whole currency units
    pub const fn value(self) -> u32 {
        match self {
            Banknote::Eur5 => 5,
            Banknote::Pl10 | Banknote::Eur10 => 10,
            Banknote::Pl20 | Banknote::Eur20 => 20,
            Banknote::Pl50 | Banknote::Eur50 => 50,
            Banknote::Pl100 | Banknote::Eur100 => 100,
            Banknote::Pl200 | Banknote::Eur200 => 200,
            Banknote::Pl500 | Banknote::Eur500 => 500,
        }
    }

    pub const fn currency(self) -> Currency {
        match self {
            Banknote::Pl10
            | Banknote::Pl20
            | Banknote::Pl50
            | Banknote::Pl100
            | Banknote::Pl200
            | Banknote::Pl500 => Currency::PLN,
            _ => Currency::EUR,
        }
    }

    /// All notes issued in `currency`, in strictly descending face value
    ///
    /// Unsupported currencies have an empty catalog.
    pub fn catalog(currency: Currency) -> &'static [Banknote] {
        if currency == Currency::PLN {
            &PLN_CATALOG
        } else if currency == Currency::EUR {
            &EUR_CATALOG
        } else {
            &[]
        }
    }

    /// Look up the note of `currency` with the given face value
    pub fn from_value(currency: Currency, value: u32) -> Option<Banknote> {
        Self::catalog(currency)
            .iter()
            .copied()
            .find(|note| note.value() == value)
    }
}

impl fmt::Display for Banknote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.currency())
    }
}
