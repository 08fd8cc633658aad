//! Thread-safe in-memory money deposit
//!
//! `InMemoryMoneyDeposit` stands in for the cassettes of a physical machine.
//! The withdrawal procedure only reads counts from it; the simulator removes
//! the notes after a withdrawal has been handed out and refills it when
//! loading stock.

use crate::core::traits::MoneyDeposit;
use crate::types::{AtmError, Banknote, Currency, Withdrawal};
use dashmap::DashMap;
use std::collections::HashMap;

/// Per-denomination note counts for one currency
#[derive(Debug)]
pub struct InMemoryMoneyDeposit {
    currency: Currency,
    counts: DashMap<Banknote, u32>,
}

impl InMemoryMoneyDeposit {
    /// Create an empty deposit
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            counts: DashMap::new(),
        }
    }

    /// Create a deposit pre-loaded with `stock`
    ///
    /// # Errors
    ///
    /// Returns `UnknownDenomination` if a note is not of `currency`.
    pub fn with_stock<I>(currency: Currency, stock: I) -> Result<Self, AtmError>
    where
        I: IntoIterator<Item = (Banknote, u32)>,
    {
        let deposit = Self::new(currency);
        for (banknote, count) in stock {
            deposit.load(banknote, count)?;
        }
        Ok(deposit)
    }

    /// Add `count` notes of `banknote`
    ///
    /// Counts saturate at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDenomination` if the note is of another currency.
    pub fn load(&self, banknote: Banknote, count: u32) -> Result<(), AtmError> {
        if banknote.currency() != self.currency {
            return Err(AtmError::UnknownDenomination {
                currency: self.currency,
                value: banknote.value(),
            });
        }

        let mut entry = self.counts.entry(banknote).or_insert(0);
        *entry = entry.saturating_add(count);
        Ok(())
    }

    /// Remove the notes of a completed withdrawal
    ///
    /// All-or-nothing: if any denomination is short, no count changes.
    ///
    /// # Errors
    ///
    /// Returns `StockShortage` naming the first denomination that is short.
    pub fn dispense(&self, withdrawal: &Withdrawal) -> Result<(), AtmError> {
        let mut needed: HashMap<Banknote, u32> = HashMap::new();
        for &banknote in withdrawal.banknotes() {
            *needed.entry(banknote).or_default() += 1;
        }

        // Check every denomination before touching any count
        for banknote in Banknote::catalog(self.currency) {
            if let Some(&requested) = needed.get(banknote) {
                let available = self.available_count_of(*banknote);
                if available < requested {
                    return Err(AtmError::stock_shortage(*banknote, available, requested));
                }
            }
        }
        if let Some(foreign) = needed.keys().find(|note| note.currency() != self.currency) {
            return Err(AtmError::stock_shortage(*foreign, 0, needed[foreign]));
        }

        for (banknote, requested) in needed {
            if let Some(mut count) = self.counts.get_mut(&banknote) {
                *count -= requested;
            }
        }
        Ok(())
    }

    /// Snapshot of the stock in catalog order, empty denominations included
    pub fn stock(&self) -> Vec<(Banknote, u32)> {
        Banknote::catalog(self.currency)
            .iter()
            .map(|&banknote| (banknote, self.available_count_of(banknote)))
            .collect()
    }

    /// Total face value of all notes in the deposit
    pub fn total_value(&self) -> u64 {
        self.counts
            .iter()
            .map(|entry| u64::from(entry.key().value()) * u64::from(*entry.value()))
            .sum()
    }
}

impl MoneyDeposit for InMemoryMoneyDeposit {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn available_count_of(&self, banknote: Banknote) -> u32 {
        self.counts.get(&banknote).map(|count| *count).unwrap_or(0)
    }
}
