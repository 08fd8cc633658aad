//! Collaborator traits the withdrawal procedure depends on
//!
//! The machine only ever talks to a bank and to its money deposit through these
//! traits, so the in-memory simulator and test doubles plug in the same way.

use crate::types::{
    AccountError, AuthorizationError, AuthorizationToken, Banknote, Currency, Money,
};
use std::sync::Arc;

/// Trait for the bank a machine is connected to
///
/// Calls are synchronous and may block; the machine makes exactly one
/// `authorize` call and then either one `charge` or one `release` call per
/// withdrawal.
pub trait Bank {
    /// Authorize a PIN/card pair for one operation
    fn authorize(
        &self,
        pin: &[u8; 4],
        card_number: &str,
    ) -> Result<AuthorizationToken, AuthorizationError>;

    /// Charge the authorized account
    fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), AccountError>;

    /// Give back a token that will not be charged
    ///
    /// Banks that keep no per-token state can ignore it.
    fn release(&self, _token: &AuthorizationToken) {}
}

/// Trait for the on-hand stock of banknotes inside a machine
///
/// The machine only reads from it; dispensing and replenishing happen outside
/// the withdrawal procedure.
pub trait MoneyDeposit {
    /// Currency of every note in the deposit
    fn currency(&self) -> Currency;

    /// How many notes of `banknote` are currently available
    fn available_count_of(&self, banknote: Banknote) -> u32;
}

impl<T: Bank + ?Sized> Bank for &T {
    fn authorize(
        &self,
        pin: &[u8; 4],
        card_number: &str,
    ) -> Result<AuthorizationToken, AuthorizationError> {
        (**self).authorize(pin, card_number)
    }

    fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), AccountError> {
        (**self).charge(token, amount)
    }

    fn release(&self, token: &AuthorizationToken) {
        (**self).release(token)
    }
}

impl<T: Bank + ?Sized> Bank for Arc<T> {
    fn authorize(
        &self,
        pin: &[u8; 4],
        card_number: &str,
    ) -> Result<AuthorizationToken, AuthorizationError> {
        (**self).authorize(pin, card_number)
    }

    fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), AccountError> {
        (**self).charge(token, amount)
    }

    fn release(&self, token: &AuthorizationToken) {
        (**self).release(token)
    }
}

impl<T: MoneyDeposit + ?Sized> MoneyDeposit for &T {
    fn currency(&self) -> Currency {
        (**self).currency()
    }

    fn available_count_of(&self, banknote: Banknote) -> u32 {
        (**self).available_count_of(banknote)
    }
}

impl<T: MoneyDeposit + ?Sized> MoneyDeposit for Arc<T> {
    fn currency(&self) -> Currency {
        (**self).currency()
    }

    fn available_count_of(&self, banknote: Banknote) -> u32 {
        (**self).available_count_of(banknote)
    }
}
