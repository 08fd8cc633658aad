//! The automated teller machine
//!
//! [`Atm`] runs one withdrawal at a time through these steps:
//!
//! ```text
//! START → currency validated → authorized → notes planned → charged → DONE
//!              │                   │              │
//!              └── WrongCurrency   └── Authorization └── WrongAmount
//! ```
//!
//! A failure at any step ends the call; nothing later in the chain runs, so a
//! rejected withdrawal never charges the account and never hands out notes.
//! A token that is not charged (zero amount, undispensable amount) is released
//! back to the bank.
//! The machine keeps no state between calls besides its bank, its operating
//! currency and the attached deposit.

use crate::core::dispenser::plan_banknotes;
use crate::core::traits::{Bank, MoneyDeposit};
use crate::types::{AtmError, Banknote, Card, Currency, Money, PinCode, Withdrawal};
use tracing::{debug, info, warn};

/// An ATM bound to one bank connection and one operating currency
pub struct Atm<B, D> {
    bank: B,
    currency: Currency,
    deposit: Option<D>,
}

impl<B: Bank, D: MoneyDeposit> Atm<B, D> {
    /// Create a machine with no deposit attached yet
    pub fn new(bank: B, currency: Currency) -> Self {
        Atm {
            bank,
            currency,
            deposit: None,
        }
    }

    /// Attach the money deposit the machine dispenses from
    ///
    /// Must be called before the first withdrawal. Replaces any previously
    /// attached deposit.
    pub fn set_deposit(&mut self, deposit: D) {
        self.deposit = Some(deposit);
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn deposit(&self) -> Option<&D> {
        self.deposit.as_ref()
    }

    /// Withdraw `amount` using the given credentials
    ///
    /// # Arguments
    ///
    /// * `pin` - PIN entered by the customer
    /// * `card` - Card inserted by the customer
    /// * `amount` - Requested amount; `Money::ZERO` is authorized but never charged
    ///
    /// # Returns
    ///
    /// The notes to hand out, highest denomination first.
    ///
    /// # Errors
    ///
    /// * `WrongCurrency` - `amount` is not in the machine's or deposit's currency
    /// * `Authorization` - the bank rejected the PIN/card pair
    /// * `WrongAmount` - the notes in stock cannot add up to `amount`
    /// * `Account` - the bank could not charge the account (passed through as is)
    /// * `DepositNotAttached` - `set_deposit` was never called
    pub fn withdraw(
        &self,
        pin: &PinCode,
        card: &Card,
        amount: &Money,
    ) -> Result<Withdrawal, AtmError> {
        let deposit = self.deposit.as_ref().ok_or(AtmError::DepositNotAttached)?;

        self.validate_currency(amount, deposit)?;
        debug!(card = %card, amount = %amount, "Currency validated");

        let token = self
            .bank
            .authorize(pin.digits(), card.number())
            .map_err(|source| {
                warn!(card = %card, error = %source, "Authorization rejected");
                AtmError::authorization(&card.masked(), source)
            })?;
        debug!(card = %card, "Authorized");

        let banknotes = plan_banknotes(
            amount.amount(),
            self.currency,
            Banknote::catalog(self.currency),
            deposit,
        )
        .inspect_err(|e| {
            warn!(card = %card, error = %e, "Amount not dispensable");
            self.bank.release(&token);
        })?;

        if banknotes.is_empty() {
            debug!(card = %card, "Nothing to dispense, skipping charge");
            self.bank.release(&token);
            return Ok(Withdrawal::empty());
        }

        self.bank.charge(&token, amount)?;

        let withdrawal = Withdrawal::new(banknotes);
        info!(
            card = %card,
            amount = %amount,
            notes = withdrawal.banknotes().len(),
            "Withdrawal completed"
        );
        Ok(withdrawal)
    }

    /// Reject amounts in a currency other than the machine's or the deposit's
    fn validate_currency(&self, amount: &Money, deposit: &D) -> Result<(), AtmError> {
        let deposit_currency = deposit.currency();

        match amount.currency() {
            Some(requested) if requested != self.currency || requested != deposit_currency => {
                warn!(
                    requested = %requested,
                    machine = %self.currency,
                    deposit = %deposit_currency,
                    "Currency mismatch"
                );
                Err(AtmError::wrong_currency(
                    requested,
                    self.currency,
                    deposit_currency,
                ))
            }
            _ => Ok(()),
        }
    }
}
