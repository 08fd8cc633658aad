//! Error types for the ATM engine
//!
//! This module defines the errors raised by the withdrawal procedure and by the
//! bank it talks to. Errors are descriptive enough to be printed straight to the
//! operator's log.
//!
//! # Error Categories
//!
//! - **Operation failures**: wrong currency, rejected authorization, an amount
//!   that cannot be dispensed. These carry an [`ErrorCode`] sub-code.
//! - **Account failures**: raised by the bank while charging and propagated
//!   unchanged.
//! - **Value errors**: malformed PINs, card numbers, currencies, denominations.
//! - **Simulator errors**: unknown machines, stock shortages while dispensing.

use super::banknote::Banknote;
use super::money::Currency;
use super::withdrawal::MachineId;
use std::fmt;
use thiserror::Error;

/// Sub-code of a failed withdrawal operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Requested currency differs from the machine's or deposit's currency
    WrongCurrency,
    /// The bank rejected the PIN/card pair
    Authorization,
    /// The amount cannot be assembled from the available banknotes
    WrongAmount,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::WrongCurrency => "wrong_currency",
            ErrorCode::Authorization => "authorization",
            ErrorCode::WrongAmount => "wrong_amount",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised by the bank when a PIN/card pair is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// No account is bound to the card
    #[error("unknown card {card}")]
    UnknownCard {
        /// Masked card number
        card: String,
    },

    /// The PIN does not match the card
    #[error("invalid PIN for card {card}")]
    InvalidPin {
        /// Masked card number
        card: String,
    },
}

/// Raised by the bank when an authorized charge cannot be completed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The token was never issued or has already been used
    #[error("Invalid or already used authorization token")]
    InvalidToken,

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        available: u64,
        requested: u64,
    },

    #[error("Account held in {account} cannot be charged in {requested}")]
    CurrencyMismatch {
        account: Currency,
        requested: Currency,
    },
}

/// Main error type for the ATM engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Requested currency is not the one the machine dispenses
    ///
    /// Detected before the bank is contacted.
    #[error("Wrong currency: requested {requested}, machine operates in {machine} with a {deposit} deposit")]
    WrongCurrency {
        requested: Currency,
        machine: Currency,
        deposit: Currency,
    },

    /// The bank rejected the credentials
    ///
    /// No money moves after this error.
    #[error("Authorization failed for card {card}: {source}")]
    Authorization {
        /// Masked card number
        card: String,
        source: AuthorizationError,
    },

    /// The amount cannot be assembled exactly from the notes in stock
    ///
    /// No charge is made.
    #[error("Amount {amount} {currency} cannot be dispensed from available banknotes ({remaining} left over)")]
    WrongAmount {
        amount: u64,
        currency: Currency,
        /// What the greedy pass could not cover
        remaining: u64,
    },

    /// Charge failure from the bank, passed through untouched
    #[error(transparent)]
    Account(#[from] AccountError),

    /// A withdrawal was attempted before a deposit was attached
    #[error("No money deposit attached to the machine")]
    DepositNotAttached,

    #[error("PIN must be exactly four digits 0-9")]
    InvalidPin,

    #[error("Invalid card number '{number}'")]
    InvalidCardNumber { number: String },

    #[error("Invalid currency code '{code}'")]
    InvalidCurrency { code: String },

    #[error("No {currency} banknote with face value {value}")]
    UnknownDenomination { currency: Currency, value: u32 },

    #[error("Machine {atm} is not registered")]
    UnknownMachine { atm: MachineId },

    /// The deposit holds fewer notes than a dispense asked for
    #[error("Stock shortage of {banknote}: available {available}, requested {requested}")]
    StockShortage {
        banknote: Banknote,
        available: u32,
        requested: u32,
    },
}

impl AtmError {
    /// Sub-code for the operation failures of a withdrawal
    ///
    /// Account failures and everything outside the withdrawal procedure have
    /// no sub-code.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AtmError::WrongCurrency { .. } => Some(ErrorCode::WrongCurrency),
            AtmError::Authorization { .. } => Some(ErrorCode::Authorization),
            AtmError::WrongAmount { .. } => Some(ErrorCode::WrongAmount),
            _ => None,
        }
    }

    /// Create a WrongCurrency error
    pub fn wrong_currency(requested: Currency, machine: Currency, deposit: Currency) -> Self {
        AtmError::WrongCurrency {
            requested,
            machine,
            deposit,
        }
    }

    /// Create an Authorization error
    pub fn authorization(card: &str, source: AuthorizationError) -> Self {
        AtmError::Authorization {
            card: card.to_string(),
            source,
        }
    }

    /// Create a WrongAmount error
    pub fn wrong_amount(amount: u64, currency: Currency, remaining: u64) -> Self {
        AtmError::WrongAmount {
            amount,
            currency,
            remaining,
        }
    }

    /// Create an InvalidCardNumber error
    ///
    /// Only the last four characters of the input are kept; the rest are
    /// replaced with `*` so the message is safe to log.
    pub fn invalid_card_number(number: &str) -> Self {
        let hidden = number.chars().count().saturating_sub(4);
        let number = number
            .chars()
            .enumerate()
            .map(|(i, c)| if i < hidden { '*' } else { c })
            .collect();
        AtmError::InvalidCardNumber { number }
    }

    /// Create an InvalidCurrency error
    pub fn invalid_currency(code: &str) -> Self {
        AtmError::InvalidCurrency {
            code: code.to_string(),
        }
    }

    /// Create a StockShortage error
    pub fn stock_shortage(banknote: Banknote, available: u32, requested: u32) -> Self {
        AtmError::StockShortage {
            banknote,
            available,
            requested,
        }
    }
}
