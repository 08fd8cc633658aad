//! Types module
//!
//! Contains the value objects used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Currency codes and money amounts
//! - `card`: Card and PIN credentials
//! - `banknote`: Banknote denominations and per-currency catalogs
//! - `withdrawal`: Withdrawal results, bank tokens, simulator records
//! - `error`: Error types for the ATM engine

pub mod banknote;
pub mod card;
pub mod error;
pub mod money;
pub mod withdrawal;

pub use banknote::Banknote;
pub use card::{Card, PinCode};
pub use error::{AccountError, AtmError, AuthorizationError, ErrorCode};
pub use money::{Currency, Money};
pub use withdrawal::{
    AuthorizationToken, MachineId, RequestId, Withdrawal, WithdrawalOutcome, WithdrawalRequest,
};
