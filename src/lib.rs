//! Rust ATM Engine Library
//! # Overview
//!
//! This library provides the withdrawal core of a cash machine and a CSV-driven
//! simulator running a fleet of such machines against one bank, with both a
//! sync and an async processing strategy.
//!
//! # Architecture
//!
//! - [`types`] - Value types (Money, Card, PinCode, Banknote, Withdrawal) and errors
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::machine`] - The `Atm` and its withdrawal procedure
//!   - [`core::dispenser`] - Greedy banknote selection
//!   - [`core::traits`] - The `Bank` and `MoneyDeposit` collaborators
//!   - [`core::bank`] / [`core::deposit`] - In-memory collaborators
//!   - [`core::engine`] - Fleet of machines serving requests
//! - [`io`] - CSV input and output
//! - [`strategy`] - Pluggable processing pipelines
//!
//! # Withdrawal Procedure
//!
//! A withdrawal runs four steps and stops at the first failure:
//!
//! - **Currency check**: the requested currency must match the machine and its deposit
//! - **Authorization**: the bank verifies card and PIN and issues a token
//! - **Banknote selection**: largest notes first, limited by the deposit's stock
//! - **Charge**: the bank debits the account, skipped when nothing is dispensed
//!
//! The core never changes the deposit; removing dispensed notes is the job of
//! whatever drives the machine (here [`WithdrawalEngine`]).

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Atm, Bank, InMemoryBank, InMemoryMoneyDeposit, MoneyDeposit, WithdrawalEngine};
pub use io::write_outcomes_csv;
pub use types::{
    AtmError, Banknote, Card, Currency, ErrorCode, Money, PinCode, Withdrawal, WithdrawalRequest,
};
