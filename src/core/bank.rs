//! Thread-safe in-memory bank
//!
//! This module provides the `InMemoryBank` the simulator connects its machines
//! to. Accounts and issued tokens live in `DashMap`s, so one bank can be shared
//! by every machine of a fleet, including machines processed on different
//! worker threads.
//!
//! # Tokens
//!
//! Every successful authorization issues a fresh token bound to the card.
//! Tokens are single-use: a charge consumes its token whether or not the charge
//! succeeds, and a release drops it without touching the account. A machine
//! ends every authorization with one of the two, so the number of outstanding
//! tokens is bounded by the withdrawals in flight.

use crate::core::traits::Bank;
use crate::types::{
    AccountError, AuthorizationError, AuthorizationToken, Card, Currency, Money, PinCode,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// One customer account
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    pub pin: PinCode,
    pub balance: u64,
    pub currency: Currency,
}

/// In-memory bank backing the simulator
#[derive(Debug, Default)]
pub struct InMemoryBank {
    /// Accounts keyed by card number
    accounts: DashMap<String, BankAccount>,

    /// Outstanding tokens mapped to the card they were issued for
    tokens: DashMap<String, String>,

    next_token: AtomicU64,
}

impl InMemoryBank {
    /// Create a bank with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or replace) the account bound to `card`
    pub fn open_account(&self, card: &Card, pin: PinCode, balance: u64, currency: Currency) {
        self.accounts.insert(
            card.number().to_string(),
            BankAccount {
                pin,
                balance,
                currency,
            },
        );
    }

    /// Current balance of the account bound to `card`
    pub fn balance_of(&self, card: &Card) -> Option<u64> {
        self.accounts
            .get(card.number())
            .map(|account| account.balance)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Tokens issued but neither charged nor released yet
    pub fn outstanding_tokens(&self) -> usize {
        self.tokens.len()
    }

    fn issue_token(&self, card_number: &str) -> AuthorizationToken {
        let serial = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let token = AuthorizationToken::new(format!("auth-{serial}"));
        self.tokens
            .insert(token.as_str().to_string(), card_number.to_string());
        token
    }
}

impl Bank for InMemoryBank {
    fn authorize(
        &self,
        pin: &[u8; 4],
        card_number: &str,
    ) -> Result<AuthorizationToken, AuthorizationError> {
        let masked = mask(card_number);

        let pin_matches = {
            let account = self
                .accounts
                .get(card_number)
                .ok_or_else(|| AuthorizationError::UnknownCard {
                    card: masked.clone(),
                })?;
            account.pin.digits() == pin
        };

        if !pin_matches {
            return Err(AuthorizationError::InvalidPin { card: masked });
        }

        let token = self.issue_token(card_number);
        debug!(card = %masked, token = token.as_str(), "Token issued");
        Ok(token)
    }

    fn charge(&self, token: &AuthorizationToken, amount: &Money) -> Result<(), AccountError> {
        let (_, card_number) = self
            .tokens
            .remove(token.as_str())
            .ok_or(AccountError::InvalidToken)?;

        let mut account = self
            .accounts
            .get_mut(&card_number)
            .ok_or(AccountError::InvalidToken)?;

        if let Some(requested) = amount.currency() {
            if requested != account.currency {
                return Err(AccountError::CurrencyMismatch {
                    account: account.currency,
                    requested,
                });
            }
        }

        let requested = amount.amount();
        let available = account.balance;
        account.balance =
            available
                .checked_sub(requested)
                .ok_or(AccountError::InsufficientBalance {
                    available,
                    requested,
                })?;

        debug!(card = %mask(&card_number), amount = %amount, "Account charged");
        Ok(())
    }

    fn release(&self, token: &AuthorizationToken) {
        if self.tokens.remove(token.as_str()).is_some() {
            debug!(token = token.as_str(), "Token released");
        }
    }
}

fn mask(card_number: &str) -> String {
    Card::new(card_number)
        .map(|card| card.masked())
        .unwrap_or_else(|_| "****".to_string())
}
