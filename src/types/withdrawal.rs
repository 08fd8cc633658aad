//! Withdrawal-related types for the ATM engine
//!
//! This module defines the result of a withdrawal, the opaque bank token, and
//! the request/outcome records the simulator moves through its pipeline.

use super::banknote::Banknote;
use super::card::{Card, PinCode};
use super::error::AtmError;
use super::money::Money;

/// Machine identifier
///
/// Supports machine IDs from 0 to 65,535
pub type MachineId = u16;

/// Request identifier
///
/// Supports request IDs from 0 to 4,294,967,295
pub type RequestId = u32;

/// Opaque token returned by the bank's authorization step
///
/// The machine never inspects it; it is handed back to the bank unchanged
/// when charging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationToken(String);

impl AuthorizationToken {
    pub fn new(value: impl Into<String>) -> Self {
        AuthorizationToken(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The banknotes handed out by a successful withdrawal
///
/// Notes are in dispensing order, highest denomination first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Withdrawal {
    banknotes: Vec<Banknote>,
}

impl Withdrawal {
    pub fn new(banknotes: Vec<Banknote>) -> Self {
        Withdrawal { banknotes }
    }

    /// A withdrawal that dispenses nothing
    pub fn empty() -> Self {
        Withdrawal::default()
    }

    pub fn banknotes(&self) -> &[Banknote] {
        &self.banknotes
    }

    /// Sum of the face values of all notes
    pub fn total(&self) -> u64 {
        self.banknotes
            .iter()
            .map(|note| u64::from(note.value()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.banknotes.is_empty()
    }
}

/// A withdrawal request as read by the simulator
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalRequest {
    /// The machine the customer is standing at
    pub atm: MachineId,

    /// Unique request identifier, used to order the output
    pub request: RequestId,

    pub card: Card,

    pub pin: PinCode,

    /// Requested amount
    ///
    /// `Money::ZERO` when the request carried no currency.
    pub amount: Money,
}

/// The outcome of processing one request
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalOutcome {
    pub request: RequestId,
    pub atm: MachineId,
    pub amount: Money,
    pub result: Result<Withdrawal, AtmError>,
}

impl WithdrawalOutcome {
    pub fn new(request: &WithdrawalRequest, result: Result<Withdrawal, AtmError>) -> Self {
        WithdrawalOutcome {
            request: request.request,
            atm: request.atm,
            amount: request.amount,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_total_sums_face_values() {
        let withdrawal = Withdrawal::new(vec![Banknote::Pl500, Banknote::Pl50, Banknote::Pl10]);
        assert_eq!(withdrawal.total(), 560);
        assert!(!withdrawal.is_empty());
    }

    #[test]
    fn test_empty_withdrawal() {
        let withdrawal = Withdrawal::empty();
        assert!(withdrawal.is_empty());
        assert_eq!(withdrawal.total(), 0);
        assert_eq!(withdrawal.banknotes(), &[] as &[Banknote]);
    }

    #[test]
    fn test_token_passes_value_through() {
        let token = AuthorizationToken::new("SAMPLE AUTH TOKEN");
        assert_eq!(token.as_str(), "SAMPLE AUTH TOKEN");
        assert_eq!(token, AuthorizationToken::new("SAMPLE AUTH TOKEN"));
    }
}
