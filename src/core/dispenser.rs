//! Banknote selection
//!
//! Turns a requested amount into the exact sequence of notes to dispense,
//! given how many notes of each denomination the deposit holds.
//!
//! # Algorithm
//!
//! Denominations are visited from the highest face value down. For each one
//! the planner takes as many notes as both the stock and the remaining amount
//! allow, then moves on with whatever is left. Once nothing is left the pass
//! stops, so each denomination is looked up at most once and the smaller ones
//! may not be looked up at all. If anything remains after the smallest note,
//! the amount is not dispensable.
//!
//! The pass never backtracks. Stock-limited amounts that could only be paid
//! with a non-greedy mix of notes (e.g. 60 from {50:1, 20:3}) are rejected.

use crate::core::traits::MoneyDeposit;
use crate::types::{AtmError, Banknote, Currency};

/// Plan the notes for `amount` in `currency`
///
/// A zero amount yields an empty plan without consulting the deposit.
///
/// # Arguments
///
/// * `amount` - Requested amount in whole units
/// * `currency` - Currency the amount and the notes are in
/// * `catalog` - Denominations to draw from, strictly descending face value
/// * `deposit` - Stock to read available counts from (queried at most once per denomination)
///
/// # Returns
///
/// * `Ok(Vec<Banknote>)` - Notes summing exactly to `amount`, highest first
/// * `Err(AtmError::WrongAmount)` - The greedy pass could not reach `amount`
pub fn plan_banknotes<D>(
    amount: u64,
    currency: Currency,
    catalog: &[Banknote],
    deposit: &D,
) -> Result<Vec<Banknote>, AtmError>
where
    D: MoneyDeposit + ?Sized,
{
    if amount == 0 {
        return Ok(Vec::new());
    }

    let mut remaining = amount;
    let mut banknotes = Vec::new();

    for &banknote in catalog {
        if remaining == 0 {
            break;
        }

        let value = u64::from(banknote.value());
        let available = u64::from(deposit.available_count_of(banknote));
        let taken = available.min(remaining / value);

        if taken > 0 {
            // taken <= available, which came from a u32
            banknotes.extend(std::iter::repeat_n(banknote, taken as usize));
            remaining -= taken * value;
        }
    }

    if remaining != 0 {
        return Err(AtmError::wrong_amount(amount, currency, remaining));
    }

    Ok(banknotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Deposit with fixed counts that records every lookup
    struct FixedStock {
        counts: HashMap<Banknote, u32>,
        lookups: RefCell<Vec<Banknote>>,
    }

    impl FixedStock {
        fn new(counts: &[(Banknote, u32)]) -> Self {
            Self {
                counts: counts.iter().copied().collect(),
                lookups: RefCell::new(Vec::new()),
            }
        }
    }

    impl MoneyDeposit for FixedStock {
        fn currency(&self) -> Currency {
            Currency::PLN
        }

        fn available_count_of(&self, banknote: Banknote) -> u32 {
            self.lookups.borrow_mut().push(banknote);
            self.counts.get(&banknote).copied().unwrap_or(0)
        }
    }

    fn plan(amount: u64, stock: &FixedStock) -> Result<Vec<Banknote>, AtmError> {
        plan_banknotes(amount, Currency::PLN, Banknote::catalog(Currency::PLN), stock)
    }

    #[test]
    fn test_plan_mixed_stock() {
        use Banknote::*;
        let stock = FixedStock::new(&[
            (Pl500, 1),
            (Pl200, 2),
            (Pl100, 0),
            (Pl50, 3),
            (Pl20, 1),
            (Pl10, 1),
        ]);

        let notes = plan(1080, &stock).unwrap();
        assert_eq!(notes, vec![Pl500, Pl200, Pl200, Pl50, Pl50, Pl50, Pl20, Pl10]);
    }

    #[test]
    fn test_plan_unreachable_remainder() {
        let stock = FixedStock::new(&[(Banknote::Pl100, 1), (Banknote::Pl20, 1)]);

        let result = plan(123, &stock);
        assert_eq!(result, Err(AtmError::wrong_amount(123, Currency::PLN, 3)));
    }

    #[rstest]
    #[case::single_large(500, &[(Banknote::Pl500, 1)], vec![Banknote::Pl500])]
    #[case::single_small(10, &[(Banknote::Pl10, 4), (Banknote::Pl500, 2)], vec![Banknote::Pl10])]
    #[case::skips_exhausted(400, &[(Banknote::Pl500, 3), (Banknote::Pl200, 2)], vec![Banknote::Pl200, Banknote::Pl200])]
    #[case::falls_back_to_smaller(100, &[(Banknote::Pl100, 0), (Banknote::Pl50, 2)], vec![Banknote::Pl50, Banknote::Pl50])]
    fn test_plan_cases(
        #[case] amount: u64,
        #[case] counts: &[(Banknote, u32)],
        #[case] expected: Vec<Banknote>,
    ) {
        let stock = FixedStock::new(counts);
        let notes = plan(amount, &stock).unwrap();
        assert_eq!(notes, expected);
        let total: u64 = notes.iter().map(|n| u64::from(n.value())).sum();
        assert_eq!(total, amount);
    }

    #[test]
    fn test_plan_does_not_backtrack() {
        // 60 = 20 + 20 + 20, but greedy takes the 50 first and is left with 10
        let stock = FixedStock::new(&[(Banknote::Pl50, 1), (Banknote::Pl20, 3)]);

        let result = plan(60, &stock);
        assert_eq!(result, Err(AtmError::wrong_amount(60, Currency::PLN, 10)));
    }

    #[test]
    fn test_plan_amount_not_multiple_of_smallest_note() {
        let stock = FixedStock::new(&[(Banknote::Pl10, 100)]);
        assert!(matches!(plan(15, &stock), Err(AtmError::WrongAmount { remaining: 5, .. })));
    }

    #[test]
    fn test_plan_zero_does_not_touch_deposit() {
        let stock = FixedStock::new(&[(Banknote::Pl100, 5)]);

        let notes = plan(0, &stock).unwrap();
        assert!(notes.is_empty());
        assert!(stock.lookups.borrow().is_empty());
    }

    #[test]
    fn test_plan_queries_each_denomination_at_most_once() {
        let stock = FixedStock::new(&[(Banknote::Pl10, 100)]);

        plan(990, &stock).unwrap();
        let lookups = stock.lookups.borrow();
        assert_eq!(lookups.as_slice(), Banknote::catalog(Currency::PLN));
    }

    #[test]
    fn test_plan_stops_querying_once_amount_is_reached() {
        use Banknote::*;
        let stock = FixedStock::new(&[(Pl500, 1), (Pl200, 2), (Pl50, 1)]);

        assert_eq!(plan(700, &stock).unwrap(), vec![Pl500, Pl200]);
        let lookups = stock.lookups.borrow();
        assert_eq!(lookups.as_slice(), &[Pl500, Pl200]);
    }

    #[test]
    fn test_plan_empty_catalog() {
        let stock = FixedStock::new(&[]);
        let result = plan_banknotes(100, Currency::USD, &[], &stock);
        assert_eq!(result, Err(AtmError::wrong_amount(100, Currency::USD, 100)));
    }

    #[test]
    fn test_plan_is_deterministic() {
        use Banknote::*;
        let stock = FixedStock::new(&[(Pl200, 3), (Pl50, 4), (Pl20, 5), (Pl10, 2)]);

        let first = plan(690, &stock).unwrap();
        let second = plan(690, &stock).unwrap();
        assert_eq!(first, second);
    }
}
