//! Withdrawal processing engine
//!
//! This module provides the `WithdrawalEngine`, which runs a fleet of machines
//! sharing one bank. It is the component around the machines that routes each
//! request to its machine, serializes requests per machine, and removes the
//! dispensed notes from the machine's deposit once a withdrawal succeeds.
//!
//! The engine is `Sync` whenever its bank is, so the same instance serves the
//! synchronous strategy and the concurrent batch processor.

use crate::core::bank::InMemoryBank;
use crate::core::deposit::InMemoryMoneyDeposit;
use crate::core::machine::Atm;
use crate::core::traits::Bank;
use crate::types::{AtmError, Banknote, Currency, MachineId, Withdrawal, WithdrawalRequest};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

/// Engine wired to the simulator's shared in-memory bank
pub type FleetEngine = WithdrawalEngine<Arc<InMemoryBank>>;

/// A machine together with the deposit it dispenses from
struct Station<B> {
    atm: Atm<B, Arc<InMemoryMoneyDeposit>>,
    deposit: Arc<InMemoryMoneyDeposit>,
}

/// Withdrawal processing engine
///
/// Routes requests to machines and keeps their deposits in step with what
/// they hand out.
pub struct WithdrawalEngine<B> {
    currency: Currency,
    machines: DashMap<MachineId, Arc<Mutex<Station<B>>>>,
}

impl<B: Bank> WithdrawalEngine<B> {
    /// Create an engine whose machines all operate in `currency`
    pub fn new(currency: Currency) -> Self {
        WithdrawalEngine {
            currency,
            machines: DashMap::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Register a machine connected to `bank` and dispensing from `deposit`
    ///
    /// Registering an existing id replaces that machine.
    pub fn add_machine(&self, atm: MachineId, bank: B, deposit: InMemoryMoneyDeposit) {
        let deposit = Arc::new(deposit);
        let mut machine = Atm::new(bank, self.currency);
        machine.set_deposit(Arc::clone(&deposit));

        self.machines.insert(
            atm,
            Arc::new(Mutex::new(Station {
                atm: machine,
                deposit,
            })),
        );
    }

    /// Station registered under `atm`, cloned out so no map lock is held
    fn station(&self, atm: MachineId) -> Option<Arc<Mutex<Station<B>>>> {
        self.machines.get(&atm).map(|entry| Arc::clone(entry.value()))
    }

    /// Process a single withdrawal request
    ///
    /// The machine's own lock is held for the whole call, so requests for the
    /// same machine never overlap while other machines proceed independently.
    ///
    /// # Errors
    ///
    /// * `UnknownMachine` if no machine is registered under `request.atm`
    /// * any error of [`Atm::withdraw`]
    /// * `StockShortage` if the deposit changed between planning and dispensing
    pub fn process(&self, request: &WithdrawalRequest) -> Result<Withdrawal, AtmError> {
        let station = self
            .station(request.atm)
            .ok_or(AtmError::UnknownMachine { atm: request.atm })?;
        let station = lock(&station);

        debug!(atm = request.atm, request = request.request, "Processing request");

        let withdrawal = station
            .atm
            .withdraw(&request.pin, &request.card, &request.amount)?;

        // The account is already charged at this point
        station.deposit.dispense(&withdrawal).inspect_err(|e| {
            error!(
                atm = request.atm,
                request = request.request,
                error = %e,
                "Charged withdrawal could not be dispensed"
            )
        })?;

        Ok(withdrawal)
    }

    /// Stock of a machine's deposit, in catalog order
    pub fn stock_of(&self, atm: MachineId) -> Option<Vec<(Banknote, u32)>> {
        let station = self.station(atm)?;
        let stock = lock(&station).deposit.stock();
        Some(stock)
    }

    /// Registered machine ids in ascending order
    pub fn machine_ids(&self) -> Vec<MachineId> {
        let mut ids: Vec<MachineId> = self.machines.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }
}

/// A panic inside a withdrawal leaves the deposit untouched, so a poisoned
/// station is still usable
fn lock<B>(station: &Mutex<Station<B>>) -> MutexGuard<'_, Station<B>> {
    station.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountError, Card, Money, PinCode};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use Banknote::*;

    const CARD: &str = "1111222233334444";

    fn engine_with_bank(balance: u64) -> (FleetEngine, Arc<InMemoryBank>) {
        let bank = Arc::new(InMemoryBank::new());
        bank.open_account(
            &Card::new(CARD).unwrap(),
            PinCode::new([1, 2, 3, 4]).unwrap(),
            balance,
            Currency::PLN,
        );

        let engine = WithdrawalEngine::new(Currency::PLN);
        let deposit =
            InMemoryMoneyDeposit::with_stock(Currency::PLN, [(Pl100, 2), (Pl50, 1)]).unwrap();
        engine.add_machine(1, Arc::clone(&bank), deposit);
        (engine, bank)
    }

    fn request(atm: MachineId, id: u32, amount: Money) -> WithdrawalRequest {
        WithdrawalRequest {
            atm,
            request: id,
            card: Card::new(CARD).unwrap(),
            pin: PinCode::new([1, 2, 3, 4]).unwrap(),
            amount,
        }
    }

    #[test]
    fn test_process_dispenses_from_deposit() {
        let (engine, bank) = engine_with_bank(1000);

        let withdrawal = engine
            .process(&request(1, 1, Money::new(150, Currency::PLN)))
            .unwrap();

        assert_eq!(withdrawal.banknotes(), &[Pl100, Pl50]);
        assert_eq!(
            engine.stock_of(1).unwrap(),
            vec![(Pl500, 0), (Pl200, 0), (Pl100, 1), (Pl50, 0), (Pl20, 0), (Pl10, 0)]
        );
        assert_eq!(bank.balance_of(&Card::new(CARD).unwrap()), Some(850));
    }

    #[test]
    fn test_stock_depletes_across_requests() {
        let (engine, _bank) = engine_with_bank(1000);

        engine
            .process(&request(1, 1, Money::new(200, Currency::PLN)))
            .unwrap();
        let second = engine.process(&request(1, 2, Money::new(100, Currency::PLN)));

        assert!(matches!(second, Err(AtmError::WrongAmount { .. })));
    }

    #[test]
    fn test_unknown_machine() {
        let (engine, _bank) = engine_with_bank(1000);

        let result = engine.process(&request(9, 1, Money::new(100, Currency::PLN)));

        assert_eq!(result, Err(AtmError::UnknownMachine { atm: 9 }));
    }

    #[test]
    fn test_failed_charge_keeps_stock() {
        let (engine, _bank) = engine_with_bank(50);

        let result = engine.process(&request(1, 1, Money::new(100, Currency::PLN)));

        assert_eq!(
            result,
            Err(AtmError::Account(AccountError::InsufficientBalance {
                available: 50,
                requested: 100
            }))
        );
        assert_eq!(engine.stock_of(1).unwrap()[2], (Pl100, 2));
    }

    #[test]
    fn test_machine_ids_sorted() {
        let (engine, bank) = engine_with_bank(0);
        engine.add_machine(7, Arc::clone(&bank), InMemoryMoneyDeposit::new(Currency::PLN));
        engine.add_machine(3, Arc::clone(&bank), InMemoryMoneyDeposit::new(Currency::PLN));

        assert_eq!(engine.machine_ids(), vec![1, 3, 7]);
    }

    #[test]
    fn test_busy_machine_does_not_block_others() {
        let (engine, bank) = engine_with_bank(1000);
        let deposit = InMemoryMoneyDeposit::with_stock(Currency::PLN, [(Pl100, 1)]).unwrap();
        engine.add_machine(2, Arc::clone(&bank), deposit);

        let busy = engine.station(1).unwrap();
        let guard = lock(&busy);

        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            scope.spawn(|| {
                let _ = tx.send(engine.process(&request(2, 1, Money::new(100, Currency::PLN))));
            });
            let result = rx.recv_timeout(Duration::from_secs(5));
            drop(guard);

            let withdrawal = result.expect("machine 2 waited on machine 1").unwrap();
            assert_eq!(withdrawal.banknotes(), &[Pl100]);
        });
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FleetEngine>();
    }
}
