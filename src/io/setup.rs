//! Loading the simulated fleet from CSV files
//!
//! Builds a [`WithdrawalEngine`] from a stock file (one deposit per machine)
//! and an accounts file (the bank's customers). Unreadable files are fatal;
//! malformed rows are logged and skipped.

use crate::core::{FleetEngine, InMemoryBank, InMemoryMoneyDeposit, WithdrawalEngine};
use crate::io::csv_format::{
    convert_account_record, convert_stock_record, CsvAccountRecord, CsvStockRecord,
};
use crate::types::{Currency, MachineId};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Where the simulator reads its fleet from
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Operating currency of every machine
    pub currency: Currency,
    /// Stock file: `atm,denomination,count`
    pub stock_path: PathBuf,
    /// Accounts file: `card,pin,balance,currency`
    pub accounts_path: PathBuf,
}

/// Read every row of `path`, skipping rows that fail to deserialize
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!(
                file = %path.display(),
                line = index + 2,
                error = %e,
                "Skipping malformed row"
            ),
        }
    }
    Ok(rows)
}

/// Load one deposit per machine from a stock file
///
/// Rows for the same machine and denomination accumulate.
pub fn load_stock(
    path: &Path,
    currency: Currency,
) -> Result<BTreeMap<MachineId, InMemoryMoneyDeposit>, String> {
    let mut deposits: BTreeMap<MachineId, InMemoryMoneyDeposit> = BTreeMap::new();

    for record in read_rows::<CsvStockRecord>(path)? {
        let banknote = match convert_stock_record(&record, currency) {
            Ok(banknote) => banknote,
            Err(e) => {
                warn!(error = %e, "Skipping stock row");
                continue;
            }
        };

        let deposit = deposits
            .entry(record.atm)
            .or_insert_with(|| InMemoryMoneyDeposit::new(currency));
        deposit
            .load(banknote, record.count)
            .map_err(|e| format!("Machine {}: {}", record.atm, e))?;
    }

    Ok(deposits)
}

/// Open every account of an accounts file in `bank`
///
/// # Returns
///
/// The number of accounts opened.
pub fn load_accounts(path: &Path, bank: &InMemoryBank) -> Result<usize, String> {
    let mut opened = 0;

    for record in read_rows::<CsvAccountRecord>(path)? {
        match convert_account_record(record) {
            Ok(entry) => {
                bank.open_account(&entry.card, entry.pin, entry.balance, entry.currency);
                opened += 1;
            }
            Err(e) => warn!(error = %e, "Skipping account row"),
        }
    }

    Ok(opened)
}

/// Build the fleet described by `config`
///
/// Every machine found in the stock file is connected to one shared bank.
pub fn build_engine(config: &SimulationConfig) -> Result<FleetEngine, String> {
    let bank = Arc::new(InMemoryBank::new());
    let accounts = load_accounts(&config.accounts_path, &bank)?;
    let deposits = load_stock(&config.stock_path, config.currency)?;

    info!(
        machines = deposits.len(),
        accounts,
        currency = %config.currency,
        "Fleet loaded"
    );

    let engine = WithdrawalEngine::new(config.currency);
    for (atm, deposit) in deposits {
        engine.add_machine(atm, Arc::clone(&bank), deposit);
    }

    Ok(engine)
}
