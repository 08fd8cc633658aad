//! CSV format handling for simulator input and output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for requests, stock and accounts
//! - Conversion from CSV records to domain types
//! - Outcome serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    AtmError, Banknote, Card, Currency, MachineId, Money, PinCode, RequestId, Withdrawal,
    WithdrawalOutcome, WithdrawalRequest,
};
use serde::Deserialize;
use std::io::Write;

/// Withdrawal request row: `atm,request,card,pin,amount,currency`
///
/// The currency may be empty only when the amount is zero.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRequestRecord {
    pub atm: MachineId,
    pub request: RequestId,
    pub card: String,
    pub pin: String,
    pub amount: u64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Deposit stock row: `atm,denomination,count`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvStockRecord {
    pub atm: MachineId,
    pub denomination: u32,
    pub count: u32,
}

/// Bank account row: `card,pin,balance,currency`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvAccountRecord {
    pub card: String,
    pub pin: String,
    pub balance: u64,
    pub currency: String,
}

/// A validated bank account row
#[derive(Debug, Clone, PartialEq)]
pub struct AccountEntry {
    pub card: Card,
    pub pin: PinCode,
    pub balance: u64,
    pub currency: Currency,
}

/// Convert a request row into a `WithdrawalRequest`
///
/// # Returns
///
/// * `Ok(WithdrawalRequest)` - Successfully converted record
/// * `Err(String)` - Message naming the request and what was wrong
pub fn convert_request_record(record: CsvRequestRecord) -> Result<WithdrawalRequest, String> {
    let context = |e: AtmError| format!("Request {}: {}", record.request, e);

    let card = record.card.parse::<Card>().map_err(context)?;
    let pin = record.pin.parse::<PinCode>().map_err(context)?;

    let currency = record
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());

    let amount = match currency {
        Some(code) => Money::new(record.amount, code.parse::<Currency>().map_err(context)?),
        None if record.amount == 0 => Money::ZERO,
        None => {
            return Err(format!(
                "Request {}: amount {} requires a currency",
                record.request, record.amount
            ))
        }
    };

    Ok(WithdrawalRequest {
        atm: record.atm,
        request: record.request,
        card,
        pin,
        amount,
    })
}

/// Convert a stock row into the banknote it loads
///
/// Denominations are interpreted in the machine's operating currency.
pub fn convert_stock_record(
    record: &CsvStockRecord,
    currency: Currency,
) -> Result<Banknote, String> {
    Banknote::from_value(currency, record.denomination).ok_or_else(|| {
        format!(
            "Machine {}: {}",
            record.atm,
            AtmError::UnknownDenomination {
                currency,
                value: record.denomination,
            }
        )
    })
}

/// Convert an account row into an `AccountEntry`
pub fn convert_account_record(record: CsvAccountRecord) -> Result<AccountEntry, String> {
    let context = |e: AtmError| format!("Account row: {}", e);

    Ok(AccountEntry {
        card: record.card.parse::<Card>().map_err(context)?,
        pin: record.pin.parse::<PinCode>().map_err(context)?,
        balance: record.balance,
        currency: record.currency.parse::<Currency>().map_err(context)?,
    })
}

/// Short status label written to the output for a processing result
pub fn outcome_status(result: &Result<Withdrawal, AtmError>) -> &'static str {
    match result {
        Ok(_) => "dispensed",
        Err(e) => match (e.code(), e) {
            (Some(code), _) => code.as_str(),
            (None, AtmError::Account(_)) => "account",
            (None, AtmError::UnknownMachine { .. }) => "unknown_machine",
            (None, _) => "error",
        },
    }
}

/// Write processing outcomes in CSV format
///
/// Columns: request, atm, amount, currency, status, banknotes. Outcomes are
/// sorted by request id for deterministic output; banknotes are the
/// space-separated face values of a dispensed withdrawal.
pub fn write_outcomes_csv(
    outcomes: &[WithdrawalOutcome],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["request", "atm", "amount", "currency", "status", "banknotes"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted: Vec<&WithdrawalOutcome> = outcomes.iter().collect();
    sorted.sort_by_key(|outcome| (outcome.request, outcome.atm));

    for outcome in sorted {
        let banknotes = match &outcome.result {
            Ok(withdrawal) => withdrawal
                .banknotes()
                .iter()
                .map(|note| note.value().to_string())
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        };

        writer
            .write_record(&[
                outcome.request.to_string(),
                outcome.atm.to_string(),
                outcome.amount.amount().to_string(),
                outcome
                    .amount
                    .currency()
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                outcome_status(&outcome.result).to_string(),
                banknotes,
            ])
            .map_err(|e| format!("Failed to write outcome record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountError, AuthorizationError};
    use rstest::rstest;

    fn request_record(amount: u64, currency: Option<&str>) -> CsvRequestRecord {
        CsvRequestRecord {
            atm: 1,
            request: 7,
            card: "1111222233334444".to_string(),
            pin: "1234".to_string(),
            amount,
            currency: currency.map(|s| s.to_string()),
        }
    }

    #[rstest]
    #[case::with_currency(160, Some("PLN"), Money::new(160, Currency::PLN))]
    #[case::lower_case_currency(50, Some("eur"), Money::new(50, Currency::EUR))]
    #[case::zero_without_currency(0, None, Money::ZERO)]
    #[case::zero_with_blank_currency(0, Some("  "), Money::ZERO)]
    #[case::zero_with_currency(0, Some("USD"), Money::new(0, Currency::USD))]
    fn test_convert_request_record(
        #[case] amount: u64,
        #[case] currency: Option<&str>,
        #[case] expected: Money,
    ) {
        let request = convert_request_record(request_record(amount, currency)).unwrap();
        assert_eq!(request.amount, expected);
        assert_eq!(request.atm, 1);
        assert_eq!(request.request, 7);
        assert_eq!(request.card.number(), "1111222233334444");
        assert_eq!(request.pin.digits(), &[1, 2, 3, 4]);
    }

    #[rstest]
    #[case::missing_currency(request_record(100, None), "requires a currency")]
    #[case::bad_currency(request_record(100, Some("ZL")), "Invalid currency code")]
    #[case::bad_pin(CsvRequestRecord { pin: "12".to_string(), ..request_record(100, Some("PLN")) }, "PIN must be")]
    #[case::bad_card(CsvRequestRecord { card: "abc".to_string(), ..request_record(100, Some("PLN")) }, "Invalid card number")]
    fn test_convert_request_record_errors(
        #[case] record: CsvRequestRecord,
        #[case] expected_error: &str,
    ) {
        let error = convert_request_record(record).unwrap_err();
        assert!(error.starts_with("Request 7: "), "{}", error);
        assert!(error.contains(expected_error), "{}", error);
    }

    #[rstest]
    #[case::known(500, Ok(Banknote::Pl500))]
    #[case::unknown(30, Err("Machine 2: No PLN banknote with face value 30".to_string()))]
    fn test_convert_stock_record(#[case] denomination: u32, #[case] expected: Result<Banknote, String>) {
        let record = CsvStockRecord {
            atm: 2,
            denomination,
            count: 4,
        };
        assert_eq!(convert_stock_record(&record, Currency::PLN), expected);
    }

    #[test]
    fn test_convert_account_record() {
        let entry = convert_account_record(CsvAccountRecord {
            card: "1111222233334444".to_string(),
            pin: "0042".to_string(),
            balance: 2500,
            currency: "pln".to_string(),
        })
        .unwrap();

        assert_eq!(entry.pin.digits(), &[0, 0, 4, 2]);
        assert_eq!(entry.balance, 2500);
        assert_eq!(entry.currency, Currency::PLN);
    }

    #[rstest]
    #[case::dispensed(Ok(Withdrawal::empty()), "dispensed")]
    #[case::wrong_currency(Err(AtmError::wrong_currency(Currency::USD, Currency::PLN, Currency::PLN)), "wrong_currency")]
    #[case::authorization(
        Err(AtmError::authorization("4444", AuthorizationError::UnknownCard { card: "4444".to_string() })),
        "authorization"
    )]
    #[case::wrong_amount(Err(AtmError::wrong_amount(123, Currency::PLN, 3)), "wrong_amount")]
    #[case::account(Err(AtmError::Account(AccountError::InvalidToken)), "account")]
    #[case::unknown_machine(Err(AtmError::UnknownMachine { atm: 4 }), "unknown_machine")]
    #[case::other(Err(AtmError::DepositNotAttached), "error")]
    fn test_outcome_status(#[case] result: Result<Withdrawal, AtmError>, #[case] expected: &str) {
        assert_eq!(outcome_status(&result), expected);
    }

    fn outcome(request: u32, amount: Money, result: Result<Withdrawal, AtmError>) -> WithdrawalOutcome {
        WithdrawalOutcome {
            request,
            atm: 1,
            amount,
            result,
        }
    }

    #[rstest]
    #[case::dispensed(
        vec![outcome(1, Money::new(260, Currency::PLN), Ok(Withdrawal::new(vec![Banknote::Pl200, Banknote::Pl50, Banknote::Pl10])))],
        "request,atm,amount,currency,status,banknotes\n1,1,260,PLN,dispensed,200 50 10\n"
    )]
    #[case::zero_sentinel(
        vec![outcome(1, Money::ZERO, Ok(Withdrawal::empty()))],
        "request,atm,amount,currency,status,banknotes\n1,1,0,,dispensed,\n"
    )]
    #[case::sorted_by_request(
        vec![
            outcome(3, Money::new(123, Currency::PLN), Err(AtmError::wrong_amount(123, Currency::PLN, 3))),
            outcome(1, Money::new(10, Currency::USD), Err(AtmError::wrong_currency(Currency::USD, Currency::PLN, Currency::PLN))),
        ],
        "request,atm,amount,currency,status,banknotes\n1,1,10,USD,wrong_currency,\n3,1,123,PLN,wrong_amount,\n"
    )]
    #[case::empty(vec![], "request,atm,amount,currency,status,banknotes\n")]
    fn test_write_outcomes_csv(#[case] outcomes: Vec<WithdrawalOutcome>, #[case] expected: &str) {
        let mut output = Vec::new();
        write_outcomes_csv(&outcomes, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
