//! Core business logic module
//!
//! This module contains the withdrawal components:
//! - `traits` - Bank and money deposit collaborator traits
//! - `dispenser` - Greedy banknote selection
//! - `machine` - The ATM and its withdrawal procedure
//! - `bank` - In-memory bank used by the simulator
//! - `deposit` - In-memory money deposit used by the simulator
//! - `engine` - Fleet of machines processing requests
//! - `async` - Concurrent batch processing

pub mod r#async;
pub mod bank;
pub mod deposit;
pub mod dispenser;
pub mod engine;
pub mod machine;
pub mod traits;

pub use bank::InMemoryBank;
pub use deposit::InMemoryMoneyDeposit;
pub use engine::{FleetEngine, WithdrawalEngine};
pub use machine::Atm;
pub use r#async::BatchProcessor;
pub use traits::{Bank, MoneyDeposit};
