//! Command-line interface of the simulator binary

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse the process arguments
///
/// On invalid arguments or `--help`, clap prints the message and exits.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
