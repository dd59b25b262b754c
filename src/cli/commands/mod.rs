//! Command implementations for the VEX schedule CLI
//!
//! Each subcommand lives in its own module:
//! - `convert`: schedule parsing and XML emission
//! - `inspect`: listing of an emitted schedule
//! - `stations`: built-in station table

pub mod convert;
pub mod inspect;
pub mod shared;
pub mod stations;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Dispatch to the subcommand handler; does nothing without a subcommand
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Convert(convert_args)) => convert::run_convert(convert_args),
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args),
        Some(Commands::Stations(stations_args)) => stations::run_stations(stations_args),
        None => Ok(()),
    }
}
