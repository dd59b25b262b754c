//! Stations command implementation
//!
//! Prints the built-in station table together with the colocated station each
//! feed records under.

use super::shared::setup_logging;
use crate::app::services::station_registry::StationRegistry;
use crate::cli::args::{OutputFormat, StationsArgs};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use tracing::debug;

/// One registry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRow {
    pub code: String,
    pub site_name: String,
    pub equivalent_of: Option<String>,
}

/// Stations command runner
pub fn run_stations(args: StationsArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false);

    let registry = StationRegistry::with_builtin();
    let rows = station_rows(&registry);
    debug!("Listing {} stations", rows.len());

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .context("Failed to serialize station listing")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{:<6} {:<12} {}", "Code", "Site", "Records as");
            for row in &rows {
                println!(
                    "{:<6} {:<12} {}",
                    row.code.bright_white().bold(),
                    row.site_name,
                    row.equivalent_of.as_deref().unwrap_or("-")
                );
            }
            println!(
                "\n{} stations, {} equivalences",
                rows.len(),
                registry.equivalences().len()
            );
        }
    }
    Ok(())
}

/// Registry contents sorted by code
pub fn station_rows(registry: &StationRegistry) -> Vec<StationRow> {
    registry
        .entries()
        .into_iter()
        .map(|entry| StationRow {
            equivalent_of: registry.equivalent_of(&entry.code).map(str::to_string),
            code: entry.code,
            site_name: entry.site_name,
        })
        .collect()
}
