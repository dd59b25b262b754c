//! Convert command implementation
//!
//! Builds the station registry from the command line, parses the schedule for
//! the target station and writes the XML scan schedule.

use super::shared::{format_duration, print_diagnostics, setup_logging};
use crate::app::services::schedule_writer::{ScheduleDocument, ScheduleWriter};
use crate::app::services::station_registry::StationRegistry;
use crate::app::services::vex_parser::{ParseStats, VexParser};
use crate::cli::args::{Args, ConvertArgs};
use crate::config::{BackendConfig, ScheduleConfig};
use crate::constants::{DEFAULT_SITE_NAME, UNSET_SENTINEL};
use anyhow::{Context, Result};
use clap::CommandFactory;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What one conversion produced
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub station: String,
    pub site_name: String,
    pub scans_written: usize,
    /// Seconds of recording across all written scans
    pub total_duration: u64,
    pub stats: ParseStats,
}

/// Convert command runner
pub fn run_convert(args: ConvertArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);
    debug!("Convert arguments: {:?}", args);

    let Some(input) = args.input.clone().filter(|path| path.is_file()) else {
        match &args.input {
            Some(path) => eprintln!("Schedule file not found: {}", path.display()),
            None => eprintln!("No schedule file given"),
        }
        if let Some(convert) = Args::command().find_subcommand_mut("convert") {
            eprintln!("{}", convert.render_usage());
        }
        return Ok(());
    };

    let start = Instant::now();
    let summary = convert_schedule(&args, &input)?;
    info!(
        "Converted {} in {:.2}s",
        input.display(),
        start.elapsed().as_secs_f64()
    );

    if !args.quiet {
        print_summary(&summary);
    }
    Ok(())
}

/// Parse `input` for the configured station and write the schedule
pub fn convert_schedule(args: &ConvertArgs, input: &Path) -> Result<ConvertSummary> {
    let mut config = build_config(args)?;
    let output = args
        .output_path()
        .context("No output path could be derived from the input")?;

    let result = VexParser::new(&config)
        .parse_file(input)
        .with_context(|| format!("Failed to parse schedule {}", input.display()))?;

    config.registry.absorb(&result.stations);
    let site_name = config.target_site().to_string();
    info!(
        "Station {} is {} ({} stations known)",
        config.target_station,
        site_name,
        config.registry.station_count()
    );

    if result.is_empty() {
        warn!(
            "No scans found for {} in {}",
            config.target_station,
            input.display()
        );
    }

    let stats = result.stats.clone();
    let total_duration = result.total_duration();

    let mut document = ScheduleDocument::from_parse(&config, result);
    if args.with_backend_config {
        let backend = BackendConfig::from_env();
        debug!("Backend config: {:?}", backend);
        document = document.with_backend(backend);
    }

    ScheduleWriter::write_file(&document, &output)
        .with_context(|| format!("Failed to write schedule {}", output.display()))?;

    Ok(ConvertSummary {
        output,
        station: config.target_station,
        site_name,
        scans_written: document.scan_count(),
        total_duration,
        stats,
    })
}

/// Registry and parser configuration from the command line
pub fn build_config(args: &ConvertArgs) -> Result<ScheduleConfig> {
    args.validate()?;

    let mut registry = StationRegistry::with_builtin();
    let station = args.station.as_str();

    let known = registry.get(station).map(str::to_string);
    match (&args.site_name, known.as_deref()) {
        (Some(name), Some(known)) if name.as_str() != known => {
            info!("Renaming station {} from {} to {}", station, known, name);
            registry.register(station, name.clone());
        }
        (Some(name), None) => registry.register(station, name.clone()),
        (None, None) => {
            warn!(
                "Unknown station {}, registering it as {}",
                station, DEFAULT_SITE_NAME
            );
            registry.register(station, DEFAULT_SITE_NAME);
        }
        _ => {}
    }

    if let Some(equivalent) = &args.equivalent {
        if registry.contains(equivalent) {
            match registry.override_equivalence(station, equivalent.clone()) {
                Ok(dropped) => {
                    if let Some((secondary, canonical)) = dropped {
                        info!("Dropping equivalence {} -> {}", secondary, canonical);
                    }
                    info!("Treating {} as equivalent to {}", station, equivalent);
                }
                Err(e) => warn!(
                    "Unable to treat {} as equivalent to {}: {}",
                    station, equivalent, e
                ),
            }
        } else {
            warn!(
                "Unable to treat {} as equivalent to unknown station {}",
                station, equivalent
            );
        }
    }

    let experiment = args
        .experiment_label()
        .unwrap_or_else(|| UNSET_SENTINEL.to_string());

    Ok(ScheduleConfig::new(station)
        .with_experiment(experiment)
        .with_registry(registry))
}

fn print_summary(summary: &ConvertSummary) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  Station:        {} ({})",
        summary.station.bright_white().bold(),
        summary.site_name
    );
    println!(
        "  Scans written:  {}",
        summary.scans_written.to_string().bright_white().bold()
    );
    println!(
        "  Scans dropped:  {}",
        if summary.stats.scans_dropped > 0 {
            summary.stats.scans_dropped.to_string().bright_red().bold()
        } else {
            summary.stats.scans_dropped.to_string().normal()
        }
    );
    println!(
        "  Recording time: {}",
        format_duration(summary.total_duration)
    );
    println!("  Output:         {}", summary.output.display());

    print_diagnostics(&summary.stats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["vex_schedule", "convert"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Some(crate::cli::args::Commands::Convert(args)) => args,
            other => panic!("expected convert, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_station_gets_default_name() {
        let config = build_config(&convert_args(&["-s", "Xx"])).unwrap();
        assert_eq!(config.target_site(), "site-name");
        assert_eq!(config.experiment, "0");
    }

    #[test]
    fn test_site_name_registers_station() {
        let config = build_config(&convert_args(&["-s", "Xx", "-n", "LMT"])).unwrap();
        assert_eq!(config.target_site(), "LMT");

        let renamed = build_config(&convert_args(&["-s", "Az", "-n", "SMT"])).unwrap();
        assert_eq!(renamed.target_site(), "SMT");
    }

    #[test]
    fn test_equivalence_with_known_station() {
        let config = build_config(&convert_args(&["-s", "Xx", "-e", "Hi"])).unwrap();
        assert_eq!(config.target_equivalent(), Some("Hi"));
    }

    #[test]
    fn test_equivalence_with_unknown_station_is_skipped() {
        let config = build_config(&convert_args(&["-s", "Xx", "-e", "Qq"])).unwrap();
        assert_eq!(config.target_equivalent(), None);
    }

    #[test]
    fn test_equivalence_replaces_reverse_builtin_pair() {
        // Az -> A1 would close the built-in A1 -> Az pair
        let config = build_config(&convert_args(&["-s", "Az", "-e", "A1"])).unwrap();
        assert_eq!(config.target_equivalent(), Some("A1"));
        assert_eq!(config.registry.equivalent_of("A1"), None);
    }

    #[test]
    fn test_self_equivalence_is_skipped() {
        let config = build_config(&convert_args(&["-s", "Az", "-e", "Az"])).unwrap();
        assert_eq!(config.target_equivalent(), None);
    }

    #[test]
    fn test_invalid_station_is_an_error() {
        assert!(build_config(&convert_args(&["-s", "toolong"])).is_err());
    }

    #[test]
    fn test_experiment_label_from_input() {
        let config = build_config(&convert_args(&["-f", "/data/e16b08.vex", "-s", "Az"])).unwrap();
        assert_eq!(config.experiment, "e16b08");
    }
}
