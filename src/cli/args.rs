//! Command-line argument definitions for the VEX schedule converter
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::SCHEDULE_EXTENSION;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the VEX schedule converter
///
/// Extracts one station's scans from a VEX (or legacy SKED) observing schedule
/// and writes them as the XML scan schedule read by recorder control.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vex_schedule",
    version,
    about = "Convert VEX observing schedules into per-station XML scan schedules",
    long_about = "Reads a VEX or SKED observing schedule, keeps the scans one station takes part in \
                  (directly or through a colocated equivalent station) and writes them as an XML \
                  scan schedule for recorder control. Can also inspect an emitted schedule and list \
                  the known stations."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract one station's scans from a schedule and write them as XML
    Convert(ConvertArgs),
    /// List the scans of an emitted XML schedule
    Inspect(InspectArgs),
    /// Show the built-in station table and equivalences
    Stations(StationsArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// VEX or SKED schedule to read
    ///
    /// The experiment label is the file name up to its first `.`.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "VEX or SKED schedule file"
    )]
    pub input: Option<PathBuf>,

    /// Two-letter code of the station to extract scans for
    #[arg(
        short = 's',
        long = "station",
        value_name = "CODE",
        help = "Station code to extract scans for"
    )]
    pub station: String,

    /// Site name for the station
    ///
    /// Registers or renames the station. Unknown stations given without a
    /// name are registered as "site-name".
    #[arg(
        short = 'n',
        long = "site-name",
        value_name = "NAME",
        help = "Site name to register for the station"
    )]
    pub site_name: Option<String>,

    /// Record this station's durations from another station's lines
    ///
    /// Used for a feed that shares a telescope with a scheduled station.
    #[arg(
        short = 'e',
        long = "equivalent",
        value_name = "CODE",
        help = "Station whose scheduled durations this station records"
    )]
    pub equivalent: Option<String>,

    /// Output path for the XML schedule
    ///
    /// Defaults to the input path with its extension replaced by `.xml`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output path for the XML schedule"
    )]
    pub output: Option<PathBuf>,

    /// Add the recorder backend `<config>` element
    ///
    /// Addresses come from the `rdbe` and `mk5c` environment variables.
    #[arg(
        long = "with-backend-config",
        help = "Write the recorder backend <config> element"
    )]
    pub with_backend_config: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// XML schedule written by `convert`
    #[arg(value_name = "SCHEDULE")]
    pub schedule: PathBuf,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the scan listing"
    )]
    pub output_format: OutputFormat,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the stations command
#[derive(Debug, Clone, Parser)]
pub struct StationsArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the station listing"
    )]
    pub output_format: OutputFormat,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON for scripting
    Json,
}

fn verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl ConvertArgs {
    /// Validate the station codes given on the command line
    pub fn validate(&self) -> Result<()> {
        validate_station_code(&self.station)?;
        if let Some(equivalent) = &self.equivalent {
            validate_station_code(equivalent)?;
        }
        Ok(())
    }

    /// Experiment label: the input file name up to its first `.`
    pub fn experiment_label(&self) -> Option<String> {
        let name = self.input.as_ref()?.file_name()?.to_string_lossy();
        let label = name.split('.').next().unwrap_or_default();
        (!label.is_empty()).then(|| label.to_string())
    }

    /// Explicit output path, or the input path with an `.xml` extension
    pub fn output_path(&self) -> Option<PathBuf> {
        match &self.output {
            Some(path) => Some(path.clone()),
            None => self
                .input
                .as_ref()
                .map(|input| input.with_extension(SCHEDULE_EXTENSION)),
        }
    }

    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity(self.verbose)
        }
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        verbosity(self.verbose)
    }
}

impl StationsArgs {
    pub fn get_log_level(&self) -> &'static str {
        verbosity(self.verbose)
    }
}

/// Station codes are one or two ASCII letters or digits
fn validate_station_code(code: &str) -> Result<()> {
    let valid = (1..=2).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidStationCode {
            code: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        match parse(argv).command {
            Some(Commands::Convert(args)) => args,
            other => panic!("expected convert, got {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&["vex_schedule"]).command.is_none());
    }

    #[test]
    fn test_convert_arguments() {
        let args = convert_args(&[
            "vex_schedule",
            "convert",
            "-f",
            "sched/e16b08.vex",
            "-s",
            "A1",
            "-e",
            "Az",
            "-vv",
        ]);

        assert_eq!(args.station, "A1");
        assert_eq!(args.equivalent.as_deref(), Some("Az"));
        assert_eq!(args.experiment_label().as_deref(), Some("e16b08"));
        assert_eq!(
            args.output_path().unwrap(),
            Path::new("sched/e16b08.xml").to_path_buf()
        );
        assert_eq!(args.get_log_level(), "debug");
        assert!(!args.with_backend_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_experiment_label_stops_at_first_dot() {
        let args = convert_args(&["vex_schedule", "convert", "-f", "e16b08.az.vex", "-s", "Az"]);
        assert_eq!(args.experiment_label().as_deref(), Some("e16b08"));
        assert_eq!(args.output_path().unwrap(), Path::new("e16b08.az.xml"));
    }

    #[test]
    fn test_explicit_output_and_missing_input() {
        let args = convert_args(&["vex_schedule", "convert", "-s", "Az", "-o", "out.xml"]);
        assert!(args.input.is_none());
        assert!(args.experiment_label().is_none());
        assert_eq!(args.output_path().unwrap(), Path::new("out.xml"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(
            Args::try_parse_from(["vex_schedule", "convert", "-s", "Az", "-q", "-v"]).is_err()
        );
        let args = convert_args(&["vex_schedule", "convert", "-s", "Az", "-q"]);
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_station_code_validation() {
        let bad = convert_args(&["vex_schedule", "convert", "-s", "Azz"]);
        assert!(matches!(bad.validate(), Err(Error::InvalidStationCode { .. })));

        let bad_equivalent = convert_args(&["vex_schedule", "convert", "-s", "Az", "-e", "A-"]);
        assert!(bad_equivalent.validate().is_err());
    }

    #[test]
    fn test_listing_formats() {
        match parse(&["vex_schedule", "inspect", "e16b08.xml", "--format", "json"]).command {
            Some(Commands::Inspect(args)) => {
                assert_eq!(args.output_format, OutputFormat::Json);
                assert_eq!(args.get_log_level(), "warn");
            }
            other => panic!("expected inspect, got {:?}", other),
        }

        match parse(&["vex_schedule", "stations"]).command {
            Some(Commands::Stations(args)) => assert_eq!(args.output_format, OutputFormat::Table),
            other => panic!("expected stations, got {:?}", other),
        }
    }
}
