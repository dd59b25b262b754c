//! Inspect command implementation
//!
//! Lists the scans of an emitted schedule with their calendar times and
//! whether they have already been recorded.

use super::shared::{format_duration, setup_logging};
use crate::app::models::ScanRecord;
use crate::app::services::schedule_writer::{ScheduleDocument, read_schedule_file};
use crate::cli::args::{InspectArgs, OutputFormat};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use tracing::{debug, info};

/// One scan as shown by `inspect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanView {
    pub scan_name: String,
    pub source: String,
    pub station: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: u64,
    pub recording_name: String,
    pub past: bool,
}

impl ScanView {
    pub fn from_scan(scan: &ScanRecord, now: DateTime<Utc>) -> crate::Result<Self> {
        Ok(Self {
            scan_name: scan.scan_name().to_string(),
            source: scan.source().to_string(),
            station: scan.station().to_string(),
            start: scan.start_datetime()?,
            end: scan.end_datetime()?,
            duration: scan.duration(),
            recording_name: scan.recording_name(),
            past: scan.is_past(now)?,
        })
    }
}

/// Inspect command runner
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false);
    debug!("Inspect arguments: {:?}", args);

    let document = read_schedule_file(&args.schedule)
        .with_context(|| format!("Failed to read schedule {}", args.schedule.display()))?;
    let views = scan_views(&document, Utc::now())?;
    info!(
        "{} of {} scans already recorded",
        views.iter().filter(|v| v.past).count(),
        views.len()
    );

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&views)
                .context("Failed to serialize scan listing")?;
            println!("{}", json);
        }
        OutputFormat::Table => print_table(&document, &views),
    }
    Ok(())
}

/// Calendar view of every scan in `document` relative to `now`
pub fn scan_views(document: &ScheduleDocument, now: DateTime<Utc>) -> Result<Vec<ScanView>> {
    document
        .scans
        .iter()
        .map(|scan| {
            ScanView::from_scan(scan, now)
                .with_context(|| format!("Scan {} has no calendar time", scan.scan_name()))
        })
        .collect()
}

fn print_table(document: &ScheduleDocument, views: &[ScanView]) {
    let header = &document.header;
    println!(
        "{} {} for {}",
        "Experiment".bright_green().bold(),
        header.name.bright_white().bold(),
        header.station.bright_white().bold()
    );
    if let Some(backend) = &document.backend {
        println!(
            "Backend {} ({}) rdbe {} mark5c {}",
            backend.personality, backend.ioch, backend.rdbe_ip, backend.mark5c_ip
        );
    }

    println!(
        "\n{:<10} {:<12} {:<20} {:<20} {:>10}  {}",
        "Scan", "Source", "Start (UTC)", "End (UTC)", "Duration", "Status"
    );
    for view in views {
        let status = if view.past {
            "recorded".dimmed()
        } else {
            "upcoming".bright_cyan()
        };
        println!(
            "{:<10} {:<12} {:<20} {:<20} {:>10}  {}",
            view.scan_name,
            view.source,
            view.start.format("%Y-%m-%d %H:%M:%S"),
            view.end.format("%Y-%m-%d %H:%M:%S"),
            format_duration(view.duration),
            status
        );
    }

    let total: u64 = views.iter().map(|v| v.duration).sum();
    println!(
        "\n{} scans, {} of recording",
        views.len().to_string().bright_white().bold(),
        format_duration(total)
    );
}
