//! Legacy SKED scan-table lines
//!
//! A `$SKED` line is a dense positional record: source in column 0, the
//! `YYDDDHHMMSS` start in column 4, a packed station list in column 9 (station
//! code and cable wrap alternate, so every other character is a code), one
//! footage column per station, one flag column, then one duration per station.

use super::lines::VexLine;
use super::stats::{DiagnosticKind, ParseStats};
use crate::app::models::ScanRecord;
use crate::app::services::time_decoder::decode_sked;
use crate::constants::sked::{
    DURATION_OFFSET, SCAN_LABEL, SOURCE_FIELD, STATIONS_FIELD, TIME_FIELD,
};
use tracing::debug;

/// Station codes packed into a SKED station column
pub fn station_codes(packed: &str) -> Vec<String> {
    let chars: Vec<char> = packed.chars().collect();
    chars
        .chunks_exact(2)
        .map(|pair| pair[0].to_string())
        .collect()
}

/// Expand one SKED line into a scan per listed station
pub fn parse_line(line: &VexLine<'_>, experiment: &str, stats: &mut ParseStats) -> Vec<ScanRecord> {
    if line.fields.len() <= STATIONS_FIELD {
        stats.diagnose(
            line.number,
            DiagnosticKind::MalformedField,
            format!(
                "SKED line has {} fields, expected at least {}",
                line.fields.len(),
                STATIONS_FIELD + 1
            ),
        );
        return Vec::new();
    }

    stats.scan_blocks += 1;
    let source = line.fields[SOURCE_FIELD];
    let time_token = line.fields[TIME_FIELD];

    let start = match decode_sked(time_token) {
        Ok(start) => start,
        Err(e) => {
            stats.diagnose(line.number, DiagnosticKind::MalformedTime, e.to_string());
            return Vec::new();
        }
    };

    let codes = station_codes(line.fields[STATIONS_FIELD]);
    let first_duration = STATIONS_FIELD + codes.len() + DURATION_OFFSET;
    debug!(
        "SKED scan {} at {} for {} stations",
        source,
        start.normalized(),
        codes.len()
    );

    let mut scans = Vec::with_capacity(codes.len());
    for (i, code) in codes.iter().enumerate() {
        let Some(raw) = line.field(first_duration + i) else {
            stats.scans_dropped += 1;
            stats.diagnose(
                line.number,
                DiagnosticKind::MalformedField,
                format!("no duration column for station {} on {}", code, source),
            );
            continue;
        };

        let duration: u64 = match raw.parse() {
            Ok(duration) => duration,
            Err(_) => {
                stats.scans_dropped += 1;
                stats.diagnose(
                    line.number,
                    DiagnosticKind::MalformedField,
                    format!("duration '{}' for station {} is not a number", raw, code),
                );
                continue;
            }
        };

        if duration == 0 {
            stats.scans_dropped += 1;
            stats.diagnose(
                line.number,
                DiagnosticKind::ZeroDuration,
                format!("zero duration for station {} on {}", code, source),
            );
            continue;
        }

        match ScanRecord::new(experiment, source, code.as_str(), start.clone(), duration, SCAN_LABEL) {
            Ok(scan) => {
                stats.scans_emitted += 1;
                scans.push(scan);
            }
            Err(e) => {
                stats.scans_dropped += 1;
                stats.diagnose(line.number, DiagnosticKind::MalformedField, e.to_string());
            }
        }
    }

    scans
}
