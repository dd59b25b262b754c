//! Tests for legacy SKED scan-table lines

use crate::app::services::vex_parser::lines::VexLine;
use crate::app::services::vex_parser::sked::{parse_line, station_codes};
use crate::app::services::vex_parser::{DiagnosticKind, ParseStats};

const SKED_LINE: &str =
    "SGRA      PREOB 010 SX 16045223000  60 MIDOB 0 POSTOB AzCaHi 0000 0000 0000 YNNN 300 0 240";

#[test]
fn test_station_codes_take_every_other_character() {
    assert_eq!(station_codes("AzCaHi"), vec!["A", "C", "H"]);
    assert_eq!(station_codes(""), Vec::<String>::new());
    // trailing unpaired character is not a station
    assert_eq!(station_codes("AzC"), vec!["A"]);
}

#[test]
fn test_parse_line_expands_each_station() {
    let line = VexLine::classify(7, SKED_LINE);
    let mut stats = ParseStats::new();

    let scans = parse_line(&line, "e16b08", &mut stats);

    let stations: Vec<&str> = scans.iter().map(|s| s.station()).collect();
    assert_eq!(stations, vec!["A", "H"]);
    assert_eq!(scans[0].duration(), 300);
    assert_eq!(scans[1].duration(), 240);
    assert!(scans.iter().all(|s| s.source() == "SGRA"));
    assert_eq!(scans[0].scan_name(), "045-2230");
    assert_eq!(scans[0].alt_name(), "e16b08_A_noname");

    // Ca is listed with a zero duration
    assert_eq!(stats.count_of(DiagnosticKind::ZeroDuration), 1);
    assert_eq!(stats.diagnostics[0].line, 7);
    assert_eq!(stats.scans_emitted, 2);
    assert_eq!(stats.scans_dropped, 1);
    assert_eq!(stats.scan_blocks, 1);
}

#[test]
fn test_parse_line_short_line() {
    let line = VexLine::classify(1, "SGRA PREOB 010 SX 16045223000");
    let mut stats = ParseStats::new();

    assert!(parse_line(&line, "e16b08", &mut stats).is_empty());
    assert_eq!(stats.count_of(DiagnosticKind::MalformedField), 1);
    assert_eq!(stats.scan_blocks, 0);
}

#[test]
fn test_parse_line_bad_time() {
    let line = VexLine::classify(
        1,
        "SGRA PREOB 010 SX 1604522 60 MIDOB 0 POSTOB Az 0000 YNNN 300",
    );
    let mut stats = ParseStats::new();

    assert!(parse_line(&line, "e16b08", &mut stats).is_empty());
    assert_eq!(stats.count_of(DiagnosticKind::MalformedTime), 1);
}

#[test]
fn test_parse_line_missing_durations() {
    let line = VexLine::classify(
        1,
        "SGRA PREOB 010 SX 16045223000 60 MIDOB 0 POSTOB AzHi 0000 0000 YNNN 300",
    );
    let mut stats = ParseStats::new();

    let scans = parse_line(&line, "e16b08", &mut stats);
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].station(), "A");
    assert_eq!(stats.count_of(DiagnosticKind::MalformedField), 1);
}

#[test]
fn test_parse_line_non_numeric_duration() {
    let line = VexLine::classify(
        1,
        "SGRA PREOB 010 SX 16045223000 60 MIDOB 0 POSTOB Az 0000 YNNN abc",
    );
    let mut stats = ParseStats::new();

    assert!(parse_line(&line, "e16b08", &mut stats).is_empty());
    assert_eq!(stats.count_of(DiagnosticKind::MalformedField), 1);
    assert_eq!(stats.scans_dropped, 1);
}
