//! Unit tests for schedule emission and read-back

pub mod reader_tests;

use crate::app::models::{ExperimentMeta, ScanRecord};
use crate::app::services::schedule_writer::ScheduleDocument;
use crate::app::services::time_decoder::decode;

/// Header values of the `e16b08` test experiment
pub fn sample_meta() -> ExperimentMeta {
    ExperimentMeta {
        name: "e16b08".to_string(),
        station_code: "Az".to_string(),
        nominal_start: "2016045000000".to_string(),
        nominal_stop: "2016046000000".to_string(),
    }
}

pub fn sample_scan(source: &str, start: &str, duration: u64) -> ScanRecord {
    ScanRecord::new("e16b08", source, "Az", decode(start).unwrap(), duration, "No0001").unwrap()
}

/// Two scans in schedule order
pub fn sample_document() -> ScheduleDocument {
    ScheduleDocument::new(
        &sample_meta(),
        vec![
            sample_scan("3C84", "2016y045d10h30m00s", 60),
            sample_scan("M87", "2016y045d10h45m30s", 420),
        ],
    )
}
