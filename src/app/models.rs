//! Data models for VEX schedule processing
//!
//! Station entries, experiment metadata and the normalized per-station scan
//! record that ends up in the emitted schedule document.

use crate::app::services::time_decoder::VexTime;
use crate::constants::UNSET_SENTINEL;
use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Station Entry
// =============================================================================

/// A two-letter station code and the site/feed name it stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationEntry {
    pub code: String,
    pub site_name: String,
}

impl StationEntry {
    pub fn new(code: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            site_name: site_name.into(),
        }
    }
}

// =============================================================================
// Experiment Metadata
// =============================================================================

/// Experiment-level values collected from the `$EXPER;` block
///
/// Every field holds `"0"` until the schedule provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentMeta {
    /// `exper_name` as written in the schedule
    pub name: String,

    /// Station the schedule is being extracted for
    pub station_code: String,

    /// Normalized `exper_nominal_start`
    pub nominal_start: String,

    /// Normalized `exper_nominal_stop`
    pub nominal_stop: String,
}

impl Default for ExperimentMeta {
    fn default() -> Self {
        Self {
            name: UNSET_SENTINEL.to_string(),
            station_code: UNSET_SENTINEL.to_string(),
            nominal_start: UNSET_SENTINEL.to_string(),
            nominal_stop: UNSET_SENTINEL.to_string(),
        }
    }
}

impl ExperimentMeta {
    pub fn for_station(station_code: impl Into<String>) -> Self {
        Self {
            station_code: station_code.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Scan Record
// =============================================================================

/// One scheduled recording interval for one station
///
/// Built once when a scan is resolved and never modified afterwards. The
/// `start_time`/`end_time` pair is the concatenated-digit pseudo-timestamp
/// written to the schedule; use [`start_datetime`](Self::start_datetime) and
/// [`end_datetime`](Self::end_datetime) for real time arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    experiment: String,
    source: String,
    station: String,
    start: VexTime,
    start_time: u64,
    duration: u64,
    scan_name: String,
    alt_name: String,
}

impl ScanRecord {
    /// Create a scan record; `label` is the schedule's own scan label
    pub fn new(
        experiment: impl Into<String>,
        source: impl Into<String>,
        station: impl Into<String>,
        start: VexTime,
        duration: u64,
        label: &str,
    ) -> Result<Self> {
        if duration == 0 {
            return Err(Error::malformed_field(
                "duration",
                "scan duration must be positive",
            ));
        }

        let experiment = experiment.into();
        let station = station.into();
        let start_time = start.pseudo_timestamp()?;
        start_time.checked_add(duration).ok_or_else(|| {
            Error::malformed_field("duration", "end time overflows the pseudo-timestamp")
        })?;

        let alt_name = format!("{}_{}_{}", experiment, station, label);

        Ok(Self {
            scan_name: start.scan_name(),
            experiment,
            source: source.into(),
            station,
            start,
            start_time,
            duration,
            alt_name,
        })
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Station code as it appears in the emitted schedule
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn start(&self) -> &VexTime {
        &self.start
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Recording length in seconds
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// `start_time + duration` on the pseudo-timestamp
    pub fn end_time(&self) -> u64 {
        self.start_time + self.duration
    }

    /// `DDD-HHMM`
    pub fn scan_name(&self) -> &str {
        &self.scan_name
    }

    /// `experiment_station_label`, kept for cross-checking against the schedule
    pub fn alt_name(&self) -> &str {
        &self.alt_name
    }

    /// Name the recorder gives the scan's data file
    pub fn recording_name(&self) -> String {
        format!("{}_{}_{}", self.experiment, self.station, self.scan_name)
    }

    pub fn start_datetime(&self) -> Result<DateTime<Utc>> {
        self.start.to_datetime()
    }

    pub fn end_datetime(&self) -> Result<DateTime<Utc>> {
        let seconds = i64::try_from(self.duration).map_err(|_| Error::Calendar {
            token: self.start.to_string(),
        })?;
        Ok(self.start_datetime()? + Duration::seconds(seconds))
    }

    /// Whether the recording has already finished at `now`
    pub fn is_past(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.end_datetime()? < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::time_decoder::decode;
    use chrono::TimeZone;

    fn sample_scan(duration: u64) -> Result<ScanRecord> {
        ScanRecord::new(
            "e16b08",
            "3C84",
            "Az",
            decode("2016y045d10h30m00s").unwrap(),
            duration,
            "No0001",
        )
    }

    #[test]
    fn test_scan_record_derived_fields() {
        let scan = sample_scan(60).unwrap();
        assert_eq!(scan.start_time(), 2016045103000);
        assert_eq!(scan.end_time(), 2016045103060);
        assert_eq!(scan.scan_name(), "045-1030");
        assert_eq!(scan.alt_name(), "e16b08_Az_No0001");
        assert_eq!(scan.recording_name(), "e16b08_Az_045-1030");
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(matches!(
            sample_scan(0),
            Err(Error::MalformedField { .. })
        ));
    }

    #[test]
    fn test_pseudo_end_time_is_not_calendar_time() {
        // 00 + 90 seconds reads as minute 30, second 90 on the pseudo-timestamp
        let scan = sample_scan(90).unwrap();
        assert_eq!(scan.end_time(), 2016045103090);

        let end = scan.end_datetime().unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2016, 2, 14, 10, 31, 30).unwrap());
    }

    #[test]
    fn test_is_past() {
        let scan = sample_scan(60).unwrap();
        let before = Utc.with_ymd_and_hms(2016, 2, 14, 10, 30, 30).unwrap();
        let after = Utc.with_ymd_and_hms(2016, 2, 14, 10, 31, 1).unwrap();
        assert!(!scan.is_past(before).unwrap());
        assert!(scan.is_past(after).unwrap());
    }

    #[test]
    fn test_experiment_meta_defaults_to_sentinel() {
        let meta = ExperimentMeta::for_station("Az");
        assert_eq!(meta.name, "0");
        assert_eq!(meta.station_code, "Az");
        assert_eq!(meta.nominal_start, "0");
        assert_eq!(meta.nominal_stop, "0");
    }
}
