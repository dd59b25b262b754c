//! Section state machine over classified schedule lines
//!
//! Section headers switch state wherever they appear. `$SCHED;` scan blocks
//! and the `$EXPER;` block are consumed up to their close marker; `$STATION;`
//! looks at a single line only. `$CODES` ends the parse.

use super::lines::{Assignment, LineKind, Section, VexLine, classify};
use super::sked;
use super::stats::{DiagnosticKind, ParseResult, ParseStats};
use crate::app::models::{ExperimentMeta, ScanRecord, StationEntry};
use crate::app::services::time_decoder::{VexTime, decode};
use crate::config::ScheduleConfig;
use crate::constants::{STATION_DURATION_FIELD, keys, tokens};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Schedule parser for one target station
///
/// The parser keeps no state between calls; every `parse_*` call starts from
/// scratch, so one instance can be reused for any number of schedules.
#[derive(Debug, Clone, Copy)]
pub struct VexParser<'c> {
    config: &'c ScheduleConfig,
}

impl<'c> VexParser<'c> {
    pub fn new(config: &'c ScheduleConfig) -> Self {
        Self { config }
    }

    /// Read and parse a schedule file
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        if !path.is_file() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        info!(
            "Parsing schedule {} for {}",
            path.display(),
            self.config.target_station
        );
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(self.parse_str(&content))
    }

    /// Parse schedule text held in memory
    pub fn parse_str(&self, content: &str) -> ParseResult {
        let mut run = ParseRun::new(self.config);
        let mut last_line = 0;

        for line in classify(content) {
            if matches!(run.state, State::Terminated) {
                break;
            }
            last_line = line.number;
            run.step(line);
        }
        run.close_open_block(last_line, "end of input");

        let result = run.finish();
        info!(
            "Extracted {} scans for {} ({} dropped, {} diagnostics)",
            result.stats.scans_emitted,
            self.config.target_station,
            result.stats.scans_dropped,
            result.stats.diagnostics.len()
        );
        result
    }
}

/// Values collected between `scan` and `endscan;`
#[derive(Debug)]
struct ScanBlock {
    label: String,
    opened_at: usize,
    start: Option<VexTime>,
    source: Option<String>,
    duration: Option<u64>,
    equivalent_duration: Option<u64>,
}

impl ScanBlock {
    fn open(label: &str, line: usize) -> Self {
        Self {
            label: label.to_string(),
            opened_at: line,
            start: None,
            source: None,
            duration: None,
            equivalent_duration: None,
        }
    }
}

#[derive(Debug)]
enum State {
    /// Between blocks; `None` is outside any recognised section
    Idle(Option<Section>),
    InScanBlock(ScanBlock),
    InExperBlock,
    Terminated,
}

/// Mutable state of a single parse
struct ParseRun<'c> {
    config: &'c ScheduleConfig,
    state: State,
    meta: ExperimentMeta,
    scans: Vec<ScanRecord>,
    stations: Vec<StationEntry>,
    stats: ParseStats,
}

impl<'c> ParseRun<'c> {
    fn new(config: &'c ScheduleConfig) -> Self {
        Self {
            config,
            state: State::Idle(None),
            meta: ExperimentMeta::for_station(config.target_station.clone()),
            scans: Vec::new(),
            stations: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            meta: self.meta,
            scans: self.scans,
            stations: self.stations,
            stats: self.stats,
        }
    }

    fn step(&mut self, line: VexLine<'_>) {
        self.stats.lines_read += 1;

        match line.kind {
            LineKind::Blank => return,
            LineKind::Header(section) => {
                self.enter_section(section, line.number);
                return;
            }
            LineKind::ForeignHeader(name) => {
                self.close_open_block(line.number, &format!("{} header", name));
                debug!("Line {}: skipping section {}", line.number, name);
                self.state = State::Idle(None);
                return;
            }
            _ => {}
        }

        let state = std::mem::replace(&mut self.state, State::Terminated);
        self.state = match state {
            State::Idle(section) => self.idle_line(section, &line),
            State::InScanBlock(block) => self.scan_line(block, &line),
            State::InExperBlock => self.exper_line(&line),
            State::Terminated => State::Terminated,
        };
    }

    fn enter_section(&mut self, section: Section, line: usize) {
        self.close_open_block(line, &format!("{} header", section));
        debug!("Line {}: entering {}", line, section);

        self.state = match section {
            Section::Codes => {
                info!("Reached {} at line {}, stopping", section, line);
                self.stats.terminated_by_marker = true;
                State::Terminated
            }
            Section::Exper => State::InExperBlock,
            other => State::Idle(Some(other)),
        };
    }

    /// Close whatever block is open because `cause` interrupted it
    fn close_open_block(&mut self, line: usize, cause: &str) {
        match std::mem::replace(&mut self.state, State::Idle(None)) {
            State::InScanBlock(block) => {
                self.stats.diagnose(
                    line,
                    DiagnosticKind::UnterminatedBlock,
                    format!(
                        "scan {} opened at line {} not closed before {}",
                        block.label, block.opened_at, cause
                    ),
                );
                self.finish_scan(block, line);
            }
            State::InExperBlock => {
                self.stats.diagnose(
                    line,
                    DiagnosticKind::UnterminatedBlock,
                    format!("experiment block not closed before {}", cause),
                );
            }
            other => self.state = other,
        }
    }

    fn idle_line(&mut self, section: Option<Section>, line: &VexLine<'_>) -> State {
        match section {
            Some(Section::Sked) => {
                if line.kind != LineKind::Comment {
                    let scans = sked::parse_line(line, &self.config.experiment, &mut self.stats);
                    self.scans.extend(scans);
                }
                State::Idle(section)
            }
            Some(Section::Stations) => {
                if line.first() == Some(tokens::STATION_ENTRY) {
                    self.record_station(line);
                }
                State::Idle(section)
            }
            Some(Section::Sched) => match line.kind {
                LineKind::ScanOpen(label) => self.open_scan(label, line.number),
                _ => {
                    debug!("Line {}: ignored outside scan block", line.number);
                    State::Idle(section)
                }
            },
            Some(Section::Station) => {
                if line.first() == Some(self.config.target_station.as_str()) {
                    self.record_station(line);
                }
                // one non-blank line per header, comments included
                State::Idle(None)
            }
            _ => State::Idle(section),
        }
    }

    fn open_scan(&mut self, label: &str, line: usize) -> State {
        self.stats.scan_blocks += 1;
        debug!("Line {}: scan {}", line, label);
        State::InScanBlock(ScanBlock::open(label, line))
    }

    fn record_station(&mut self, line: &VexLine<'_>) {
        match (line.field(1), line.field(2)) {
            (Some(code), Some(site)) => {
                debug!("Line {}: station {} is {}", line.number, code, site);
                self.stations.push(StationEntry::new(code, site));
            }
            _ => self.stats.diagnose(
                line.number,
                DiagnosticKind::MalformedField,
                "station entry needs a code and a site name",
            ),
        }
    }

    fn scan_line(&mut self, mut block: ScanBlock, line: &VexLine<'_>) -> State {
        match line.kind {
            LineKind::ScanClose => {
                self.finish_scan(block, line.number);
                State::Idle(Some(Section::Sched))
            }
            LineKind::ScanOpen(label) => {
                self.stats.diagnose(
                    line.number,
                    DiagnosticKind::UnterminatedBlock,
                    format!(
                        "scan {} opened at line {} not closed before scan {}",
                        block.label, block.opened_at, label
                    ),
                );
                self.finish_scan(block, line.number);
                self.open_scan(label, line.number)
            }
            LineKind::Comment => State::InScanBlock(block),
            _ => {
                for assignment in line.assignments() {
                    self.apply_scan_assignment(&mut block, line, &assignment);
                }
                State::InScanBlock(block)
            }
        }
    }

    fn apply_scan_assignment(
        &mut self,
        block: &mut ScanBlock,
        line: &VexLine<'_>,
        assignment: &Assignment<'_>,
    ) {
        match assignment.key {
            keys::START => match decode(assignment.value) {
                Ok(start) => {
                    debug!("Line {}: at {}", line.number, start.normalized());
                    block.start = Some(start);
                }
                Err(e) => {
                    self.stats
                        .diagnose(line.number, DiagnosticKind::MalformedTime, e.to_string())
                }
            },
            keys::SOURCE => {
                let source = assignment.value.trim_end_matches(';');
                if source.is_empty() {
                    self.stats.diagnose(
                        line.number,
                        DiagnosticKind::MalformedField,
                        "source assignment without a value",
                    );
                } else {
                    block.source = Some(source.to_string());
                }
            }
            keys::STATION => {
                let code = assignment
                    .value
                    .split(':')
                    .next()
                    .unwrap_or("")
                    .trim_end_matches(';');

                if code.is_empty() {
                    self.stats.diagnose(
                        line.number,
                        DiagnosticKind::MalformedField,
                        "station assignment without a code",
                    );
                } else if code == self.config.target_station {
                    if let Some(duration) = self.station_duration(line, assignment) {
                        debug!("Line {}: {}s at {}", line.number, duration, code);
                        block.duration = Some(duration);
                    }
                } else if self.config.target_equivalent() == Some(code) {
                    if let Some(duration) = self.station_duration(line, assignment) {
                        debug!(
                            "Line {}: {}s at {} (equivalent of {})",
                            line.number, duration, code, self.config.target_station
                        );
                        block.equivalent_duration = Some(duration);
                    }
                }
            }
            _ => {}
        }
    }

    /// Duration column of a `station=` line
    ///
    /// The duration is the third field after the station value, which is
    /// column 3 when a compact assignment opens the line. Short lines fall back
    /// to column 3.
    fn station_duration(&mut self, line: &VexLine<'_>, assignment: &Assignment<'_>) -> Option<u64> {
        let raw = line
            .field(assignment.value_index + STATION_DURATION_FIELD)
            .or_else(|| line.field(STATION_DURATION_FIELD));

        match raw.map(|r| (r, r.parse::<u64>())) {
            Some((_, Ok(duration))) => Some(duration),
            Some((r, Err(_))) => {
                self.stats.diagnose(
                    line.number,
                    DiagnosticKind::MalformedField,
                    format!("station duration '{}' is not a number", r),
                );
                None
            }
            None => {
                self.stats.diagnose(
                    line.number,
                    DiagnosticKind::MalformedField,
                    "station line has no duration column",
                );
                None
            }
        }
    }

    fn finish_scan(&mut self, block: ScanBlock, line: usize) {
        let direct = block.duration.filter(|d| *d > 0);
        let equivalent = block.equivalent_duration.filter(|d| *d > 0);

        let Some(duration) = direct.or(equivalent) else {
            self.stats.scans_dropped += 1;
            let at = block
                .start
                .as_ref()
                .map_or("unknown time", |s| s.normalized());
            self.stats.diagnose(
                line,
                DiagnosticKind::NoDuration,
                format!("no duration for scan {} at {}", block.label, at),
            );
            return;
        };

        let (Some(start), Some(source)) = (block.start, block.source) else {
            self.stats.scans_dropped += 1;
            self.stats.diagnose(
                line,
                DiagnosticKind::MissingField,
                format!("scan {} has no start time or no source", block.label),
            );
            return;
        };

        match ScanRecord::new(
            &self.config.experiment,
            source,
            &self.config.target_station,
            start,
            duration,
            &block.label,
        ) {
            Ok(scan) => {
                info!(
                    "At {} on {:<10} for {}s at {}.",
                    scan.start_time(),
                    scan.source(),
                    scan.duration(),
                    scan.station()
                );
                self.stats.scans_emitted += 1;
                self.scans.push(scan);
            }
            Err(e) => {
                self.stats.scans_dropped += 1;
                self.stats
                    .diagnose(line, DiagnosticKind::MalformedField, e.to_string());
            }
        }
    }

    fn exper_line(&mut self, line: &VexLine<'_>) -> State {
        match line.kind {
            LineKind::DefClose => State::Idle(None),
            LineKind::Comment => State::InExperBlock,
            _ => {
                for assignment in line.assignments() {
                    self.apply_exper_assignment(line, &assignment);
                }
                State::InExperBlock
            }
        }
    }

    fn apply_exper_assignment(&mut self, line: &VexLine<'_>, assignment: &Assignment<'_>) {
        match assignment.key {
            keys::EXPER_NAME => {
                let name = assignment.value.trim_end_matches(';');
                if name.is_empty() {
                    self.stats.diagnose(
                        line.number,
                        DiagnosticKind::MalformedField,
                        "exper_name without a value",
                    );
                } else {
                    self.meta.name = name.to_string();
                }
            }
            keys::EXPER_NOMINAL_START | keys::EXPER_NOMINAL_STOP => {
                match decode(assignment.value) {
                    Ok(time) => {
                        debug!("Line {}: {} is {}", line.number, assignment.key, time);
                        if assignment.key == keys::EXPER_NOMINAL_START {
                            self.meta.nominal_start = time.normalized().to_string();
                        } else {
                            self.meta.nominal_stop = time.normalized().to_string();
                        }
                    }
                    Err(e) => self.stats.diagnose(
                        line.number,
                        DiagnosticKind::MalformedTime,
                        e.to_string(),
                    ),
                }
            }
            _ => {}
        }
    }
}
