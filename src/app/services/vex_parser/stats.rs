//! Parsing statistics, diagnostics and result structures
//!
//! Recoverable problems never abort a parse. They are recorded here as
//! [`Diagnostic`]s and logged as they happen.

use crate::app::models::{ExperimentMeta, ScanRecord, StationEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Category of a recoverable parse problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A `key=value` or column that could not be interpreted
    MalformedField,

    /// A time token without the expected markers or digits
    MalformedTime,

    /// A scan block closed without a duration for the target station
    NoDuration,

    /// A scan block without a start time or source
    MissingField,

    /// A block still open at a section header or end of input
    UnterminatedBlock,

    /// A scan with a zero duration
    ZeroDuration,
}

/// One recoverable problem and where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based input line
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Counters for one parse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines handed to the state machine
    pub lines_read: usize,

    /// Scan blocks (or SKED scan lines) encountered
    pub scan_blocks: usize,

    pub scans_emitted: usize,
    pub scans_dropped: usize,

    /// Whether `$CODES` ended the parse before end of input
    pub terminated_by_marker: bool,

    pub diagnostics: Vec<Diagnostic>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic
    pub fn diagnose(&mut self, line: usize, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            kind,
            message: message.into(),
        };
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Everything extracted from one schedule
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub meta: ExperimentMeta,

    /// Scans in schedule order
    pub scans: Vec<ScanRecord>,

    /// Station entries found in `$STATIONS` / `$STATION;` sections
    pub stations: Vec<StationEntry>,

    pub stats: ParseStats,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Total recording time across all scans, in seconds
    pub fn total_duration(&self) -> u64 {
        self.scans.iter().map(ScanRecord::duration).sum()
    }
}
