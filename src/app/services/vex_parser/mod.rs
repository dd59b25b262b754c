//! VEX schedule parser
//!
//! Extracts the scans one station has to record from a VEX (or legacy SKED)
//! schedule.
//!
//! ## Architecture
//!
//! - [`lines`] - Whitespace tokenising and classification of input lines
//! - [`parser`] - Section state machine producing scans and experiment metadata
//! - [`sked`] - Positional records of the legacy `$SKED` table
//! - [`stats`] - Diagnostics, counters and the parse result
//!
//! ## Usage
//!
//! ```rust
//! use vex_schedule::app::services::vex_parser::VexParser;
//! use vex_schedule::config::ScheduleConfig;
//!
//! let config = ScheduleConfig::new("Az").with_experiment("e16b08");
//! let vex = "$SCHED;\n\
//!            scan No0001;\n\
//!            start=2016y045d10h30m00s; mode=m; source=3C84;\n\
//!            station=Az:    0 sec:   60 sec:    0.000 GB:   :       : 1;\n\
//!            endscan;\n";
//!
//! let result = VexParser::new(&config).parse_str(vex);
//! assert_eq!(result.scans.len(), 1);
//! assert_eq!(result.scans[0].scan_name(), "045-1030");
//! ```

pub mod lines;
pub mod parser;
pub mod sked;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use lines::{LineKind, Section, VexLine};
pub use parser::VexParser;
pub use stats::{Diagnostic, DiagnosticKind, ParseResult, ParseStats};
