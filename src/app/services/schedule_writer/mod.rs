//! Schedule document emission and read-back
//!
//! The parser's output becomes a small XML document: one `<experiment>` header
//! element, an optional backend `<config>` element and one `<scan>` element per
//! retained scan, in schedule order. Observation control software reads this
//! document to decide when to record.
//!
//! - [`writer`] - [`ScheduleDocument`] and the [`ScheduleWriter`] that emits it
//! - [`reader`] - parses an emitted document back for inspection
//!
//! # Basic Usage
//!
//! ```rust
//! use vex_schedule::app::services::schedule_writer::{ScheduleDocument, ScheduleWriter};
//! use vex_schedule::app::services::vex_parser::VexParser;
//! use vex_schedule::config::ScheduleConfig;
//!
//! let config = ScheduleConfig::new("Az").with_experiment("e16b08");
//! let result = VexParser::new(&config).parse_str("$SCHED;\n$CODES\n");
//!
//! let document = ScheduleDocument::from_parse(&config, result);
//! let xml = ScheduleWriter::to_xml_string(&document);
//! assert!(xml.starts_with("<experiment name=\"e16b08\" station=\"Az\""));
//! ```

pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use reader::{read_schedule_file, read_schedule_str, unescape_attribute};
pub use writer::{ScheduleDocument, ScheduleHeader, ScheduleWriter, escape_attribute};
