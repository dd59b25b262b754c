//! VEX Schedule Library
//!
//! Turns a radio-telescope observing schedule (VEX, or the older SKED layout)
//! into the per-station scan schedule that recorder control consumes.
//!
//! This library provides tools for:
//! - Classifying schedule lines and walking the section state machine
//! - Decoding `2016y045d10h30m00s` time tokens into pseudo-timestamps and
//!   calendar instants
//! - Resolving station codes and colocated-station equivalences
//! - Emitting and reading back the XML scan schedule

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ExperimentMeta, ScanRecord, StationEntry};
pub use app::services::schedule_writer::{ScheduleDocument, ScheduleWriter};
pub use app::services::station_registry::StationRegistry;
pub use app::services::vex_parser::{ParseResult, VexParser};
pub use config::{BackendConfig, ScheduleConfig};
pub use error::{Error, Result};
