//! Core schedule services

pub mod schedule_writer;
pub mod station_registry;
pub mod time_decoder;
pub mod vex_parser;
