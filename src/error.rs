//! Error handling for VEX schedule operations.
//!
//! Hard failures only: everything the parser can recover from on a per-line
//! basis is reported as a [`Diagnostic`](crate::app::services::vex_parser::Diagnostic)
//! instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to an output sink failed
    #[error("Write error: {0}")]
    Write(#[source] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Time token that does not follow the `<y>y<d>d<h>h<m>m<s>s` layout
    #[error("Malformed time token '{token}': {reason}")]
    MalformedTime { token: String, reason: String },

    #[error("Malformed field '{field}': {reason}")]
    MalformedField { field: String, reason: String },

    #[error("Invalid station code '{code}'")]
    InvalidStationCode { code: String },

    #[error("Equivalence {secondary} -> {canonical} rejected: {reason}")]
    InvalidEquivalence {
        secondary: String,
        canonical: String,
        reason: String,
    },

    /// Day-of-year/time fields that do not map onto a calendar instant
    #[error("Time '{token}' is not a valid calendar instant")]
    Calendar { token: String },

    #[error("Invalid schedule document: {reason}")]
    InvalidDocument { reason: String },
}

impl Error {
    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed_time(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTime {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_equivalence(
        secondary: impl Into<String>,
        canonical: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEquivalence {
            secondary: secondary.into(),
            canonical: canonical.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
