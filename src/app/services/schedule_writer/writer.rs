//! Schedule document model and XML emission

use crate::app::models::{ExperimentMeta, ScanRecord};
use crate::app::services::vex_parser::ParseResult;
use crate::config::{BackendConfig, ScheduleConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Attributes of the `<experiment>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleHeader {
    pub name: String,
    pub station: String,

    /// Normalized nominal start, `"0"` when the schedule gave none
    pub start: String,

    /// Normalized nominal stop, `"0"` when the schedule gave none
    pub end: String,
}

impl ScheduleHeader {
    pub fn from_meta(meta: &ExperimentMeta) -> Self {
        Self {
            name: meta.name.clone(),
            station: meta.station_code.clone(),
            start: meta.nominal_start.clone(),
            end: meta.nominal_stop.clone(),
        }
    }
}

/// Everything written for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub header: ScheduleHeader,

    /// Written as a `<config>` element ahead of the scans when present
    pub backend: Option<BackendConfig>,

    /// Scans in schedule order
    pub scans: Vec<ScanRecord>,
}

impl ScheduleDocument {
    pub fn new(meta: &ExperimentMeta, scans: Vec<ScanRecord>) -> Self {
        Self {
            header: ScheduleHeader::from_meta(meta),
            backend: None,
            scans,
        }
    }

    /// Document for a finished parse, labelled with the configured experiment
    pub fn from_parse(config: &ScheduleConfig, result: ParseResult) -> Self {
        Self::new(&result.meta, result.scans).with_name(config.experiment.clone())
    }

    /// Override the header's experiment name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.header.name = name.into();
        self
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn scan_count(&self) -> usize {
        self.scans.len()
    }
}

/// Emits [`ScheduleDocument`]s as XML text
pub struct ScheduleWriter;

impl ScheduleWriter {
    /// Write `document` to any byte sink
    pub fn write<W: Write>(document: &ScheduleDocument, mut sink: W) -> Result<()> {
        sink.write_all(Self::to_xml_string(document).as_bytes())
            .and_then(|_| sink.flush())
            .map_err(Error::Write)
    }

    /// Render `document` to a string
    pub fn to_xml_string(document: &ScheduleDocument) -> String {
        let header = &document.header;
        let mut xml = format!(
            "<experiment name=\"{}\" station=\"{}\" start=\"{}\" end=\"{}\">\n",
            escape_attribute(&header.name),
            escape_attribute(&header.station),
            escape_attribute(&header.start),
            escape_attribute(&header.end),
        );

        if let Some(backend) = &document.backend {
            xml.push_str(&format!(
                "\t<config personality=\"{}\" ioch=\"{}\" rdbe_ip=\"{}\" mark5c_ip=\"{}\" />\n",
                escape_attribute(&backend.personality),
                escape_attribute(&backend.ioch),
                escape_attribute(&backend.rdbe_ip),
                escape_attribute(&backend.mark5c_ip),
            ));
        }

        for scan in &document.scans {
            xml.push_str(&format!(
                "\t<scan experiment=\"{}\" source=\"{}\" station_code=\"{}\" start_time=\"{}\" duration=\"{}\" scan_name=\"{}\"/>\n",
                escape_attribute(scan.experiment()),
                escape_attribute(scan.source()),
                escape_attribute(scan.station()),
                scan.start_time(),
                scan.duration(),
                escape_attribute(scan.scan_name()),
            ));
        }

        xml.push_str("</experiment>\n");
        xml
    }

    /// Write `document` to `path`, replacing any existing file
    pub fn write_file(document: &ScheduleDocument, path: &Path) -> Result<()> {
        debug!("Opening {} for writing", path.display());
        let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        let sink = std::io::BufWriter::new(file);

        Self::write(document, sink).map_err(|e| match e {
            Error::Write(source) => Error::io(path, source),
            other => other,
        })?;

        info!(
            "Wrote {} scans for {} to {}",
            document.scan_count(),
            document.header.station,
            path.display()
        );
        Ok(())
    }
}

/// Escape a value for use inside a double-quoted XML attribute
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
