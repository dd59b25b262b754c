//! Read an emitted schedule document back into memory
//!
//! Accepts the layout [`ScheduleWriter`](super::ScheduleWriter) produces: the
//! `<experiment>` open tag, one self-closing element per line, then the
//! closing `</experiment>`. This is not a general XML parser.

use super::writer::{ScheduleDocument, ScheduleHeader};
use crate::app::models::ScanRecord;
use crate::app::services::time_decoder::VexTime;
use crate::config::BackendConfig;
use crate::{Error, Result};
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

const ROOT: &str = "experiment";
const SCAN: &str = "scan";
const CONFIG: &str = "config";

static ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<(/?)([A-Za-z_][\w-]*)((?:\s+[A-Za-z_][\w-]*="[^"]*")*)\s*(/?)>$"#)
        .expect("valid element pattern")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w-]*)="([^"]*)""#).expect("valid attribute pattern")
});

/// One tag on one line
#[derive(Debug)]
struct Element<'a> {
    line: usize,
    name: &'a str,
    closing: bool,
    self_closing: bool,
    attributes: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> Element<'a> {
    fn parse(line: usize, text: &'a str) -> Result<Self> {
        let caps = ELEMENT.captures(text).ok_or_else(|| {
            Error::invalid_document(format!("line {}: not a schedule element: {}", line, text))
        })?;

        let name = caps.get(2).map_or("", |m| m.as_str());
        let attributes = caps.get(3).map_or("", |m| m.as_str());

        Ok(Self {
            line,
            name,
            closing: !caps[1].is_empty(),
            self_closing: !caps[4].is_empty(),
            attributes: ATTRIBUTE
                .captures_iter(attributes)
                .filter_map(|a| Some((a.get(1)?.as_str(), unescape_attribute(a.get(2)?.as_str()))))
                .collect(),
        })
    }

    fn required(&self, name: &str) -> Result<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_ref())
            .ok_or_else(|| {
                Error::invalid_document(format!(
                    "line {}: <{}> has no '{}' attribute",
                    self.line, self.name, name
                ))
            })
    }
}

/// Parse schedule XML held in memory
pub fn read_schedule_str(text: &str) -> Result<ScheduleDocument> {
    let mut elements = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| Element::parse(number, line));

    let root = elements
        .next()
        .transpose()?
        .ok_or_else(|| Error::invalid_document("document is empty"))?;
    if root.name != ROOT || root.closing || root.self_closing {
        return Err(Error::invalid_document(format!(
            "line {}: expected <{}> to open the document, found <{}>",
            root.line, ROOT, root.name
        )));
    }

    let header = ScheduleHeader {
        name: root.required("name")?.to_string(),
        station: root.required("station")?.to_string(),
        start: root.required("start")?.to_string(),
        end: root.required("end")?.to_string(),
    };

    let mut backend = None;
    let mut scans = Vec::new();
    let mut closed = false;

    for element in elements {
        let element = element?;
        if closed {
            return Err(Error::invalid_document(format!(
                "line {}: content after </{}>",
                element.line, ROOT
            )));
        }

        match (element.name, element.closing) {
            (ROOT, true) => closed = true,
            (SCAN, false) => scans.push(read_scan(&element)?),
            (CONFIG, false) => {
                backend = Some(BackendConfig {
                    personality: element.required("personality")?.to_string(),
                    ioch: element.required("ioch")?.to_string(),
                    rdbe_ip: element.required("rdbe_ip")?.to_string(),
                    mark5c_ip: element.required("mark5c_ip")?.to_string(),
                })
            }
            (other, _) => debug!("Line {}: skipping <{}>", element.line, other),
        }
    }

    if !closed {
        return Err(Error::invalid_document(format!(
            "document does not end with </{}>",
            ROOT
        )));
    }

    Ok(ScheduleDocument {
        header,
        backend,
        scans,
    })
}

/// Read and parse a schedule document file
pub fn read_schedule_file(path: &Path) -> Result<ScheduleDocument> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = read_schedule_str(&text)?;
    info!(
        "Read {} scans for {} from {}",
        document.scan_count(),
        document.header.station,
        path.display()
    );
    Ok(document)
}

fn read_scan(element: &Element<'_>) -> Result<ScanRecord> {
    let scan_name = element.required("scan_name")?;
    let start = VexTime::from_written(element.required("start_time")?, scan_name)?;

    let duration_text = element.required("duration")?;
    let duration: u64 = duration_text.parse().map_err(|_| {
        Error::invalid_document(format!(
            "line {}: scan duration '{}' is not a number",
            element.line, duration_text
        ))
    })?;

    ScanRecord::new(
        element.required("experiment")?,
        element.required("source")?,
        element.required("station_code")?,
        start,
        duration,
        scan_name,
    )
}

/// Reverse [`escape_attribute`](super::escape_attribute)
pub fn unescape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}
