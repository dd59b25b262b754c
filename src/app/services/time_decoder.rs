//! VEX time-token decoding
//!
//! VEX writes instants as `2016y045d10h30m00s`. The schedule output uses the
//! digit groups concatenated in y-d-h-m-s order (`2016045103000`) as a
//! pseudo-timestamp: it orders correctly and downstream consumers re-read it
//! with `%Y%j%H%M%S`, but adding seconds to it is not calendar arithmetic.
//! [`VexTime::to_datetime`] gives the real instant where that matters.

use crate::constants::sked::CENTURY;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

const MARKERS: [char; 5] = ['y', 'd', 'h', 'm', 's'];

static SKED_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})(\d{3})(\d{2})(\d{2})(\d{2})$").expect("valid SKED time pattern")
});

static SCAN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})-(\d{2})(\d{2})$").expect("valid scan name pattern"));

/// A decoded schedule instant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VexTime {
    year: u32,
    day_of_year: u32,
    hour: u32,
    minute: u32,
    second: u32,
    normalized: String,
}

impl VexTime {
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// Digit groups concatenated in y-d-h-m-s order, exactly as written
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Integer value of [`normalized`](Self::normalized)
    pub fn pseudo_timestamp(&self) -> Result<u64> {
        self.normalized.parse().map_err(|_| {
            Error::malformed_time(&self.normalized, "too many digits for a pseudo-timestamp")
        })
    }

    /// Scan name in `DDD-HHMM` form
    pub fn scan_name(&self) -> String {
        format!("{:03}-{:02}{:02}", self.day_of_year, self.hour, self.minute)
    }

    /// The calendar instant this time refers to (UTC)
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let year = i32::try_from(self.year).map_err(|_| self.calendar_error())?;
        NaiveDate::from_yo_opt(year, self.day_of_year)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| self.calendar_error())
    }

    /// Re-read a schedule document `start_time` alongside its `DDD-HHMM` scan name
    ///
    /// Unpadded VEX tokens concatenate to fewer than 13 digits, so the digit
    /// groups are split where the day, hour and minute agree with the scan
    /// name. The value is kept verbatim as the normalized form.
    pub fn from_written(value: &str, scan_name: &str) -> Result<Self> {
        let value = value.trim();
        let caps = SCAN_NAME.captures(scan_name.trim()).ok_or_else(|| {
            Error::malformed_time(value, format!("scan name '{scan_name}' is not DDD-HHMM"))
        })?;
        let day_of_year = parse_group(value, &caps[1])?;
        let hour = parse_group(value, &caps[2])?;
        let minute = parse_group(value, &caps[3])?;

        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            for (year, rest) in leading_groups(value, 4) {
                for (day, rest) in leading_groups(rest, 3) {
                    if day != day_of_year {
                        continue;
                    }
                    for (h, rest) in leading_groups(rest, 2) {
                        if h != hour {
                            continue;
                        }
                        for (m, rest) in leading_groups(rest, 2) {
                            if m == minute && (1..=2).contains(&rest.len()) {
                                return Ok(Self {
                                    year,
                                    day_of_year,
                                    hour,
                                    minute,
                                    second: parse_group(value, rest)?,
                                    normalized: value.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        Err(Error::malformed_time(
            value,
            format!("digits do not agree with scan name {scan_name}"),
        ))
    }

    fn calendar_error(&self) -> Error {
        Error::Calendar {
            token: self.to_string(),
        }
    }
}

impl fmt::Display for VexTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}y{:03}d{:02}h{:02}m{:02}s",
            self.year, self.day_of_year, self.hour, self.minute, self.second
        )
    }
}

/// Decode a VEX time token such as `2016y045d10h30m00s;`
///
/// Each field must be digits immediately before its marker, markers in the
/// fixed order y, d, h, m, s. A trailing `;` is tolerated.
pub fn decode(token: &str) -> Result<VexTime> {
    let trimmed = token.trim().trim_end_matches(';');
    let mut rest = trimmed;
    let mut groups: Vec<&str> = Vec::with_capacity(MARKERS.len());

    for marker in MARKERS {
        let idx = rest
            .find(marker)
            .ok_or_else(|| Error::malformed_time(token, format!("missing '{marker}' marker")))?;
        let group = &rest[..idx];
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed_time(
                token,
                format!("field before '{marker}' is not numeric"),
            ));
        }
        groups.push(group);
        rest = &rest[idx + 1..];
    }

    if !rest.is_empty() {
        return Err(Error::malformed_time(
            token,
            format!("unexpected trailing text '{rest}'"),
        ));
    }

    Ok(VexTime {
        year: parse_group(token, groups[0])?,
        day_of_year: parse_group(token, groups[1])?,
        hour: parse_group(token, groups[2])?,
        minute: parse_group(token, groups[3])?,
        second: parse_group(token, groups[4])?,
        normalized: groups.concat(),
    })
}

/// Decode the legacy SKED `YYDDDHHMMSS` layout; years are taken as 20YY
pub fn decode_sked(token: &str) -> Result<VexTime> {
    let caps = SKED_TIME
        .captures(token.trim())
        .ok_or_else(|| Error::malformed_time(token, "expected 11 digits in YYDDDHHMMSS layout"))?;

    let year = CENTURY + parse_group(token, &caps[1])?;
    let normalized = format!("{}{}{}{}{}", year, &caps[2], &caps[3], &caps[4], &caps[5]);

    Ok(VexTime {
        year,
        day_of_year: parse_group(token, &caps[2])?,
        hour: parse_group(token, &caps[3])?,
        minute: parse_group(token, &caps[4])?,
        second: parse_group(token, &caps[5])?,
        normalized,
    })
}

/// Leading digit groups of `text` up to `widest` digits, widest first, with the rest
fn leading_groups(text: &str, widest: usize) -> impl Iterator<Item = (u32, &str)> {
    (1..=widest.min(text.len()))
        .rev()
        .filter(move |width| text.len() > *width)
        .filter_map(move |width| Some((text[..width].parse().ok()?, &text[width..])))
}

fn parse_group(token: &str, group: &str) -> Result<u32> {
    group
        .parse()
        .map_err(|_| Error::malformed_time(token, format!("field '{group}' out of range")))
}
