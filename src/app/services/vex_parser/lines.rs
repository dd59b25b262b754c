//! Line classification for schedule files
//!
//! Every input line is split on whitespace and tagged with what it means to
//! the parser (section header, comment, scan delimiters, plain content). The
//! classifier is lazy and holds no state: re-running it over the same text
//! yields the same sequence.

use crate::constants::{sections, tokens};
use std::fmt;

/// Sections the parser recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Sked,
    Sources,
    Stations,
    Sched,
    Station,
    Exper,
    Codes,
}

impl Section {
    /// Section introduced by a header token, if `token` is one
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            sections::SKED => Some(Section::Sked),
            sections::SOURCES => Some(Section::Sources),
            sections::STATIONS => Some(Section::Stations),
            sections::SCHED => Some(Section::Sched),
            sections::STATION => Some(Section::Station),
            sections::EXPER => Some(Section::Exper),
            sections::CODES => Some(Section::Codes),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Section::Sked => sections::SKED,
            Section::Sources => sections::SOURCES,
            Section::Stations => sections::STATIONS,
            Section::Sched => sections::SCHED,
            Section::Station => sections::STATION,
            Section::Exper => sections::EXPER,
            Section::Codes => sections::CODES,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The classification of a schedule line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only
    Blank,

    /// One of the section header tokens
    Header(Section),

    /// Any other `$` section header, e.g. `$MODE;`
    ForeignHeader(&'a str),

    /// First field starts with `*`
    Comment,

    /// `scan <label>;` with the trailing `;` removed from the label
    ScanOpen(&'a str),

    /// `endscan;`
    ScanClose,

    /// `enddef;`
    DefClose,

    /// Anything else
    Content,
}

/// A `key=value` assignment found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub key: &'a str,

    /// Raw value, trailing delimiters included
    pub value: &'a str,

    /// Whitespace field the assignment starts at
    pub field_index: usize,

    /// Whitespace field holding the value
    pub value_index: usize,
}

/// One classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VexLine<'a> {
    /// 1-based line number
    pub number: usize,
    pub fields: Vec<&'a str>,
    pub kind: LineKind<'a>,
}

impl<'a> VexLine<'a> {
    pub fn classify(number: usize, text: &'a str) -> Self {
        let fields: Vec<&str> = text.split_whitespace().collect();

        let kind = match fields.first() {
            None => LineKind::Blank,
            Some(first) => {
                if let Some(section) = Section::from_token(first) {
                    LineKind::Header(section)
                } else if first.starts_with(tokens::SECTION_PREFIX) {
                    LineKind::ForeignHeader(first)
                } else if first.starts_with(tokens::COMMENT) {
                    LineKind::Comment
                } else if *first == tokens::SCAN_OPEN {
                    let label = fields.get(1).map_or("", |l| l.trim_end_matches(';'));
                    LineKind::ScanOpen(label)
                } else if *first == tokens::SCAN_CLOSE {
                    LineKind::ScanClose
                } else if *first == tokens::DEF_CLOSE {
                    LineKind::DefClose
                } else {
                    LineKind::Content
                }
            }
        };

        Self {
            number,
            fields,
            kind,
        }
    }

    pub fn first(&self) -> Option<&'a str> {
        self.fields.first().copied()
    }

    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Every assignment on the line, in field order
    ///
    /// Accepts `key=value`, `key= value` and `key = value`. The value is
    /// empty when the line ends before one is given.
    pub fn assignments(&self) -> Vec<Assignment<'a>> {
        let mut found = Vec::new();
        let mut index = 0;

        while index < self.fields.len() {
            let field = self.fields[index];
            let start = index;

            if let Some((key, value)) = field.split_once('=') {
                if value.is_empty() {
                    // `key= value`
                    let value = self.field(index + 1).unwrap_or("");
                    found.push(Assignment {
                        key,
                        value,
                        field_index: start,
                        value_index: start + 1,
                    });
                    index += 2;
                } else {
                    found.push(Assignment {
                        key,
                        value,
                        field_index: start,
                        value_index: start,
                    });
                    index += 1;
                }
                continue;
            }

            match self.field(index + 1) {
                Some("=") => {
                    // `key = value`
                    found.push(Assignment {
                        key: field,
                        value: self.field(index + 2).unwrap_or(""),
                        field_index: start,
                        value_index: start + 2,
                    });
                    index += 3;
                }
                Some(next) if next.starts_with('=') => {
                    // `key =value`
                    found.push(Assignment {
                        key: field,
                        value: &next[1..],
                        field_index: start,
                        value_index: start + 1,
                    });
                    index += 2;
                }
                _ => index += 1,
            }
        }

        found
    }
}

/// Classify `content` line by line
pub fn classify(content: &str) -> impl Iterator<Item = VexLine<'_>> {
    content
        .lines()
        .enumerate()
        .map(|(i, text)| VexLine::classify(i + 1, text))
}
