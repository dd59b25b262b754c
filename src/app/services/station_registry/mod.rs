//! Station registry service for station-code lookups
//!
//! This module maps two-letter station codes to site/feed names and keeps the
//! equivalence table used when a station's schedule entries are recorded under
//! a colocated code. The registry is built once before parsing (built-in table
//! plus command-line overrides) and handed to the parser by reference.

use crate::app::models::StationEntry;
use crate::constants::{BUILTIN_EQUIVALENCES, BUILTIN_STATIONS, UNKNOWN_SITE};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Station registry providing code to site-name lookups and code equivalences
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    /// Site names indexed by station code
    pub(crate) stations: HashMap<String, String>,

    /// Secondary code -> canonical code
    pub(crate) equivalences: HashMap<String, String>,
}

impl StationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in station and equivalence tables
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for (code, site) in BUILTIN_STATIONS {
            registry.register(*code, *site);
        }
        for (secondary, canonical) in BUILTIN_EQUIVALENCES {
            registry
                .equivalences
                .insert(secondary.to_string(), canonical.to_string());
        }
        registry
    }

    /// Site name registered for `code`, if any
    pub fn get(&self, code: &str) -> Option<&str> {
        self.stations.get(code).map(String::as_str)
    }

    /// Site name for `code`, falling back to the code itself when unknown
    ///
    /// Never returns an empty string: an empty code resolves to `"unknown"`.
    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        match self.get(code) {
            Some(site) => site,
            None if code.is_empty() => UNKNOWN_SITE,
            None => code,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.stations.contains_key(code)
    }

    /// Insert or overwrite a station
    pub fn register(&mut self, code: impl Into<String>, site_name: impl Into<String>) {
        let code = code.into();
        let site_name = site_name.into();
        debug!("Registering station {} -> {}", code, site_name);
        self.stations.insert(code, site_name);
    }

    /// Register every entry, overwriting existing codes
    pub fn absorb<'a>(&mut self, entries: impl IntoIterator<Item = &'a StationEntry>) {
        for entry in entries {
            self.register(entry.code.clone(), entry.site_name.clone());
        }
    }

    /// Canonical code `code` is equivalent to, if one is declared
    pub fn equivalent_of(&self, code: &str) -> Option<&str> {
        self.equivalences.get(code).map(String::as_str)
    }

    /// Declare `secondary` equivalent to `canonical`
    ///
    /// Re-declaring an existing pair is a no-op and a new canonical code
    /// replaces the old one. Self-mappings and insertions that would close a
    /// cycle are rejected so lookups never loop.
    pub fn add_equivalence(
        &mut self,
        secondary: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Result<()> {
        let secondary = secondary.into();
        let canonical = canonical.into();

        if secondary == canonical {
            return Err(Error::invalid_equivalence(
                secondary,
                canonical,
                "a code cannot be equivalent to itself",
            ));
        }

        let mut cursor = canonical.as_str();
        let mut hops = 0;
        while let Some(next) = self.equivalent_of(cursor) {
            if next == secondary {
                return Err(Error::invalid_equivalence(
                    secondary,
                    canonical,
                    "declaration would create a cycle",
                ));
            }
            cursor = next;
            hops += 1;
            if hops > self.equivalences.len() {
                break;
            }
        }

        debug!("Treating {} like {}", secondary, canonical);
        self.equivalences.insert(secondary, canonical);
        Ok(())
    }

    /// Declare `secondary` equivalent to `canonical`, replacing the existing
    /// pair that would otherwise close a cycle
    ///
    /// Returns the pair that was dropped, if any. Self-mappings are still
    /// rejected.
    pub fn override_equivalence(
        &mut self,
        secondary: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Result<Option<(String, String)>> {
        let secondary = secondary.into();
        let canonical = canonical.into();
        let mut dropped = None;

        if secondary != canonical {
            let mut cursor = canonical.clone();
            for _ in 0..=self.equivalences.len() {
                match self.equivalent_of(&cursor).map(str::to_string) {
                    Some(next) if next == secondary => {
                        debug!("Dropping equivalence {} -> {}", cursor, next);
                        self.equivalences.remove(&cursor);
                        dropped = Some((cursor, next));
                        break;
                    }
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }

        self.add_equivalence(secondary, canonical)?;
        Ok(dropped)
    }

    /// Number of registered stations
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// All stations sorted by code
    pub fn entries(&self) -> Vec<StationEntry> {
        let mut entries: Vec<StationEntry> = self
            .stations
            .iter()
            .map(|(code, site)| StationEntry::new(code.clone(), site.clone()))
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// All equivalences sorted by secondary code
    pub fn equivalences(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .equivalences
            .iter()
            .map(|(secondary, canonical)| (secondary.clone(), canonical.clone()))
            .collect();
        pairs.sort();
        pairs
    }
}
