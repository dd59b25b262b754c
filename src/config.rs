//! Configuration management
//!
//! [`ScheduleConfig`] carries everything the parser needs for one extraction:
//! the target station, the experiment label stamped on every scan and the
//! station registry (built-in table plus command-line overrides). It is built
//! once at startup and passed to the parser by reference.
//!
//! [`BackendConfig`] holds the optional recorder backend element that can be
//! written alongside the schedule.

use crate::app::services::station_registry::StationRegistry;
use crate::constants::{UNSET_SENTINEL, backend};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parser configuration for a single target station
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Two-letter code of the station whose scans are extracted
    pub target_station: String,

    /// Experiment label written on the header and on every scan
    pub experiment: String,

    /// Station names and equivalences
    pub registry: StationRegistry,
}

impl ScheduleConfig {
    /// Configuration for `target_station` using the built-in registry
    pub fn new(target_station: impl Into<String>) -> Self {
        Self {
            target_station: target_station.into(),
            experiment: UNSET_SENTINEL.to_string(),
            registry: StationRegistry::with_builtin(),
        }
    }

    /// Set the experiment label
    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = experiment.into();
        self
    }

    /// Replace the station registry
    pub fn with_registry(mut self, registry: StationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Canonical code the target station's durations may be recorded under
    pub fn target_equivalent(&self) -> Option<&str> {
        self.registry.equivalent_of(&self.target_station)
    }

    /// Site name of the target station
    pub fn target_site(&self) -> &str {
        self.registry.resolve(&self.target_station)
    }
}

/// Recorder backend addresses written as a `<config>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Firmware personality loaded on the digital backend
    pub personality: String,

    /// Input channel selection
    pub ioch: String,

    pub rdbe_ip: String,
    pub mark5c_ip: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            personality: backend::DEFAULT_PERSONALITY.to_string(),
            ioch: backend::DEFAULT_IOCH.to_string(),
            rdbe_ip: backend::DEFAULT_RDBE_IP.to_string(),
            mark5c_ip: backend::DEFAULT_MK5C_IP.to_string(),
        }
    }
}

impl BackendConfig {
    /// Read the backend addresses from the `rdbe` and `mk5c` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(backend::RDBE_ENV).filter(|v| !v.trim().is_empty()) {
            Some(ip) => config.rdbe_ip = ip.trim().to_string(),
            None => debug!(
                "{} not set, using fallback {}",
                backend::RDBE_ENV,
                config.rdbe_ip
            ),
        }

        match lookup(backend::MK5C_ENV).filter(|v| !v.trim().is_empty()) {
            Some(ip) => config.mark5c_ip = ip.trim().to_string(),
            None => debug!(
                "{} not set, using fallback {}",
                backend::MK5C_ENV,
                config.mark5c_ip
            ),
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_schedule_config_builder() {
        let config = ScheduleConfig::new("A1").with_experiment("e16b08");
        assert_eq!(config.target_station, "A1");
        assert_eq!(config.experiment, "e16b08");
        assert_eq!(config.target_equivalent(), Some("Az"));
        assert_eq!(config.target_site(), "SMTOLW");
    }

    #[test]
    fn test_schedule_config_custom_registry() {
        let config = ScheduleConfig::new("Az").with_registry(StationRegistry::new());
        assert_eq!(config.target_equivalent(), None);
        assert_eq!(config.target_site(), "Az");
    }

    #[test]
    fn test_backend_fallbacks() {
        let config = BackendConfig::from_lookup(|_| None);
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.rdbe_ip, "192.52.61.191");
        assert_eq!(config.mark5c_ip, "192.52.61.132");
    }

    #[test]
    fn test_backend_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([("rdbe", "10.0.0.1"), ("mk5c", " ")]);
        let config = BackendConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.rdbe_ip, "10.0.0.1");
        // blank values fall back
        assert_eq!(config.mark5c_ip, "192.52.61.132");
    }
}
