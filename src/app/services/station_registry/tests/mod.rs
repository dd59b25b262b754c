//! Shared test utilities and fixtures for station registry tests

use crate::app::services::station_registry::StationRegistry;

pub mod lookup_tests;

/// Registry with only the given stations and no equivalences
pub fn registry_with(stations: &[(&str, &str)]) -> StationRegistry {
    let mut registry = StationRegistry::new();
    for (code, site) in stations {
        registry.register(*code, *site);
    }
    registry
}
