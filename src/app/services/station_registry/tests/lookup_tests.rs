//! Tests for station code lookups and registration

use super::registry_with;
use crate::app::models::StationEntry;
use crate::app::services::station_registry::StationRegistry;
use proptest::prelude::*;

#[test]
fn test_builtin_table_loaded() {
    let registry = StationRegistry::with_builtin();
    assert_eq!(registry.station_count(), 20);
    assert_eq!(registry.resolve("Az"), "SMTO");
    assert_eq!(registry.resolve("K5"), "CARMACMP");
    assert_eq!(registry.resolve("SP"), "smaphas");
}

/// Purpose: Unknown codes degrade to passthrough rather than failing
/// Benefit: Schedules for stations never seen before can still be converted
#[test]
fn test_resolve_unknown_code_passes_through() {
    let registry = StationRegistry::with_builtin();
    assert_eq!(registry.get("Zz"), None);
    assert_eq!(registry.resolve("Zz"), "Zz");
}

#[test]
fn test_resolve_empty_code_is_never_empty() {
    let registry = StationRegistry::new();
    assert_eq!(registry.resolve(""), "unknown");
}

#[test]
fn test_register_is_idempotent_and_overwrites() {
    let mut registry = registry_with(&[("Zz", "SLEEPY")]);
    registry.register("Zz", "SLEEPY");
    assert_eq!(registry.station_count(), 1);

    registry.register("Zz", "DOPEY");
    assert_eq!(registry.resolve("Zz"), "DOPEY");
    assert_eq!(registry.station_count(), 1);
}

#[test]
fn test_absorb_discovered_entries() {
    let mut registry = registry_with(&[("Az", "SMTO")]);
    let discovered = vec![
        StationEntry::new("Az", "SMT"),
        StationEntry::new("Pv", "PICOVEL"),
    ];
    registry.absorb(&discovered);

    assert_eq!(registry.resolve("Az"), "SMT");
    assert_eq!(registry.resolve("Pv"), "PICOVEL");
}

#[test]
fn test_entries_sorted_by_code() {
    let registry = registry_with(&[("Hi", "JCMTSMA"), ("Az", "SMTO"), ("Ca", "CARMA")]);
    let codes: Vec<String> = registry.entries().into_iter().map(|e| e.code).collect();
    assert_eq!(codes, vec!["Az", "Ca", "Hi"]);
}

proptest! {
    #[test]
    fn prop_resolve_is_total(code in "[A-Za-z0-9]{0,4}") {
        let registry = StationRegistry::with_builtin();
        prop_assert!(!registry.resolve(&code).is_empty());
    }
}
