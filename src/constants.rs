//! Application constants for the VEX schedule converter
//!
//! Section tokens, keyed-field names, the built-in station table and the
//! backend fallbacks used when emitting a schedule.

// =============================================================================
// Section Headers
// =============================================================================

/// Section header tokens, matched case-sensitively against a line's first field
pub mod sections {
    /// Legacy SKED scan table
    pub const SKED: &str = "$SKED";
    /// Legacy SKED source list (ignored)
    pub const SOURCES: &str = "$SOURCES";
    /// Legacy SKED station list
    pub const STATIONS: &str = "$STATIONS";

    pub const SCHED: &str = "$SCHED;";
    pub const STATION: &str = "$STATION;";
    pub const EXPER: &str = "$EXPER;";

    /// Terminal marker: nothing after it is schedule content
    pub const CODES: &str = "$CODES";
}

// =============================================================================
// Block Delimiters and Keys
// =============================================================================

pub mod tokens {
    pub const SCAN_OPEN: &str = "scan";
    pub const SCAN_CLOSE: &str = "endscan;";
    pub const DEF_CLOSE: &str = "enddef;";
    pub const COMMENT: char = '*';
    pub const SECTION_PREFIX: char = '$';

    /// Legacy `$STATIONS` entry marker
    pub const STATION_ENTRY: &str = "A";
}

pub mod keys {
    pub const START: &str = "start";
    pub const SOURCE: &str = "source";
    pub const STATION: &str = "station";

    pub const EXPER_NAME: &str = "exper_name";
    pub const EXPER_NOMINAL_START: &str = "exper_nominal_start";
    pub const EXPER_NOMINAL_STOP: &str = "exper_nominal_stop";
}

/// Whitespace field of a `station=` line holding the recording duration
pub const STATION_DURATION_FIELD: usize = 3;

/// Column layout of a legacy SKED scan line
pub mod sked {
    pub const SOURCE_FIELD: usize = 0;
    pub const TIME_FIELD: usize = 4;
    pub const STATIONS_FIELD: usize = 9;
    /// Durations start this many fields after the station list plus one
    /// footage field per station
    pub const DURATION_OFFSET: usize = 2;
    pub const CENTURY: u32 = 2000;
    pub const SCAN_LABEL: &str = "noname";
}

// =============================================================================
// Defaults
// =============================================================================

/// Value used for experiment fields never seen in the schedule
pub const UNSET_SENTINEL: &str = "0";

/// Name returned when resolving an empty station code
pub const UNKNOWN_SITE: &str = "unknown";

/// Site name given to a command-line station that is not in the registry
pub const DEFAULT_SITE_NAME: &str = "site-name";

/// Built-in station table: two-letter code to site/feed name
pub const BUILTIN_STATIONS: &[(&str, &str)] = &[
    ("Az", "SMTO"),
    ("A1", "SMTOLW"),
    ("A2", "SMTOLU"),
    ("A3", "SMTORW"),
    ("A4", "SMTORU"),
    ("Ca", "CARMA"),
    ("K1", "CARMAFLW"),
    ("K2", "CARMAFLU"),
    ("K3", "CARMAFRW"),
    ("K4", "CARMAFRU"),
    ("K5", "CARMACMP"),
    ("Hi", "JCMTSMA"),
    ("H1", "SMALW"),
    ("H2", "SMALU"),
    ("H3", "JCMTRW"),
    ("H4", "JCMTRU"),
    // test names used by older schedules
    ("AZ", "smto"),
    ("Cm", "karma"),
    ("SC", "smacomp"),
    ("SP", "smaphas"),
];

/// Built-in equivalences: feed code to the colocated site code it records under
pub const BUILTIN_EQUIVALENCES: &[(&str, &str)] = &[
    ("A1", "Az"),
    ("A2", "Az"),
    ("A3", "Az"),
    ("A4", "Az"),
    ("K1", "Ca"),
    ("K2", "Ca"),
    ("K3", "Ca"),
    ("K4", "Ca"),
    ("K5", "Ca"),
    ("H1", "Hi"),
    ("H2", "Hi"),
    ("H3", "Hi"),
    ("H4", "Hi"),
];

// =============================================================================
// Backend Configuration
// =============================================================================

pub mod backend {
    pub const RDBE_ENV: &str = "rdbe";
    pub const MK5C_ENV: &str = "mk5c";

    pub const DEFAULT_RDBE_IP: &str = "192.52.61.191";
    pub const DEFAULT_MK5C_IP: &str = "192.52.61.132";

    pub const DEFAULT_PERSONALITY: &str = "PFBG_1_4.bin";
    pub const DEFAULT_IOCH: &str = "1:0-15";
}

/// Extension of emitted schedule documents
pub const SCHEDULE_EXTENSION: &str = "xml";
