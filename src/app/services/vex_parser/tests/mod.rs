//! Shared test utilities and fixtures for VEX parser tests

use crate::app::services::vex_parser::{ParseResult, VexParser};
use crate::config::ScheduleConfig;

pub mod sked_tests;

/// Experiment label used by the fixtures
pub const TEST_EXPERIMENT: &str = "e16b08";

/// A small but realistic VEX schedule with two scans for Az and one for Hi
pub const SAMPLE_VEX: &str = r#"VEX_rev = 1.5;
*    SCHED vex generated for testing
$GLOBAL;
     ref $EXPER = e16b08;
$EXPER;
*
def e16b08;
     exper_name = e16b08;
     exper_description = "EHT test";
     exper_nominal_start=2016y045d00h00m00s;
     exper_nominal_stop=2016y046d00h00m00s;
enddef;
$STATION;
Az SMT SMTO
$SCHED;
*
scan No0001;
     start=2016y045d10h30m00s; mode=eht_1mm; source=3C84;
*              :data_good:data_stop:goto_foot: pass:  wrap :driv
     station=Az:    0 sec:   60 sec:    0.000 GB:   :       : 1;
     station=Hi:    0 sec:  120 sec:    0.000 GB:   :       : 1;
endscan;
scan No0002;
     start=2016y045d10h35m00s; mode=eht_1mm; source=SGRA;
     station=Hi:    0 sec:  300 sec:    0.000 GB:   :       : 1;
endscan;
scan No0003;
     start=2016y045d10h45m30s; mode=eht_1mm; source=M87;
     station=Az:    0 sec:  420 sec:    0.000 GB:   :       : 1;
endscan;
$CODES
"#;

pub fn config_for(station: &str) -> ScheduleConfig {
    ScheduleConfig::new(station).with_experiment(TEST_EXPERIMENT)
}

pub fn parse_for(station: &str, content: &str) -> ParseResult {
    let config = config_for(station);
    VexParser::new(&config).parse_str(content)
}

/// Wrap scan lines in a minimal `$SCHED;` block terminated by `$CODES`
pub fn sched_block(body: &str) -> String {
    format!("$SCHED;\nscan s1;\n{}\nendscan;\n$CODES\n", body)
}
