//! Tests for reading emitted schedules back

use super::sample_document;
use crate::Error;
use crate::app::services::schedule_writer::{
    ScheduleDocument, ScheduleWriter, read_schedule_file, read_schedule_str,
};
use crate::app::services::vex_parser::VexParser;
use crate::config::{BackendConfig, ScheduleConfig};
use tempfile::TempDir;

#[test]
fn test_read_back_emitted_document() {
    let original = sample_document().with_backend(BackendConfig::default());
    let xml = ScheduleWriter::to_xml_string(&original);

    let document = read_schedule_str(&xml).unwrap();
    assert_eq!(document.header, original.header);
    assert_eq!(document.backend, Some(BackendConfig::default()));
    assert_eq!(document.scan_count(), 2);

    let scan = &document.scans[1];
    assert_eq!(scan.source(), "M87");
    assert_eq!(scan.station(), "Az");
    assert_eq!(scan.start_time(), 2016045104530);
    assert_eq!(scan.duration(), 420);
    assert_eq!(scan.scan_name(), "045-1045");
    assert_eq!(scan.start().to_string(), "2016y045d10h45m30s");

    // emitting the read-back document reproduces the text
    assert_eq!(ScheduleWriter::to_xml_string(&document), xml);
}

/// Purpose: unpadded VEX times written verbatim are read back unchanged
#[test]
fn test_read_back_unpadded_start_time() {
    let config = ScheduleConfig::new("Az").with_experiment("e16b08");
    let result = VexParser::new(&config).parse_str(
        "$SCHED;\nscan No0001;\nstart=2016y045d10h30m0s; source=3C84;\n\
         station=Az:    0 sec:   60 sec:    0.000 GB:   :       : 1;\nendscan;\n",
    );
    assert!(!result.stats.has_diagnostics());

    let original = ScheduleDocument::from_parse(&config, result);
    let xml = ScheduleWriter::to_xml_string(&original);
    assert!(xml.contains("start_time=\"201604510300\""));

    let document = read_schedule_str(&xml).unwrap();
    let scan = &document.scans[0];
    assert_eq!(scan.start_time(), 201604510300);
    assert_eq!(scan.start().to_string(), "2016y045d10h30m00s");
    assert_eq!(scan.scan_name(), "045-1030");
    assert_eq!(ScheduleWriter::to_xml_string(&document), xml);
}

#[test]
fn test_rejects_start_time_disagreeing_with_scan_name() {
    let xml = "<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n\
        <scan experiment=\"e\" source=\"3C84\" station_code=\"Az\" start_time=\"2016045103000\" duration=\"60\" scan_name=\"046-1030\"/>\n\
        </experiment>";
    assert!(matches!(
        read_schedule_str(xml),
        Err(Error::MalformedTime { .. })
    ));
}

#[test]
fn test_rejects_wrong_root() {
    let err = read_schedule_str("<schedule name=\"x\"/>").unwrap_err();
    assert!(matches!(err, Error::InvalidDocument { .. }));
}

#[test]
fn test_rejects_missing_attribute() {
    let xml = "<experiment name=\"e16b08\" station=\"Az\" start=\"0\" end=\"0\">\n\
               \t<scan experiment=\"e16b08\" source=\"3C84\" start_time=\"2016045103000\" duration=\"60\" scan_name=\"045-1030\"/>\n\
               </experiment>\n";
    let err = read_schedule_str(xml).unwrap_err();
    assert!(err.to_string().contains("station_code"));
}

#[test]
fn test_rejects_bad_scan_values() {
    let bad_duration = "<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n\
        <scan experiment=\"e\" source=\"3C84\" station_code=\"Az\" start_time=\"2016045103000\" duration=\"sixty\" scan_name=\"045-1030\"/>\n\
        </experiment>";
    assert!(matches!(
        read_schedule_str(bad_duration),
        Err(Error::InvalidDocument { .. })
    ));

    let bad_time = "<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n\
        <scan experiment=\"e\" source=\"3C84\" station_code=\"Az\" start_time=\"16045\" duration=\"60\" scan_name=\"045-1030\"/>\n\
        </experiment>";
    assert!(matches!(
        read_schedule_str(bad_time),
        Err(Error::MalformedTime { .. })
    ));
}

#[test]
fn test_rejects_malformed_documents() {
    let unclosed_tag = read_schedule_str("<experiment name=\"e\"").unwrap_err();
    assert!(matches!(unclosed_tag, Error::InvalidDocument { .. }));

    let unclosed_root =
        read_schedule_str("<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n").unwrap_err();
    assert!(unclosed_root.to_string().contains("</experiment>"));

    let trailing = read_schedule_str(
        "<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n</experiment>\n<scan/>\n",
    )
    .unwrap_err();
    assert!(trailing.to_string().contains("content after"));

    assert!(read_schedule_str("").is_err());
}

#[test]
fn test_skips_unknown_elements() {
    let xml = "<experiment name=\"e\" station=\"Az\" start=\"0\" end=\"0\">\n\
               \t<note text=\"hand edited\"/>\n\
               </experiment>\n";
    let document = read_schedule_str(xml).unwrap();
    assert_eq!(document.scan_count(), 0);
    assert_eq!(document.header.name, "e");
}

#[test]
fn test_read_schedule_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("e16b08.xml");
    ScheduleWriter::write_file(&sample_document(), &path).unwrap();

    let document = read_schedule_file(&path).unwrap();
    assert_eq!(document.scan_count(), 2);

    let missing = read_schedule_file(&dir.path().join("other.xml")).unwrap_err();
    assert!(matches!(missing, Error::InputNotFound { .. }));
}
