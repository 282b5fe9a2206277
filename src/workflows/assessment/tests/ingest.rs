use super::common::*;
use crate::workflows::assessment::domain::AttributeValue;
use crate::workflows::assessment::ingest::{records_from_csv, records_from_json, IngestError};

const CSV_EXPORT: &str = "\
vendor_id,criterion_id,raw_text,numeric,compliant,extraction_confidence
acme,architecture,modular microservice design,85,,0.9
acme,security_compliance,holds ISO27001 and SOC2,,true,0.95
globex,architecture,monolith with partial docs,60,,0.7
";

#[test]
fn csv_rows_parse_with_empty_cells_as_none() {
    let records = records_from_csv(CSV_EXPORT.as_bytes()).expect("csv parses");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].vendor_id, vendor("acme"));
    assert_eq!(records[0].numeric, Some(85.0));
    assert_eq!(records[0].compliant, None);
    assert_eq!(records[1].numeric, None);
    assert_eq!(records[1].compliant, Some(true));
}

#[test]
fn malformed_csv_row_is_an_error() {
    let broken = "\
vendor_id,criterion_id,raw_text,numeric,compliant,extraction_confidence
acme,architecture,fine,not-a-number,,0.9
";
    assert!(matches!(
        records_from_csv(broken.as_bytes()),
        Err(IngestError::Csv(_))
    ));
}

#[test]
fn json_array_parses_into_records() {
    let payload = r#"[
        {
            "vendor_id": "acme",
            "criterion_id": "tco",
            "raw_text": "3-year TCO of 500k",
            "numeric": 500000.0,
            "extraction_confidence": 0.8
        }
    ]"#;

    let records = records_from_json(payload).expect("json parses");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].criterion_id, criterion_id("tco"));
    assert_eq!(records[0].compliant, None);
}

#[test]
fn records_become_evidence_with_typed_attributes() {
    let (vendor_id, criterion, evidence) =
        record("acme", "tco", Some(42.0), Some(true), 1.5).into_evidence();

    assert_eq!(vendor_id, vendor("acme"));
    assert_eq!(criterion, criterion_id("tco"));
    assert_eq!(
        evidence.attributes.get("numeric"),
        Some(&AttributeValue::Numeric(42.0))
    );
    assert_eq!(
        evidence.attributes.get("compliant"),
        Some(&AttributeValue::Flag(true))
    );
    // Confidence is clamped into [0, 1] at construction.
    assert_eq!(evidence.extraction_confidence, 1.0);
}

#[test]
fn evidence_signals_prefer_typed_attributes() {
    let evidence = numeric_evidence(12.0, 0.5);
    assert_eq!(evidence.numeric_signal(), Some(12.0));
    assert_eq!(evidence.compliance_signal(), None);

    let evidence = compliance_evidence(false, 0.5);
    assert_eq!(evidence.compliance_signal(), Some(false));
    assert_eq!(evidence.numeric_signal(), None);
}
