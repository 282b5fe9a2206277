use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AttributeValue, CriterionId, Evidence, VendorId};

/// Wire form of one extracted fact, as produced by the extraction
/// collaborator (JSON) or exported to CSV for review round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub vendor_id: VendorId,
    pub criterion_id: CriterionId,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub numeric: Option<f64>,
    #[serde(default)]
    pub compliant: Option<bool>,
    pub extraction_confidence: f64,
}

impl EvidenceRecord {
    pub fn into_evidence(self) -> (VendorId, CriterionId, Evidence) {
        let mut evidence = Evidence::new(self.raw_text, self.extraction_confidence);
        if let Some(value) = self.numeric {
            evidence = evidence.with_attribute("numeric", AttributeValue::Numeric(value));
        }
        if let Some(flag) = self.compliant {
            evidence = evidence.with_attribute("compliant", AttributeValue::Flag(flag));
        }
        (self.vendor_id, self.criterion_id, evidence)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read evidence input: {0}")]
    Io(#[from] std::io::Error),
    #[error("evidence JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("evidence CSV is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// Parse a JSON array of evidence records.
pub fn records_from_json(json: &str) -> Result<Vec<EvidenceRecord>, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse evidence rows from a CSV export with a
/// `vendor_id,criterion_id,raw_text,numeric,compliant,extraction_confidence`
/// header. Empty cells become `None`.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<EvidenceRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<EvidenceRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Load records from a path, dispatching on the `.csv` extension.
pub fn records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EvidenceRecord>, IngestError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        records_from_csv(File::open(path)?)
    } else {
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        records_from_json(&contents)
    }
}
