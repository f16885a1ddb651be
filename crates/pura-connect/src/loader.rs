/// Loads the internship catalog.
///
/// The dataset ships inside the binary (`data/internships.json`); a file named
/// by `PURA_CATALOG_PATH` can replace it. Either way the result is validated
/// once and never mutated afterwards.
use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::InternshipRecord;

pub const BUNDLED_CATALOG: &str = include_str!("../data/internships.json");

/// An immutable, validated record set plus the fingerprint of its source bytes.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<InternshipRecord>,
    fingerprint: String,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let records = parse_records(json)?;
        Ok(Self {
            records,
            fingerprint: catalog_fingerprint(json),
        })
    }

    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load from `path` when given, otherwise the bundled dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalog = Self::from_json(&json)?;
                info!(path = %path.display(), records = catalog.len(), "loaded catalog from file");
                Ok(catalog)
            }
            None => {
                let catalog = Self::bundled()?;
                info!(records = catalog.len(), "loaded bundled catalog");
                Ok(catalog)
            }
        }
    }

    pub fn records(&self) -> &[InternshipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hex SHA-256 of the source JSON; changes whenever the dataset does.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Case-insensitive lookup by listing id.
    pub fn get(&self, id: &str) -> Option<&InternshipRecord> {
        let id = id.trim();
        self.records.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }
}

/// Parse a JSON array of records, preserving file order.
///
/// Fails on malformed JSON, blank ids, or ids repeated (case-insensitively).
pub fn parse_records(json: &str) -> Result<Vec<InternshipRecord>, AppError> {
    let records: Vec<InternshipRecord> =
        serde_json::from_str(json).map_err(|e| AppError::Parse(e.to_string()))?;

    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(AppError::Parse(format!("record {index} has an empty id")));
        }
        if !seen.insert(id.to_ascii_lowercase()) {
            return Err(AppError::DuplicateId(id.to_string()));
        }
        if record.title.is_empty() {
            warn!(id, "record has no title");
        }
        if record.domain.is_empty() {
            warn!(id, "record has no domain, grouping under Other");
        }
    }

    Ok(records)
}

pub fn catalog_fingerprint(json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}
