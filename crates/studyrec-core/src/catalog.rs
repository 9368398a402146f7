//! In-memory catalog store.
//!
//! Holds the ordered corpus the engine fits over. Records are loaded once,
//! from code, CSV or JSON, and are read-only afterward; clones share the
//! same backing storage.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::types::{MaterialId, MaterialRecord};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Arc<Vec<MaterialRecord>>,
}

impl Catalog {
    pub fn new(records: Vec<MaterialRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !seen.insert(r.id) {
                return Err(Error::DuplicateId(r.id));
            }
        }
        Ok(Self { records: Arc::new(records) })
    }

    /// Loads a catalog file, picking the format from the extension
    /// (`.csv` or `.json`).
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        let records = match ext.as_deref() {
            Some("csv") => Self::read_csv(path)?,
            Some("json") => Self::read_json(path)?,
            _ => {
                return Err(Error::Catalog(format!(
                    "unsupported catalog format: {} (expected .csv or .json)",
                    path.display()
                )))
            }
        };
        info!(path = %path.display(), records = records.len(), "loaded catalog");
        Self::new(records)
    }

    fn read_csv(path: &Path) -> Result<Vec<MaterialRecord>> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
        reader
            .deserialize::<MaterialRecord>()
            .enumerate()
            .map(|(row, rec)| {
                rec.map_err(|e| Error::Catalog(format!("{} row {}: {}", path.display(), row + 1, e)))
            })
            .collect()
    }

    fn read_json(path: &Path) -> Result<Vec<MaterialRecord>> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[MaterialRecord] { &self.records }

    pub fn get(&self, row: usize) -> Option<&MaterialRecord> { self.records.get(row) }

    pub fn find(&self, id: MaterialId) -> Result<&MaterialRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("material id {id}")))
    }

    /// Records whose category contains `needle`, ignoring case, in corpus order.
    pub fn search_by_category(&self, needle: &str) -> Vec<MaterialRecord> {
        self.filter_records(needle, |r, n| r.category.to_lowercase().contains(n))
    }

    /// Records with at least one tag containing `needle`, ignoring case, in
    /// corpus order. Matches never span the comma between two tags.
    pub fn search_by_tag(&self, needle: &str) -> Vec<MaterialRecord> {
        self.filter_records(needle, |r, n| r.tag_list().any(|t| t.to_lowercase().contains(n)))
    }

    fn filter_records<F>(&self, needle: &str, matches: F) -> Vec<MaterialRecord>
    where
        F: Fn(&MaterialRecord, &str) -> bool,
    {
        let needle = needle.to_lowercase();
        self.records.iter().filter(|r| matches(*r, needle.as_str())).cloned().collect()
    }
}
