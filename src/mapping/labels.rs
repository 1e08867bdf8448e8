//! Language label map.
//!
//! Resolves raw dataset-specific language labels ("Luganda", " kiswahili ")
//! to the canonical codes used by downstream translation tooling. Keys are
//! normalized once at load so per-record lookups stay cheap.
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    codes: HashMap<String, String>,
}

impl LabelMap {
    /// Load a flat JSON object (raw label → canonical code), normalizing keys
    /// by trimming and lowercasing.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let raw: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_entries(raw))
    }

    pub fn from_entries<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        let codes = entries
            .into_iter()
            .map(|(label, code)| (normalize(&label), code))
            .collect();
        Self { codes }
    }

    /// Canonical code for a raw label, if recognized.
    ///
    /// Lookup depends only on the trimmed, lowercased label.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let label = normalize(label);
        if label.is_empty() {
            return None;
        }
        self.codes.get(&label).map(String::as_str)
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
