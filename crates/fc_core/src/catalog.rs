//! Fallacy reference table.
//!
//! The catalog is loaded once at startup and shared read-only between
//! requests. Its rendered form is pasted verbatim into both prompts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

const BUILTIN_CSV: &str = include_str!("../../../data/fallacies.csv");

const NAME_HEADERS: &[&str] = &["name", "fallacy"];
const DEFINITION_HEADERS: &[&str] = &["definition", "description"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallacyEntry {
    pub name: String,
    pub definition: String,
}

impl FallacyEntry {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallacyCatalog {
    entries: Vec<FallacyEntry>,
}

impl FallacyCatalog {
    pub fn from_entries(entries: Vec<FallacyEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Catalog("catalog has no entries".to_string()));
        }
        if let Some(pos) = entries.iter().position(|e| e.name.trim().is_empty()) {
            return Err(Error::Catalog(format!("entry {} has a blank name", pos + 1)));
        }
        Ok(Self { entries })
    }

    /// The catalog bundled with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_csv_reader(BUILTIN_CSV.as_bytes())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Catalog(format!("cannot open {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_csv_reader(file)?;
        debug!(path = %path.display(), entries = catalog.len(), "Loaded fallacy catalog");
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let name_col = find_column(&headers, NAME_HEADERS)?;
        let definition_col = find_column(&headers, DEFINITION_HEADERS)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(name_col).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let definition = record.get(definition_col).unwrap_or_default();
            entries.push(FallacyEntry::new(name, definition));
        }

        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallacyEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&FallacyEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// One `- name: definition` line per entry, in load order.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("- {}: {}", e.name, e.definition))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| candidates.iter().any(|c| h.eq_ignore_ascii_case(c)))
        .ok_or_else(|| {
            Error::Catalog(format!(
                "missing column, expected one of: {}",
                candidates.join(", ")
            ))
        })
}
