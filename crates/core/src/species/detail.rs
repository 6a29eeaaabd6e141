//! Read-only species detail view.

use serde::Serialize;

use super::SpeciesRecord;
use crate::types::DbId;

/// One label/value line of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    /// Empty when the field has no value.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesDetail {
    pub id: DbId,
    pub rows: Vec<DetailRow>,
}

impl SpeciesDetail {
    pub fn from_record(record: &SpeciesRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let rows = vec![
            row("Scientific Name", record.scientific_name.clone()),
            row("Common Name", text(&record.common_name)),
            row(
                "Total Population",
                record
                    .total_population
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            ),
            row("Kingdom", record.kingdom.to_string()),
            row("Description", text(&record.description)),
            row("Image URL", text(&record.image)),
        ];
        Self {
            id: record.id,
            rows,
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

fn row(label: &'static str, value: String) -> DetailRow {
    DetailRow { label, value }
}

/// Open/close wrapper around [`SpeciesDetail`]. Has no write path.
#[derive(Debug, Clone)]
pub struct ViewSpeciesDialog {
    record: SpeciesRecord,
    open: bool,
}

impl ViewSpeciesDialog {
    pub fn new(record: SpeciesRecord) -> Self {
        Self {
            record,
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The rendered detail, only while the dialog is open.
    pub fn detail(&self) -> Option<SpeciesDetail> {
        self.open.then(|| SpeciesDetail::from_record(&self.record))
    }
}
