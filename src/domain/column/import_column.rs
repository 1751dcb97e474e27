// ============================================================
// IMPORT COLUMN MODEL
// ============================================================
// One uploaded column: header, raw values, detected type, and the
// canonical values + validity flags the pipeline fills in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CellValue, SemanticType};

/// Who switched a column's format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangedBy {
    Auto,
    User,
}

/// Audit record for a format switch on a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatChange {
    pub from: SemanticType,
    pub to: SemanticType,
    pub changed_by: ChangedBy,
    pub at: DateTime<Utc>,
}

/// A single column in an import session.
///
/// Invariant: `values`, `canonical`, and `valid` are always the same length
/// and index-aligned. Raw value edits reset the derived vectors wholesale;
/// the column is then reclassified in full, never incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportColumn {
    /// Header label from the uploaded file
    pub header: String,

    /// Raw cell values in row order
    pub values: Vec<CellValue>,

    /// Detected (or user-chosen) semantic type
    pub detected: SemanticType,

    /// Canonical value per cell, populated by the pipeline
    pub canonical: Vec<CellValue>,

    /// Usability flag per cell; `false` marks a cell the UI greys out
    pub valid: Vec<bool>,

    /// Format switches applied to this column, oldest first
    pub format_history: Vec<FormatChange>,
}

impl ImportColumn {
    /// Create a column from raw values; starts as `string` with empty
    /// canonical state until the pipeline runs
    pub fn new(header: impl Into<String>, values: Vec<CellValue>) -> Self {
        let len = values.len();
        Self {
            header: header.into(),
            values,
            detected: SemanticType::String,
            canonical: vec![CellValue::Null; len],
            valid: vec![true; len],
            format_history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-blank values in row order, as the classifier sees them
    pub fn non_blank_values(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_blank())
    }

    /// Replace the raw values wholesale. Derived state is reset so the
    /// invariant holds until the next pipeline run.
    pub fn set_values(&mut self, values: Vec<CellValue>) {
        let len = values.len();
        self.values = values;
        self.canonical = vec![CellValue::Null; len];
        self.valid = vec![true; len];
    }

    /// Switch the column's format, recording an audit entry when the type
    /// actually changes
    pub fn change_format(&mut self, to: SemanticType, changed_by: ChangedBy) {
        if self.detected == to {
            return;
        }
        self.format_history.push(FormatChange {
            from: self.detected,
            to,
            changed_by,
            at: Utc::now(),
        });
        self.detected = to;
    }

    /// Whether the current format came from a manual override
    pub fn user_overrode_format(&self) -> bool {
        self.format_history
            .last()
            .map(|c| c.changed_by == ChangedBy::User)
            .unwrap_or(false)
    }

    /// Check the length invariant; pipeline debug assertions call this
    pub fn is_aligned(&self) -> bool {
        self.values.len() == self.canonical.len() && self.values.len() == self.valid.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(values: &[&str]) -> ImportColumn {
        ImportColumn::new(
            "sample",
            values.iter().map(|v| CellValue::from(*v)).collect(),
        )
    }

    #[test]
    fn test_new_column_is_aligned() {
        let col = text_column(&["a", "", "b"]);
        assert!(col.is_aligned());
        assert_eq!(col.detected, SemanticType::String);
        assert_eq!(col.non_blank_values().count(), 2);
    }

    #[test]
    fn test_set_values_resets_derived_state() {
        let mut col = text_column(&["a"]);
        col.canonical = vec![CellValue::from("A")];
        col.valid = vec![false];
        col.set_values(vec![CellValue::from("x"), CellValue::from("y")]);
        assert!(col.is_aligned());
        assert_eq!(col.canonical, vec![CellValue::Null, CellValue::Null]);
        assert_eq!(col.valid, vec![true, true]);
    }

    #[test]
    fn test_change_format_records_audit() {
        let mut col = text_column(&["1.23"]);
        col.change_format(SemanticType::Number, ChangedBy::Auto);
        col.change_format(SemanticType::Number, ChangedBy::User); // no-op
        col.change_format(SemanticType::Latitude, ChangedBy::User);

        assert_eq!(col.format_history.len(), 2);
        assert_eq!(col.format_history[0].from, SemanticType::String);
        assert_eq!(col.format_history[0].to, SemanticType::Number);
        assert!(col.user_overrode_format());
    }
}
