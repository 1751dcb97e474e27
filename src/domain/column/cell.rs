// ============================================================
// CELL VALUES
// ============================================================
// Raw and coerced cell representations shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw cell as delivered by the ingestion layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    /// Blank cells are skipped during classification and pass through coercion
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Borrow the text content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, parsing text the permissive way (no separators stripped)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Null => None,
        }
    }

    /// The string form used when a value is rendered or re-parsed.
    /// Numbers format the way they were observed (no forced decimals).
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_bare_number(*n),
            CellValue::Null => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

/// Render an f64 without a trailing ".0" for integral values, matching how
/// spreadsheet values round-trip through the ingestion layer.
pub fn format_bare_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Per-cell coercion outcome: the canonical value plus a usability flag.
/// Invalid cells keep the raw value inspectable in `canonical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercedCell {
    pub canonical: CellValue,
    pub valid: bool,
}

impl CoercedCell {
    pub fn valid(canonical: CellValue) -> Self {
        Self {
            canonical,
            valid: true,
        }
    }

    pub fn invalid(original: CellValue) -> Self {
        Self {
            canonical: original,
            valid: false,
        }
    }
}
