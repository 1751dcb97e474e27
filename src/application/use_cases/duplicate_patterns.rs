// ============================================================
// DUPLICATE PATTERN REGISTRY
// ============================================================
// Repeating-value masks tell the mapping screen which columns belong
// together: land parcels repeat one way, crops another. The registry
// is session-scoped state handed in by the caller, so labels depend
// only on what this session has seen, never on unrelated imports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::column::CellValue;

/// Rows of the duplicate mask that form a pattern signature
pub const SIGNATURE_ROWS: usize = 10;

/// Which repetition pattern a duplicated cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePattern {
    /// Not duplicated
    None,
    /// First pattern seen in the session (land-parcel columns)
    Land,
    /// Second pattern seen (crop columns)
    Crop,
    /// Any further pattern
    Random,
}

/// Per-cell mask: `true` where the value occurs more than once in the
/// column. Blank cells never count as duplicates.
pub fn duplicated_mask(values: &[CellValue]) -> Vec<bool> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        if value.is_blank() {
            continue;
        }
        *counts.entry(count_key(value)).or_insert(0) += 1;
    }

    values
        .iter()
        .map(|v| !v.is_blank() && counts.get(&count_key(v)).copied().unwrap_or(0) > 1)
        .collect()
}

// Text "40" and numeric 40 are different observations; key on the variant
fn count_key(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => format!("t:{}", s),
        CellValue::Number(n) => format!("n:{}", n.to_bits()),
        CellValue::Null => String::new(),
    }
}

/// Session-scoped registry assigning pattern labels to duplicate masks
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    session_id: Uuid,
    signatures: Vec<String>,
}

impl PatternRegistry {
    /// Start a fresh session; no patterns are known yet
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            signatures: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Number of distinct patterns this session has seen
    pub fn pattern_count(&self) -> usize {
        self.signatures.len()
    }

    /// Label every duplicated cell of a column with its pattern.
    ///
    /// The signature is the first `SIGNATURE_ROWS` rows of the duplicate
    /// mask; the first distinct signature of the session labels `Land`,
    /// the second `Crop`, anything later `Random`. Columns without
    /// duplicates come back all `None` and register nothing.
    pub fn pattern_mask(&mut self, values: &[CellValue]) -> Vec<DuplicatePattern> {
        let mask = duplicated_mask(values);
        if !mask.iter().any(|d| *d) {
            return vec![DuplicatePattern::None; values.len()];
        }

        let signature = signature_of(&mask);
        let index = match self.signatures.iter().position(|s| *s == signature) {
            Some(i) => i,
            None => {
                self.signatures.push(signature.clone());
                debug!(
                    session = %self.session_id,
                    signature = %signature,
                    ordinal = self.signatures.len(),
                    "new duplicate pattern registered"
                );
                self.signatures.len() - 1
            }
        };

        let label = match index {
            0 => DuplicatePattern::Land,
            1 => DuplicatePattern::Crop,
            _ => DuplicatePattern::Random,
        };

        mask.iter()
            .map(|dup| if *dup { label } else { DuplicatePattern::None })
            .collect()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn signature_of(mask: &[bool]) -> String {
    mask.iter()
        .take(SIGNATURE_ROWS)
        .map(|d| if *d { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_duplicated_mask_counts_repeats() {
        let mask = duplicated_mask(&cells(&["a", "b", "a", "", "c", "b"]));
        assert_eq!(mask, vec![true, true, true, false, false, true]);
    }

    #[test]
    fn test_text_and_number_do_not_collide() {
        let values = vec![CellValue::from("40"), CellValue::Number(40.0)];
        assert_eq!(duplicated_mask(&values), vec![false, false]);
    }

    #[test]
    fn test_first_two_patterns_get_stable_labels() {
        let mut registry = PatternRegistry::new();

        let land = cells(&["p1", "p1", "p2", "p2"]);
        let crop = cells(&["x", "y", "y", "z"]);

        let first = registry.pattern_mask(&land);
        assert_eq!(first[0], DuplicatePattern::Land);

        let second = registry.pattern_mask(&crop);
        assert_eq!(second[1], DuplicatePattern::Crop);
        assert_eq!(second[0], DuplicatePattern::None);

        // A column repeating the first signature keeps the first label
        let again = registry.pattern_mask(&land);
        assert_eq!(again[0], DuplicatePattern::Land);
        assert_eq!(registry.pattern_count(), 2);
    }

    #[test]
    fn test_third_pattern_is_random() {
        let mut registry = PatternRegistry::new();
        registry.pattern_mask(&cells(&["a", "a", "b"]));
        registry.pattern_mask(&cells(&["a", "b", "b"]));
        let third = registry.pattern_mask(&cells(&["c", "c", "c"]));
        assert_eq!(third[0], DuplicatePattern::Random);
    }

    #[test]
    fn test_no_duplicates_registers_nothing() {
        let mut registry = PatternRegistry::new();
        let mask = registry.pattern_mask(&cells(&["a", "b", "c"]));
        assert!(mask.iter().all(|p| *p == DuplicatePattern::None));
        assert_eq!(registry.pattern_count(), 0);
    }

    #[test]
    fn test_fresh_session_starts_over() {
        let mut first = PatternRegistry::new();
        first.pattern_mask(&cells(&["a", "a", "b"]));
        first.pattern_mask(&cells(&["a", "b", "b"]));

        // Behavior depends only on this registry, not on prior sessions
        let mut second = PatternRegistry::new();
        let mask = second.pattern_mask(&cells(&["a", "b", "b"]));
        assert_eq!(mask[1], DuplicatePattern::Land);
        assert_ne!(first.session_id(), second.session_id());
    }
}
