// ============================================================
// DETECTION CONFIGURATION
// ============================================================
// Sampling thresholds and grammar limits for column classification

use serde::{Deserialize, Serialize};

/// Configuration for column format detection and coercion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Number of non-blank values examined per silo (default: 5)
    pub sample_size: usize,

    /// Matches required within the sample for a silo to accept (default: 3)
    pub required_matches: usize,

    /// Minimum non-blank values needed before any silo may decide (default: 2)
    pub min_samples: usize,

    /// Decimal digits required before a bare number reads as a coordinate
    /// (default: 2). Small integers must never classify as latitude.
    pub min_decimal_places: usize,

    /// Lowest year a bare 4-digit value is treated as a date (default: 1901)
    pub year_min: i32,

    /// Highest year a bare 4-digit value is treated as a date (default: 2039)
    pub year_max: i32,

    /// Convert degrees/minutes/seconds notation to decimal degrees before the
    /// coordinate validators run. Off by default: the canonical path is bare
    /// decimal degrees.
    pub parse_dms: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            required_matches: 3,
            min_samples: 2,
            min_decimal_places: 2,
            year_min: 1901,
            year_max: 2039,
            parse_dms: false,
        }
    }
}

impl DetectionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for surveys with high-precision GPS gear: five decimal places
    /// (~1 m) before a number reads as a coordinate
    pub fn high_precision() -> Self {
        Self {
            min_decimal_places: 5,
            ..Default::default()
        }
    }

    /// Config that also accepts degrees/minutes/seconds coordinate notation
    pub fn with_dms() -> Self {
        Self {
            parse_dms: true,
            ..Default::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_size == 0 {
            return Err("sample_size must be > 0".to_string());
        }
        if self.required_matches == 0 {
            return Err("required_matches must be > 0".to_string());
        }
        if self.required_matches > self.sample_size {
            return Err("required_matches must be <= sample_size".to_string());
        }
        if self.min_samples > self.sample_size {
            return Err("min_samples must be <= sample_size".to_string());
        }
        if self.year_min >= self.year_max {
            return Err("year_min must be < year_max".to_string());
        }
        Ok(())
    }
}
