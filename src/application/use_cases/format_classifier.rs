// ============================================================
// FORMAT CLASSIFIER
// ============================================================
// Column type detection rules:
//
// 1. Silos run in order of specificity:
//    kml → polygon → gps → latitude → longitude → date → number → string
// 2. Each silo checks the first `sample_size` non-blank values and
//    accepts when `required_matches` of them satisfy the format,
//    provided at least `min_samples` values were seen.
// 3. A header that names a coordinate axis reorders the ambiguous
//    latitude/longitude pair; it never overrides a failed sample.
// 4. String is the unconditional fallback.

use tracing::debug;

use crate::domain::column::{CellValue, DetectionConfig, SemanticType};
use crate::infrastructure::formats::matches_format;

/// What a column header says about its content, used only to untangle
/// the latitude/longitude range overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderHint {
    Gps,
    Latitude,
    Longitude,
    None,
}

fn header_hint(header: &str) -> HeaderHint {
    let lower = header.to_lowercase();
    if lower.contains("gps") || lower.contains("coordinate") {
        HeaderHint::Gps
    } else if lower.contains("lat") {
        HeaderHint::Latitude
    } else if lower.contains("lon") {
        HeaderHint::Longitude
    } else {
        HeaderHint::None
    }
}

/// Column format detection service
pub struct FormatClassifier {
    config: DetectionConfig,
}

impl FormatClassifier {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Detect the format of a column from its values and header.
    /// Never fails: a column nothing else claims is a `string` column.
    pub fn classify(&self, header: &str, values: &[CellValue]) -> SemanticType {
        let hint = header_hint(header);

        let mut silos = [
            SemanticType::Kml,
            SemanticType::Polygon,
            SemanticType::Gps,
            SemanticType::Latitude,
            SemanticType::Longitude,
            SemanticType::Date,
            SemanticType::Number,
        ];
        // Latitude-range values are valid longitudes too; only the header
        // can say which axis a column is. A longitude header flips the
        // attempt order so the latitude silo cannot claim it first.
        if hint == HeaderHint::Longitude {
            silos.swap(3, 4);
        }

        for silo in silos {
            if self.column_matches(values, silo) {
                debug!(header = %header, hint = ?hint, format = %silo, "column classified");
                return silo;
            }
        }

        debug!(header = %header, "no silo matched, falling back to string");
        SemanticType::String
    }

    /// The sampling rule every silo shares: scan non-blank values in
    /// order, stop at the sample bound, accept on enough matches, and
    /// bail out as soon as the remaining slots cannot reach the target.
    fn column_matches(&self, values: &[CellValue], format: SemanticType) -> bool {
        let mut matched = 0usize;
        let mut checked = 0usize;

        for value in values.iter().filter(|v| !v.is_blank()) {
            if matches_format(value, format, &self.config) {
                matched += 1;
            } else {
                let remaining = self.config.sample_size - checked - 1;
                if matched + remaining < self.config.required_matches {
                    return false;
                }
            }

            checked += 1;
            if checked >= self.config.sample_size {
                break;
            }
        }

        checked >= self.config.min_samples && matched >= self.config.required_matches
    }
}

impl Default for FormatClassifier {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}
