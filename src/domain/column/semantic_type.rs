// ============================================================
// SEMANTIC TYPE ENUM
// ============================================================
// The closed set of column formats the engine can detect

use serde::{Deserialize, Serialize};

/// Semantic type of an imported column.
///
/// Declaration order is the classifier's priority order: the most specific
/// formats are tried first and `String` is the unconditional fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Kml,
    Polygon,
    Gps,
    Latitude,
    Longitude,
    Date,
    Number,
    String,
}

impl SemanticType {
    /// Classifier priority order, most specific first
    pub const PRIORITY: [SemanticType; 8] = [
        SemanticType::Kml,
        SemanticType::Polygon,
        SemanticType::Gps,
        SemanticType::Latitude,
        SemanticType::Longitude,
        SemanticType::Date,
        SemanticType::Number,
        SemanticType::String,
    ];

    /// `String` matches everything and ends every classification run
    pub fn is_fallback(&self) -> bool {
        matches!(self, SemanticType::String)
    }

    /// Types whose canonical form is a GeoJSON Polygon
    pub fn is_geometry(&self) -> bool {
        matches!(self, SemanticType::Polygon | SemanticType::Kml)
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            SemanticType::Kml => "KML coordinate block, canonicalized to a GeoJSON Polygon",
            SemanticType::Polygon => "Polygon geometry, canonicalized to a GeoJSON Polygon",
            SemanticType::Gps => "Latitude/longitude pair in decimal degrees",
            SemanticType::Latitude => "Single latitude in decimal degrees",
            SemanticType::Longitude => "Single longitude in decimal degrees",
            SemanticType::Date => "Calendar date, canonicalized to an ISO-8601 instant",
            SemanticType::Number => "Numeric value with grouped-thousands display form",
            SemanticType::String => "Free text (default fallback)",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            SemanticType::Kml => "kml",
            SemanticType::Polygon => "polygon",
            SemanticType::Gps => "gps",
            SemanticType::Latitude => "latitude",
            SemanticType::Longitude => "longitude",
            SemanticType::Date => "date",
            SemanticType::Number => "number",
            SemanticType::String => "string",
        };
        write!(f, "{}", tag)
    }
}
