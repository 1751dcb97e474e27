//! Column format detection and coercion engine for tabular imports.
//!
//! An upload arrives as columns of raw heterogeneous values. For each
//! column the engine picks one semantic type from a closed set (string,
//! number, date, gps, latitude, longitude, polygon, kml) using a sampled
//! majority vote over the leading values, then coerces every cell into
//! that type's canonical form, flagging cells that do not conform. The
//! surrounding upload UI and persistence layers are collaborators, not
//! part of this crate.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{
    duplicated_mask, ColumnPipeline, DuplicatePattern, FormatClassifier, PatternRegistry,
};
pub use domain::column::{
    CellValue, ChangedBy, CoercedCell, DetectionConfig, FormatChange, ImportColumn, SemanticType,
};
pub use domain::error::{ImportError, Result};
pub use domain::geo::{GpsCoordinate, PolygonGeometry};
pub use infrastructure::config::load_config;
pub use infrastructure::formats::{coerce_value, matches_format};
pub use infrastructure::telemetry::init_tracing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_then_coerce_round_trip() {
        let pipeline = ColumnPipeline::default();
        let column = pipeline.process_column(
            "gps",
            vec![
                CellValue::from("40.7128,-74.0060"),
                CellValue::from("48.123,-122.456"),
                CellValue::from("34.0522,-118.2437"),
            ],
        );

        assert_eq!(column.detected, SemanticType::Gps);
        assert_eq!(
            column.canonical[0],
            CellValue::from("40.7128000, -74.0060000")
        );
        assert!(column.valid.iter().all(|v| *v));
    }

    #[test]
    fn test_public_surface_composes() {
        let config = load_config().unwrap_or_default();
        let cell = coerce_value(
            &CellValue::from("March 2027"),
            SemanticType::Date,
            &config,
        );
        assert!(cell.valid);
        assert!(matches_format(&cell.canonical, SemanticType::Date, &config));
    }
}
