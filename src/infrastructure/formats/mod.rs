// ============================================================
// FORMAT GRAMMARS
// ============================================================
// One module per format family, plus the exhaustive dispatch the
// classifier and coercer share. Adding a semantic type fails to
// compile until both matches below handle it.

pub mod date;
pub mod dms;
pub mod gps;
pub mod number;
pub mod polygon;

use crate::domain::column::{CellValue, CoercedCell, DetectionConfig, SemanticType};
use crate::domain::geo;

/// Does a single value satisfy a format's grammar?
/// Blank cells never match any format (the classifier skips them).
pub fn matches_format(value: &CellValue, format: SemanticType, config: &DetectionConfig) -> bool {
    if value.is_blank() {
        return false;
    }
    match format {
        SemanticType::Kml => polygon::is_kml(value),
        SemanticType::Polygon => polygon::is_polygon(value),
        SemanticType::Gps => gps::is_gps(value, config),
        SemanticType::Latitude => gps::is_latitude(value, config),
        SemanticType::Longitude => gps::is_longitude(value, config),
        SemanticType::Date => date::is_date(value, config),
        SemanticType::Number => number::is_number(value),
        SemanticType::String => true,
    }
}

/// Coerce one cell under a chosen format.
///
/// Pure in (format, value, config). Blank cells pass through as `Null`
/// and are never flagged: an empty cell is not a coercion failure.
/// Invalid cells keep the raw value in `canonical` for inspection.
pub fn coerce_value(
    value: &CellValue,
    format: SemanticType,
    config: &DetectionConfig,
) -> CoercedCell {
    if value.is_blank() {
        return CoercedCell::valid(CellValue::Null);
    }

    match format {
        SemanticType::String => match value {
            CellValue::Text(s) => CoercedCell::valid(CellValue::Text(s.trim().to_string())),
            other => CoercedCell::valid(other.clone()),
        },
        SemanticType::Number => match number::parse_number(value) {
            Some(n) => CoercedCell::valid(CellValue::Text(number::format_grouped(n))),
            None => CoercedCell::invalid(value.clone()),
        },
        SemanticType::Date => match date::parse_date(value, config) {
            Some(dt) => CoercedCell::valid(CellValue::Text(date::to_canonical(dt))),
            None => CoercedCell::invalid(value.clone()),
        },
        SemanticType::Gps => match gps::coerce_gps(value, config) {
            Some(coord) => CoercedCell::valid(CellValue::Text(coord.to_string())),
            None => CoercedCell::invalid(value.clone()),
        },
        SemanticType::Latitude => {
            match gps::coerce_axis(value, config, geo::in_latitude_range) {
                Some(lat) => CoercedCell::valid(CellValue::Text(gps::format_axis(lat))),
                None => CoercedCell::invalid(value.clone()),
            }
        }
        SemanticType::Longitude => {
            match gps::coerce_axis(value, config, geo::in_longitude_range) {
                Some(lon) => CoercedCell::valid(CellValue::Text(gps::format_axis(lon))),
                None => CoercedCell::invalid(value.clone()),
            }
        }
        SemanticType::Polygon => match polygon::coerce_polygon(value) {
            Some(json) => CoercedCell::valid(CellValue::Text(json)),
            None => CoercedCell::invalid(value.clone()),
        },
        SemanticType::Kml => match polygon::coerce_kml(value) {
            Some(json) => CoercedCell::valid(CellValue::Text(json)),
            None => CoercedCell::invalid(value.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn coerce(s: &str, format: SemanticType) -> CoercedCell {
        coerce_value(&text(s), format, &DetectionConfig::default())
    }

    #[test]
    fn test_number_coercion() {
        let cell = coerce("1,234.50", SemanticType::Number);
        assert!(cell.valid);
        assert_eq!(cell.canonical, text("1,234.5"));

        let cell = coerce("not a number", SemanticType::Number);
        assert!(!cell.valid);
        assert_eq!(cell.canonical, text("not a number"));
    }

    #[test]
    fn test_date_coercion_flags_failures() {
        let cell = coerce("March 2027", SemanticType::Date);
        assert!(cell.valid);
        assert_eq!(cell.canonical, text("2027-03-01T00:00:00"));

        let cell = coerce("sometime soon", SemanticType::Date);
        assert!(!cell.valid);
        assert_eq!(cell.canonical, text("sometime soon"));
    }

    #[test]
    fn test_gps_coercion() {
        let cell = coerce("40.7128,-74.0060", SemanticType::Gps);
        assert!(cell.valid);
        assert_eq!(cell.canonical, text("40.7128000, -74.0060000"));
    }

    #[test]
    fn test_string_trims_and_never_fails() {
        let cell = coerce("  padded  ", SemanticType::String);
        assert!(cell.valid);
        assert_eq!(cell.canonical, text("padded"));
    }

    #[test]
    fn test_blank_cells_pass_through_every_format() {
        for format in SemanticType::PRIORITY {
            let cell = coerce_value(&CellValue::Null, format, &DetectionConfig::default());
            assert!(cell.valid, "blank cell flagged under {}", format);
            assert_eq!(cell.canonical, CellValue::Null);
        }
    }

    #[test]
    fn test_coercion_is_idempotent_on_valid_results() {
        let config = DetectionConfig::default();
        let cases = [
            ("1,234.50", SemanticType::Number),
            ("2022-01-31", SemanticType::Date),
            ("March 2027", SemanticType::Date),
            ("40.7128,-74.0060", SemanticType::Gps),
            ("40.7128", SemanticType::Latitude),
            ("-74.0060", SemanticType::Longitude),
            ("10.0,20.0,10.0,21.0,11.0,21.0", SemanticType::Polygon),
            ("  text  ", SemanticType::String),
        ];
        for (raw, format) in cases {
            let first = coerce_value(&text(raw), format, &config);
            assert!(first.valid, "{} failed under {}", raw, format);
            let second = coerce_value(&first.canonical, format, &config);
            assert!(second.valid);
            assert_eq!(second.canonical, first.canonical, "{} not a fixed point", raw);
        }
    }
}
