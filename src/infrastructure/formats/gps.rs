// ============================================================
// GPS / LATITUDE / LONGITUDE FORMATS
// ============================================================
// Decimal-degree validators with a precision floor, pair detection
// for combined "lat, lon" cells, and 7-digit canonical rendering

use once_cell::sync::Lazy;
use regex::Regex;

use super::dms;
use crate::domain::column::{CellValue, DetectionConfig};
use crate::domain::geo::{self, GpsCoordinate};
use crate::shared::numeric_tokens::{decimal_places, numeric_tokens};

static PAIR_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

/// One axis of a coordinate, parsed from a single token.
/// DMS tokens carry their own sub-degree precision, so the decimal floor
/// only applies to bare decimal text.
struct AxisToken {
    value: f64,
    precise_enough: bool,
}

fn axis_token(text: &str, config: &DetectionConfig) -> Option<AxisToken> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(AxisToken {
            value,
            precise_enough: decimal_places(trimmed) >= config.min_decimal_places,
        });
    }
    if config.parse_dms && dms::has_dms_markers(trimmed) {
        if let Some(value) = dms::parse_dms(trimmed) {
            return Some(AxisToken {
                value,
                precise_enough: true,
            });
        }
    }
    None
}

fn is_axis(value: &CellValue, config: &DetectionConfig, in_range: fn(f64) -> bool) -> bool {
    let token = match value {
        CellValue::Text(s) => match axis_token(s, config) {
            Some(t) => t,
            None => return false,
        },
        CellValue::Number(n) => AxisToken {
            value: *n,
            precise_enough: decimal_places(&n.to_string()) >= config.min_decimal_places,
        },
        CellValue::Null => return false,
    };
    in_range(token.value) && token.precise_enough
}

/// Single-value validator for the latitude silo: in range, with enough
/// decimal digits that a small integer never reads as a coordinate
pub fn is_latitude(value: &CellValue, config: &DetectionConfig) -> bool {
    is_axis(value, config, geo::in_latitude_range)
}

/// Single-value validator for the longitude silo
pub fn is_longitude(value: &CellValue, config: &DetectionConfig) -> bool {
    is_axis(value, config, geo::in_longitude_range)
}

/// Single-value validator for the gps silo: two comma/space separated
/// tokens, the first a valid latitude and the second a valid longitude
pub fn is_gps(value: &CellValue, config: &DetectionConfig) -> bool {
    let text = match value.as_text() {
        Some(s) => s.trim(),
        None => return false,
    };
    if text.is_empty() {
        return false;
    }

    if config.parse_dms && dms::has_dms_markers(text) {
        if let Some(coord) = dms_pair(text) {
            return geo::in_latitude_range(coord.latitude)
                && geo::in_longitude_range(coord.longitude);
        }
    }

    let parts: Vec<&str> = PAIR_SPLIT.split(text).filter(|p| !p.is_empty()).collect();
    if parts.len() != 2 {
        return false;
    }
    is_latitude(&CellValue::from(parts[0]), config) && is_longitude(&CellValue::from(parts[1]), config)
}

fn dms_pair(text: &str) -> Option<GpsCoordinate> {
    let (lat_part, lon_part) = text.split_once(',')?;
    let latitude = dms::parse_dms(lat_part)?;
    let longitude = dms::parse_dms(lon_part)?;
    GpsCoordinate::new(latitude, longitude)
}

/// Coerce a combined GPS cell: the first two numeric tokens in encounter
/// order become (lat, lon). `None` when fewer than two tokens are found
/// or either axis is out of range.
pub fn coerce_gps(value: &CellValue, config: &DetectionConfig) -> Option<GpsCoordinate> {
    let text = value.as_text()?.trim();
    if text.is_empty() {
        return None;
    }

    if config.parse_dms && dms::has_dms_markers(text) {
        if let Some(coord) = dms_pair(text) {
            return Some(coord);
        }
    }

    let tokens = numeric_tokens(text);
    if tokens.len() < 2 {
        return None;
    }
    GpsCoordinate::new(tokens[0], tokens[1])
}

/// Coerce one axis to a decimal degree. Range is the only validity rule
/// here; the precision floor is a classification heuristic, not a
/// coercion failure.
pub fn coerce_axis(
    value: &CellValue,
    config: &DetectionConfig,
    in_range: fn(f64) -> bool,
) -> Option<f64> {
    let parsed = match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(n) => Some(n),
                Err(_) if config.parse_dms && dms::has_dms_markers(trimmed) => {
                    dms::parse_dms(trimmed)
                }
                Err(_) => None,
            }
        }
        CellValue::Null => None,
    }?;
    in_range(parsed).then_some(parsed)
}

/// Canonical axis rendering: fixed 7 fractional digits
pub fn format_axis(value: f64) -> String {
    format!("{:.7}", value)
}
