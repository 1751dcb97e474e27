// ============================================================
// POLYGON / KML FORMATS
// ============================================================
// GeoJSON pass-through, numeric-token ring extraction, and KML
// <coordinates> block parsing. Everything canonicalizes to a
// GeoJSON Polygon.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::column::CellValue;
use crate::domain::geo::{in_latitude_range, in_longitude_range, PolygonGeometry};
use crate::shared::numeric_tokens::numeric_tokens;

static KML_COORDINATES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<coordinates>([\s\S]*?)</coordinates>").unwrap());

const MIN_RING_PAIRS: usize = 3;
const MIN_KML_PAIRS: usize = 4;

/// Single-value validator for the polygon silo.
///
/// GeoJSON Polygons match outright. Otherwise any string carrying at least
/// three numeric tokens inside the longitude range counts. That heuristic
/// fires on some ordinary numeric strings; survey exports rarely label
/// their geometry columns, so there is nothing stricter to hang on to.
pub fn is_polygon(value: &CellValue) -> bool {
    let text = match value.as_text() {
        Some(s) => s.trim(),
        None => return false,
    };
    if text.is_empty() {
        return false;
    }

    if PolygonGeometry::parse(text).is_some() {
        return true;
    }

    let in_range = numeric_tokens(text)
        .into_iter()
        .filter(|n| in_longitude_range(*n))
        .count();
    in_range >= MIN_RING_PAIRS
}

/// Coerce a polygon cell to GeoJSON.
///
/// An already-canonical GeoJSON Polygon passes through unchanged. Raw
/// delimited numbers pair up sequentially as (lon, lat); pairs with either
/// axis out of range are dropped, an unpaired trailing token is ignored,
/// and an open ring is closed. `None` below three usable pairs.
pub fn coerce_polygon(value: &CellValue) -> Option<String> {
    let text = value.as_text()?.trim();
    if text.is_empty() {
        return None;
    }

    if PolygonGeometry::parse(text).is_some() {
        return Some(text.to_string());
    }

    let tokens: Vec<f64> = numeric_tokens(text)
        .into_iter()
        .filter(|n| in_longitude_range(*n))
        .collect();

    let ring: Vec<[f64; 2]> = tokens
        .chunks_exact(2)
        .filter(|pair| in_longitude_range(pair[0]) && in_latitude_range(pair[1]))
        .map(|pair| [pair[0], pair[1]])
        .collect();

    if ring.len() < MIN_RING_PAIRS {
        debug!(
            usable_pairs = ring.len(),
            "polygon extraction fell short of a ring"
        );
        return None;
    }

    Some(PolygonGeometry::from_ring(ring).to_json_string())
}

/// Parse a KML `<coordinates>` block into in-range (lon, lat) pairs.
/// One `lon,lat[,alt]` tuple per line.
fn kml_ring(text: &str) -> Option<Vec<[f64; 2]>> {
    let block = KML_COORDINATES.captures(text)?;
    let ring: Vec<[f64; 2]> = block[1]
        .trim()
        .lines()
        .filter_map(|line| {
            let mut parts = line.trim().split(',');
            let lon: f64 = parts.next()?.trim().parse().ok()?;
            let lat: f64 = parts.next()?.trim().parse().ok()?;
            (in_longitude_range(lon) && in_latitude_range(lat)).then_some([lon, lat])
        })
        .collect();
    Some(ring)
}

/// Single-value validator for the kml silo: a `<coordinates>` block
/// yielding at least four in-range pairs (a closed ring's minimum)
pub fn is_kml(value: &CellValue) -> bool {
    let text = match value.as_text() {
        Some(s) => s.trim(),
        None => return false,
    };
    if text.is_empty() {
        return false;
    }
    kml_ring(text)
        .map(|ring| ring.len() >= MIN_KML_PAIRS)
        .unwrap_or(false)
}

/// Coerce a KML cell to GeoJSON. A GeoJSON Polygon passes through, so
/// canonical output re-coerces to itself.
pub fn coerce_kml(value: &CellValue) -> Option<String> {
    let text = value.as_text()?.trim();
    if text.is_empty() {
        return None;
    }

    if PolygonGeometry::parse(text).is_some() {
        return Some(text.to_string());
    }

    let ring = kml_ring(text)?;
    if ring.len() < MIN_KML_PAIRS {
        return None;
    }
    Some(PolygonGeometry::from_ring(ring).to_json_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    const KML_SQUARE: &str = "<Placemark><coordinates>\n10.0,20.0,0\n10.0,21.0,0\n11.0,21.0,0\n10.0,20.0,0\n</coordinates></Placemark>";

    #[test]
    fn test_polygon_detects_geojson_and_token_runs() {
        assert!(is_polygon(&text(
            r#"{"type":"Polygon","coordinates":[[[10.0,20.0],[10.0,21.0],[11.0,21.0],[10.0,20.0]]]}"#
        )));
        assert!(is_polygon(&text("10.0,20.0,10.0,21.0,11.0,21.0")));
        assert!(!is_polygon(&text("10.0,20.0")));
        assert!(!is_polygon(&text("540.0 541.0 542.0")));
        assert!(!is_polygon(&CellValue::Number(10.0)));
    }

    #[test]
    fn test_coerce_closes_open_ring() {
        let json = coerce_polygon(&text("10.0,20.0,10.0,21.0,11.0,21.0")).unwrap();
        let poly = PolygonGeometry::parse(&json).unwrap();
        assert_eq!(poly.ring_len(), 4);
        assert_eq!(poly.coordinates[0][0], [10.0, 20.0]);
        assert_eq!(poly.coordinates[0][3], [10.0, 20.0]);
    }

    #[test]
    fn test_coerce_passes_geojson_through_unchanged() {
        let original =
            r#"{"type":"Polygon","coordinates":[[[10.0,20.0],[10.0,21.0],[11.0,21.0],[10.0,20.0]]]}"#;
        assert_eq!(coerce_polygon(&text(original)).as_deref(), Some(original));
    }

    #[test]
    fn test_coerce_drops_trailing_unpaired_token() {
        // Seven tokens: three pairs plus one leftover
        let json = coerce_polygon(&text("10.0,20.0,10.0,21.0,11.0,21.0,12.0")).unwrap();
        let poly = PolygonGeometry::parse(&json).unwrap();
        assert_eq!(poly.ring_len(), 4);
    }

    #[test]
    fn test_coerce_rejects_latitude_overflow_pairs() {
        // (lon, lat) pairing puts 95 in the latitude slot: pair dropped
        assert!(coerce_polygon(&text("10.0,95.0,11.0,96.0,12.0,97.0")).is_none());
    }

    #[test]
    fn test_kml_block_detection() {
        assert!(is_kml(&text(KML_SQUARE)));
        // Three pairs cannot close a ring
        assert!(!is_kml(&text(
            "<coordinates>10.0,20.0\n10.0,21.0\n11.0,21.0</coordinates>"
        )));
        assert!(!is_kml(&text("no block here")));
    }

    #[test]
    fn test_kml_coercion_emits_geojson() {
        let json = coerce_kml(&text(KML_SQUARE)).unwrap();
        let poly = PolygonGeometry::parse(&json).unwrap();
        assert_eq!(poly.ring_len(), 4);
        assert_eq!(poly.coordinates[0][1], [10.0, 21.0]);

        // Canonical output is a fixed point
        assert_eq!(coerce_kml(&text(&json)).as_deref(), Some(json.as_str()));
    }
}
