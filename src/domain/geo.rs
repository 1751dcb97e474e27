// ============================================================
// GEOMETRY VALUE OBJECTS
// ============================================================
// Validated coordinates and the GeoJSON Polygon canonical form

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

pub fn in_latitude_range(lat: f64) -> bool {
    (LAT_MIN..=LAT_MAX).contains(&lat)
}

pub fn in_longitude_range(lon: f64) -> bool {
    (LON_MIN..=LON_MAX).contains(&lon)
}

/// A validated latitude/longitude pair.
/// Transient: produced during GPS and polygon parsing, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinate {
    /// Build a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if in_latitude_range(latitude) && in_longitude_range(longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for GpsCoordinate {
    /// Canonical GPS form: fixed 7 fractional digits, one comma, one space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7}, {:.7}", self.latitude, self.longitude)
    }
}

/// GeoJSON `Polygon` structure, the canonical form for polygon and KML
/// columns. The outer ring is `coordinates[0]`; positions are `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub kind: String,

    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl PolygonGeometry {
    /// Wrap a single ring, closing it if the first and last positions differ
    pub fn from_ring(mut ring: Vec<[f64; 2]>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Self {
            kind: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }

    /// Parse a GeoJSON string, accepting only `"type": "Polygon"`
    pub fn parse(raw: &str) -> Option<Self> {
        let parsed: PolygonGeometry = serde_json::from_str(raw).ok()?;
        if parsed.kind == "Polygon" && !parsed.coordinates.is_empty() {
            Some(parsed)
        } else {
            None
        }
    }

    /// Number of positions in the outer ring
    pub fn ring_len(&self) -> usize {
        self.coordinates.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_range_checks() {
        assert!(GpsCoordinate::new(40.7128, -74.0060).is_some());
        assert!(GpsCoordinate::new(90.0, 180.0).is_some());
        assert!(GpsCoordinate::new(90.1, 0.0).is_none());
        assert!(GpsCoordinate::new(0.0, -180.5).is_none());
    }

    #[test]
    fn test_gps_display_is_seven_digits() {
        let coord = GpsCoordinate::new(40.7128, -74.0060).unwrap();
        assert_eq!(coord.to_string(), "40.7128000, -74.0060000");
    }

    #[test]
    fn test_ring_is_closed_on_construction() {
        let poly = PolygonGeometry::from_ring(vec![[10.0, 20.0], [10.0, 21.0], [11.0, 21.0]]);
        assert_eq!(poly.ring_len(), 4);
        assert_eq!(poly.coordinates[0][0], poly.coordinates[0][3]);
    }

    #[test]
    fn test_parse_rejects_non_polygon() {
        assert!(PolygonGeometry::parse(r#"{"type":"Point","coordinates":[[[1.0,2.0]]]}"#).is_none());
        assert!(PolygonGeometry::parse("not json").is_none());
        let poly =
            PolygonGeometry::parse(r#"{"type":"Polygon","coordinates":[[[10.0,20.0],[10.0,21.0],[11.0,21.0],[10.0,20.0]]]}"#)
                .unwrap();
        assert_eq!(poly.ring_len(), 4);
    }
}
