// ============================================================
// DMS NOTATION
// ============================================================
// Degrees/minutes/seconds to decimal degrees. Only consulted when
// `DetectionConfig::parse_dms` is set; the canonical coordinate path
// is bare decimal degrees.

use once_cell::sync::Lazy;
use regex::Regex;

// 41°24'12.2"N, 41° 24' 12.2" N, 41d 24m 12.2s N
static DMS_FULL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(\d+)\s*[°d]\s*(\d+)\s*['m]\s*(\d+(?:\.\d+)?)\s*["s]\s*([NSEWnsew])\s*$"#)
        .unwrap()
});

// 41°24'N
static DMS_DEG_MIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*[°d]\s*(\d+)\s*['m]\s*([NSEWnsew])\s*$").unwrap());

// 41°N
static DMS_DEG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*[°d]\s*([NSEWnsew])\s*$").unwrap());

/// Quick check for DMS punctuation before paying for a full parse
pub fn has_dms_markers(text: &str) -> bool {
    text.contains('°') || text.contains('\'') || text.contains('"')
}

fn apply_direction(dd: f64, direction: &str) -> f64 {
    match direction.to_ascii_uppercase().as_str() {
        "S" | "W" => -dd,
        _ => dd,
    }
}

/// Convert one DMS-notated part to decimal degrees.
/// Returns `None` when the text is not DMS.
pub fn parse_dms(text: &str) -> Option<f64> {
    if let Some(c) = DMS_FULL.captures(text) {
        let degrees: f64 = c[1].parse().ok()?;
        let minutes: f64 = c[2].parse().ok()?;
        let seconds: f64 = c[3].parse().ok()?;
        return Some(apply_direction(
            degrees + minutes / 60.0 + seconds / 3600.0,
            &c[4],
        ));
    }

    if let Some(c) = DMS_DEG_MIN.captures(text) {
        let degrees: f64 = c[1].parse().ok()?;
        let minutes: f64 = c[2].parse().ok()?;
        return Some(apply_direction(degrees + minutes / 60.0, &c[3]));
    }

    if let Some(c) = DMS_DEG.captures(text) {
        let degrees: f64 = c[1].parse().ok()?;
        return Some(apply_direction(degrees, &c[2]));
    }

    None
}
