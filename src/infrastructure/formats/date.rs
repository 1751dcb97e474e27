// ============================================================
// DATE FORMAT
// ============================================================
// One grammar for detection and coercion: a value is a date exactly
// when the parser chain below produces a calendar instant.
//
// Supported shapes, tried in order:
//   ISO instant, bare year, Y-M-D, M/D/Y (2- or 4-digit year),
//   "14th March 2025", "March 22, 2024", "2024 Mar 22", "01-Dec-2024",
//   "Tue, 14 Mar 2023", "14Mar2025", ISO week, quarter,
//   month+year in either order, standalone month name.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::column::{CellValue, DetectionConfig};

/// Canonical date rendering: timezone-free ISO-8601 instant at midnight
pub const CANONICAL_INSTANT: &str = "%Y-%m-%dT%H:%M:%S";

const MONTHS_LONG: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];
const MONTHS_SHORT: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static ISO_INSTANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{4})-(\d{2})-(\d{2})[T ](\d{2}):(\d{2}):(\d{2})(?:\.\d+)?Z?\s*$").unwrap()
});
static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{4})\s*$").unwrap());
static YMD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\s*$").unwrap());
static MDY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})\s*$").unwrap());
static MDY_SHORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2})[-/.](\d{1,2})[-/.](\d{2})\s*$").unwrap());
static ORDINAL_DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3,})\s+(\d{4})\s*$").unwrap()
});
static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([a-z]{3,})\s+(\d{1,2})(?:,\s*|\s+)(\d{4})\s*$").unwrap()
});
static YEAR_MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{4})\s+([a-z]{3,})\s+(\d{1,2})\s*$").unwrap());
static DAY_MON_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{1,2})-([a-z]{3,})-(\d{2}|\d{4})\s*$").unwrap());
static WEEKDAY_DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*,?\s+(\d{1,2})\s+([a-z]{3,})\s+(\d{4})\s*$")
        .unwrap()
});
static COMPACT_DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{1,2})([a-z]{3})(\d{4})\s*$").unwrap());
static ISO_WEEK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})-W(0[1-9]|[1-4]\d|5[0-3])\s*$").unwrap());
static QUARTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{4})-Q([1-4])\s*$").unwrap());
static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*([a-z]{3,})\s*[,.]?\s*(\d{4})\s*$").unwrap());
static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d{4})\s*[,.]?\s*([a-z]{3,})\s*$").unwrap());
static MONTH_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*([a-z]{3,})\s*$").unwrap());

/// Month number from a (possibly abbreviated) English name.
/// Prefix matching runs both ways, so "sept" and "septem" both hit
/// September. Deliberately loose, same as the import UI always was.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    for (i, month) in MONTHS_LONG.iter().enumerate() {
        if lower.starts_with(month) || month.starts_with(lower.as_str()) {
            return Some(i as u32 + 1);
        }
    }
    for (i, month) in MONTHS_SHORT.iter().enumerate() {
        if lower.starts_with(month) || month.starts_with(lower.as_str()) {
            return Some(i as u32 + 1);
        }
    }
    None
}

/// Two-digit years pivot at 50: 0-49 land in 20xx, 50-99 in 19xx
fn expand_year(yy: i32) -> i32 {
    if yy < 50 {
        2000 + yy
    } else {
        1900 + yy
    }
}

fn parse_year(digits: &str) -> Option<i32> {
    let y: i32 = digits.parse().ok()?;
    if digits.len() == 2 {
        Some(expand_year(y))
    } else {
        Some(y)
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).map(midnight)
}

/// Single-value validator for the date silo: parseability is the grammar
pub fn is_date(value: &CellValue, config: &DetectionConfig) -> bool {
    parse_date(value, config).is_some()
}

/// Parse a cell into a calendar instant.
///
/// A bare year resolves to January 1; a month+year to the first of the
/// month; a standalone month name to the first of that month in the
/// *previous* year (imports describe last season's plantings, so the
/// backdated default is the safe one).
pub fn parse_date(value: &CellValue, config: &DetectionConfig) -> Option<NaiveDateTime> {
    match value {
        CellValue::Number(n) => {
            if n.fract() != 0.0 {
                return None;
            }
            let year = *n as i32;
            if year >= config.year_min && year <= config.year_max {
                ymd(year, 1, 1)
            } else {
                None
            }
        }
        CellValue::Text(s) => parse_date_str(s, config),
        CellValue::Null => None,
    }
}

fn parse_date_str(s: &str, config: &DetectionConfig) -> Option<NaiveDateTime> {
    if s.trim().is_empty() {
        return None;
    }

    if let Some(c) = ISO_INSTANT.captures(s) {
        let date = NaiveDate::from_ymd_opt(
            c[1].parse().ok()?,
            c[2].parse().ok()?,
            c[3].parse().ok()?,
        )?;
        let time = NaiveTime::from_hms_opt(
            c[4].parse().ok()?,
            c[5].parse().ok()?,
            c[6].parse().ok()?,
        )?;
        return Some(date.and_time(time));
    }

    if let Some(c) = BARE_YEAR.captures(s) {
        let year: i32 = c[1].parse().ok()?;
        if year >= config.year_min && year <= config.year_max {
            return ymd(year, 1, 1);
        }
        return None;
    }

    if let Some(c) = YMD.captures(s) {
        if let Some(dt) = ymd(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?) {
            return Some(dt);
        }
    }

    // All-numeric D/M/Y shapes are ambiguous; US month-first order wins,
    // day-first resolves the dates month-first cannot ("25/12/2020")
    if let Some(c) = MDY.captures(s).or_else(|| MDY_SHORT.captures(s)) {
        let year = parse_year(&c[3])?;
        let first: u32 = c[1].parse().ok()?;
        let second: u32 = c[2].parse().ok()?;
        if let Some(dt) = ymd(year, first, second).or_else(|| ymd(year, second, first)) {
            return Some(dt);
        }
    }

    if let Some(c) = ORDINAL_DMY.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            if let Some(dt) = ymd(c[3].parse().ok()?, month, c[1].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = MONTH_DAY_YEAR.captures(s) {
        if let Some(month) = month_from_name(&c[1]) {
            if let Some(dt) = ymd(c[3].parse().ok()?, month, c[2].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = YEAR_MONTH_DAY.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            if let Some(dt) = ymd(c[1].parse().ok()?, month, c[3].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = DAY_MON_YEAR.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            let year = parse_year(&c[3])?;
            if let Some(dt) = ymd(year, month, c[1].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = WEEKDAY_DMY.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            if let Some(dt) = ymd(c[3].parse().ok()?, month, c[1].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = COMPACT_DMY.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            if let Some(dt) = ymd(c[3].parse().ok()?, month, c[1].parse().ok()?) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = ISO_WEEK.captures(s) {
        let year: i32 = c[1].parse().ok()?;
        let week: u32 = c[2].parse().ok()?;
        if let Some(date) = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon) {
            return Some(midnight(date));
        }
    }

    if let Some(c) = QUARTER.captures(s) {
        let year: i32 = c[1].parse().ok()?;
        let quarter: u32 = c[2].parse().ok()?;
        return ymd(year, (quarter - 1) * 3 + 1, 1);
    }

    if let Some(c) = MONTH_YEAR.captures(s) {
        if let Some(month) = month_from_name(&c[1]) {
            if let Some(dt) = ymd(c[2].parse().ok()?, month, 1) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = YEAR_MONTH.captures(s) {
        if let Some(month) = month_from_name(&c[2]) {
            if let Some(dt) = ymd(c[1].parse().ok()?, month, 1) {
                return Some(dt);
            }
        }
    }

    if let Some(c) = MONTH_ONLY.captures(s) {
        if let Some(month) = month_from_name(&c[1]) {
            let year = Local::now().year() - 1;
            return ymd(year, month, 1);
        }
    }

    None
}

/// Render an instant in the canonical form
pub fn to_canonical(dt: NaiveDateTime) -> String {
    dt.format(CANONICAL_INSTANT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<String> {
        parse_date(&CellValue::Text(s.to_string()), &DetectionConfig::default()).map(to_canonical)
    }

    #[test]
    fn test_iso_and_separator_variants() {
        assert_eq!(parse("2022-01-01").as_deref(), Some("2022-01-01T00:00:00"));
        assert_eq!(parse("2022/01/31").as_deref(), Some("2022-01-31T00:00:00"));
        assert_eq!(parse("2022.6.5").as_deref(), Some("2022-06-05T00:00:00"));
    }

    #[test]
    fn test_us_numeric_variants() {
        assert_eq!(parse("12/25/2020").as_deref(), Some("2020-12-25T00:00:00"));
        assert_eq!(parse("3/4/21").as_deref(), Some("2021-03-04T00:00:00"));
        assert_eq!(parse("3/4/99").as_deref(), Some("1999-03-04T00:00:00"));
        // Day-first only resolves when month-first cannot
        assert_eq!(parse("25/12/2020").as_deref(), Some("2020-12-25T00:00:00"));
    }

    #[test]
    fn test_bare_year_window() {
        assert_eq!(parse("1999").as_deref(), Some("1999-01-01T00:00:00"));
        assert_eq!(parse("2039").as_deref(), Some("2039-01-01T00:00:00"));
        assert_eq!(parse("1900"), None);
        assert_eq!(parse("2040"), None);
    }

    #[test]
    fn test_number_cell_as_year() {
        let config = DetectionConfig::default();
        assert!(parse_date(&CellValue::Number(1999.0), &config).is_some());
        assert!(parse_date(&CellValue::Number(1999.5), &config).is_none());
        assert!(parse_date(&CellValue::Number(123.0), &config).is_none());
    }

    #[test]
    fn test_month_name_variants() {
        assert_eq!(parse("22 Mar 2024").as_deref(), Some("2024-03-22T00:00:00"));
        assert_eq!(parse("14th March 2025").as_deref(), Some("2025-03-14T00:00:00"));
        assert_eq!(parse("March 22, 2024").as_deref(), Some("2024-03-22T00:00:00"));
        assert_eq!(parse("2024 Mar 22").as_deref(), Some("2024-03-22T00:00:00"));
        assert_eq!(parse("01-Dec-2024").as_deref(), Some("2024-12-01T00:00:00"));
        assert_eq!(parse("14-Mar-22").as_deref(), Some("2022-03-14T00:00:00"));
        assert_eq!(parse("Tue, 14 Mar 2023").as_deref(), Some("2023-03-14T00:00:00"));
        assert_eq!(parse("14Mar2025").as_deref(), Some("2025-03-14T00:00:00"));
    }

    #[test]
    fn test_week_and_quarter_designators() {
        assert_eq!(parse("2024-W01").as_deref(), Some("2024-01-01T00:00:00"));
        assert_eq!(parse("2024-Q3").as_deref(), Some("2024-07-01T00:00:00"));
        assert_eq!(parse("2024-W54"), None);
        assert_eq!(parse("2024-Q5"), None);
    }

    #[test]
    fn test_month_year_pairs_resolve_to_first_of_month() {
        assert_eq!(parse("March 2027").as_deref(), Some("2027-03-01T00:00:00"));
        assert_eq!(parse("2027 March").as_deref(), Some("2027-03-01T00:00:00"));
        assert_eq!(parse("Sep. 2024").as_deref(), Some("2024-09-01T00:00:00"));
    }

    #[test]
    fn test_standalone_month_backdates_one_year() {
        let expected = format!("{}-08-01T00:00:00", Local::now().year() - 1);
        assert_eq!(parse("August").as_deref(), Some(expected.as_str()));
        assert_eq!(parse("aug").as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_canonical_instant_reparses() {
        let first = parse("March 2027").unwrap();
        assert_eq!(parse(&first).as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse("France"), None);
        assert_eq!(parse("not a date"), None);
        assert_eq!(parse("2024-02-31"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("123"), None);
    }
}
