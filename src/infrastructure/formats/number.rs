// ============================================================
// NUMBER FORMAT
// ============================================================
// Locale-tolerant numeric parsing and grouped-thousands rendering

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::column::CellValue;

// A value shaped like an ISO date must never read as arithmetic
static ISO_DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Strip thousands separators, currency symbols, and whitespace
fn clean_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | '€' | '$' | '£') && !c.is_whitespace())
        .collect()
}

/// Parse a cell as a number after cleanup; scientific notation is accepted,
/// non-finite results are not
pub fn parse_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => {
            let cleaned = clean_numeric(s);
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        CellValue::Null => None,
    }
}

/// Single-value validator for the number silo
pub fn is_number(value: &CellValue) -> bool {
    match value {
        CellValue::Number(_) => true,
        CellValue::Text(s) => {
            if s.contains('-') && ISO_DATE_SHAPE.is_match(s) {
                return false;
            }
            parse_number(value).is_some()
        }
        CellValue::Null => false,
    }
}

/// Canonical display form: grouped thousands, up to two fractional digits
/// ("1234.50" renders as "1,234.5", "12300.0" as "12,300")
pub fn format_grouped(n: f64) -> String {
    let mut fixed = format!("{:.2}", n);
    if fixed.contains('.') {
        while fixed.ends_with('0') {
            fixed.pop();
        }
        if fixed.ends_with('.') {
            fixed.pop();
        }
    }
    if fixed == "-0" {
        return "0".to_string();
    }

    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
