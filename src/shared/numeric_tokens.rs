//! Signed-decimal token scanner shared by the GPS and polygon grammars.
//!
//! Coordinate-bearing strings arrive in many shapes (comma pairs, WKT-ish
//! dumps, KML lines); every one of them reduces to "the numbers, in order".

use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").unwrap());

/// All numeric tokens in `text`, in encounter order, as raw slices
pub fn numeric_token_strs(text: &str) -> Vec<&str> {
    NUMERIC_TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// All numeric tokens in `text`, in encounter order, parsed
pub fn numeric_tokens(text: &str) -> Vec<f64> {
    numeric_token_strs(text)
        .into_iter()
        .filter_map(|t| t.parse::<f64>().ok())
        .collect()
}

/// Decimal digits carried by a token's text form ("40.00" has two;
/// "40" has none). Precision checks read the text, not the parsed float,
/// so trailing zeros still count.
pub fn decimal_places(token: &str) -> usize {
    token
        .split_once('.')
        .map(|(_, frac)| frac.trim().len())
        .unwrap_or(0)
}
