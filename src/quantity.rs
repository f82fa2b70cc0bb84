//! Numeric quantities found at the start of ingredient lines.
//!
//! Recognized forms, tried in this order:
//! - mixed fraction: `1 1/2`
//! - simple fraction: `1/2`
//! - digits followed by a vulgar fraction glyph: `1½`
//! - a vulgar fraction glyph alone: `½`
//! - integer or decimal with comma or dot: `2`, `0,5`, `1.25`

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const QUANTITY_PATTERN: &str =
    r"(?:(\d+)\s+(\d+)/(\d+)|(\d+)/(\d+)|(\d+)?([⅕¼⅖½⅗¾⅘])|(\d+(?:[.,]\d+)?))";

static LEADING_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{QUANTITY_PATTERN}")).unwrap());

static FULL_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{QUANTITY_PATTERN}$")).unwrap());

/// Value of a single vulgar fraction glyph.
pub fn glyph_value(glyph: char) -> Option<f64> {
    match glyph {
        '⅕' => Some(0.2),
        '¼' => Some(0.25),
        '⅖' => Some(0.4),
        '½' => Some(0.5),
        '⅗' => Some(0.6),
        '¾' => Some(0.75),
        '⅘' => Some(0.8),
        _ => None,
    }
}

/// Parses a whole token as a quantity. Surrounding whitespace is ignored.
///
/// Returns `None` when the token is not a quantity; this is not an error,
/// callers treat it as "no quantity present".
pub fn parse_quantity(token: &str) -> Option<f64> {
    FULL_QUANTITY
        .captures(token.trim())
        .and_then(|caps| quantity_from_captures(&caps))
}

/// Matches a quantity at the very start of `text`.
///
/// Returns the value and the byte length of the matched prefix (not
/// including any whitespace after it).
pub fn match_leading_quantity(text: &str) -> Option<(f64, usize)> {
    let caps = LEADING_QUANTITY.captures(text)?;
    let len = caps.get(0)?.end();
    quantity_from_captures(&caps).map(|value| (value, len))
}

fn quantity_from_captures(caps: &Captures) -> Option<f64> {
    let number = |index: usize| -> Option<f64> {
        caps.get(index).and_then(|m| m.as_str().parse::<f64>().ok())
    };

    if let (Some(whole), Some(numerator), Some(denominator)) = (number(1), number(2), number(3)) {
        return fraction(numerator, denominator).map(|frac| whole + frac);
    }

    if let (Some(numerator), Some(denominator)) = (number(4), number(5)) {
        return fraction(numerator, denominator);
    }

    if let Some(glyph) = caps.get(7).and_then(|m| m.as_str().chars().next()) {
        let whole = number(6).unwrap_or(0.0);
        return glyph_value(glyph).map(|frac| whole + frac);
    }

    caps.get(8)
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
}

fn fraction(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
