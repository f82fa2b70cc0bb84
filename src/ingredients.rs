//! Splits raw ingredient lines into amount, unit and name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Ingredient;
use crate::quantity::match_leading_quantity;

static UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\p{L}+)\s+").unwrap());

static TRAILING_QUALIFIERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*((?:\(\s*[^()]*?\s*\)\s*)+)$").unwrap());

static QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*([^()]*?)\s*\)").unwrap());

/// Parses a single ingredient line like `"1 1/2 EL Butter"`.
///
/// A unit is only looked for after a leading quantity, so `"Salz und Pfeffer"`
/// stays a plain name. Trailing bracketed qualifiers are folded into the name:
/// `"Zwiebel (gehackt)"` becomes `"Zwiebel, gehackt"`.
pub fn parse_ingredient_line(line: &str) -> Ingredient {
    let mut rest = line.trim();
    let mut ingredient = Ingredient::default();

    if let Some((amount, len)) = match_leading_quantity(rest) {
        ingredient.amount = Some(amount);
        rest = rest[len..].trim_start();

        if let Some(caps) = UNIT.captures(rest) {
            ingredient.unit = Some(caps[1].to_string());
            rest = &rest[caps[0].len()..];
        }
    }

    ingredient.name = fold_qualifiers(rest.trim());
    ingredient
}

/// Parses every non-blank line.
pub fn parse_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<Ingredient> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(parse_ingredient_line)
        .collect()
}

fn fold_qualifiers(name: &str) -> String {
    let Some(caps) = TRAILING_QUALIFIERS.captures(name) else {
        return name.to_string();
    };

    let base = caps[1].trim();
    if base.is_empty() {
        return name.to_string();
    }

    let mut parts = vec![base.to_string()];
    parts.extend(
        QUALIFIER
            .captures_iter(&caps[2])
            .map(|q| q[1].to_string())
            .filter(|q| !q.is_empty()),
    );
    parts.join(", ")
}
