//! Raw metric field → optional number.

/// Placeholders used by the source tables for missing observations.
const MISSING_TOKENS: [&str; 9] = [
    "",
    "n/a",
    "na",
    "nan",
    "not available",
    "not applicable",
    "-",
    "--",
    ".",
];

/// Coerce a raw field into a number.
///
/// Missing-value placeholders (matched case-insensitively) and anything that
/// does not parse as a finite decimal number yield `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_missing_token(trimmed) {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Expects an already-trimmed field.
fn is_missing_token(field: &str) -> bool {
    MISSING_TOKENS.iter().any(|t| field.eq_ignore_ascii_case(t))
}
