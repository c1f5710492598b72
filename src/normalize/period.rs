//! Period descriptor → canonical date.
//!
//! Source tables encode time in several ways: a year column plus a month name,
//! a year plus a `Q<n>` label (calendar or April-starting fiscal quarters), or a
//! self-contained label such as `FY18 Q1` or `FY 2017-18`. All of them map to
//! the first day of a calendar month.
//!
//! Unparseable descriptors return `None`; callers drop such rows.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::PeriodMode;

static QUARTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Q\s*(\d+)").expect("valid quarter regex"));
static FY_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FY\s*'?(\d{2,4})").expect("valid fiscal-year regex"));
static FY_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:FY\s*)?(\d{4})\s*[-/]\s*(\d{2}|\d{4})$").expect("valid fiscal-range regex")
});
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("valid year regex"));

const MONTHS: [(&str, u32); 24] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("sept", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Normalize a period descriptor to its canonical date.
///
/// `year` is the separate year column when the source has one; otherwise the
/// year is read from `label`.
pub fn normalize_period(mode: PeriodMode, year: Option<&str>, label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    match mode {
        PeriodMode::YearMonth => year_month(year, label),
        PeriodMode::CalendarQuarter => {
            let (y, q) = year_and_quarter(year, label)?;
            first_of_month(y, calendar_quarter_month(q))
        }
        PeriodMode::FiscalQuarter => {
            let (y, q) = year_and_quarter(year, label)?;
            let (y, m) = fiscal_quarter_month(y, q);
            first_of_month(y, m)
        }
        PeriodMode::FiscalYear => fiscal_year_start(label),
    }
}

/// Month number for a month name: full names, 3-letter abbreviations, and
/// `sept`, matched case-insensitively.
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim().trim_end_matches('.').to_ascii_lowercase();
    MONTHS.iter().find(|(n, _)| *n == name).map(|(_, m)| *m)
}

/// First month of a calendar quarter (Q1 → January). `quarter` is 1..=4.
fn calendar_quarter_month(quarter: u32) -> u32 {
    (quarter - 1) * 3 + 1
}

/// Calendar `(year, month)` of the first month of an April-starting fiscal
/// quarter. Q3 and Q4 carry into the next calendar year when the month
/// overflows December. `quarter` is 1..=4.
fn fiscal_quarter_month(year: i32, quarter: u32) -> (i32, u32) {
    let month = (quarter - 1) * 3 + 4;
    if month > 12 { (year + 1, month - 12) } else { (year, month) }
}

fn year_month(year: Option<&str>, label: &str) -> Option<NaiveDate> {
    match year {
        Some(y) => first_of_month(parse_year(y)?, month_from_name(label)?),
        None => {
            // Self-contained labels like `Jan 2021` or `Sept-2020`.
            let (a, b) = label.split_once(|c: char| c == ' ' || c == '-' || c == '/')?;
            if let Some(m) = month_from_name(a) {
                first_of_month(parse_year(b)?, m)
            } else {
                first_of_month(parse_year(a)?, month_from_name(b)?)
            }
        }
    }
}

fn year_and_quarter(year: Option<&str>, label: &str) -> Option<(i32, u32)> {
    let quarter: u32 = QUARTER_RE.captures(label)?.get(1)?.as_str().parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }

    let year = match year {
        Some(y) => parse_year(y)?,
        None => year_from_label(label)?,
    };
    Some((year, quarter))
}

fn year_from_label(label: &str) -> Option<i32> {
    if let Some(caps) = FY_YEAR_RE.captures(label) {
        return expand_year(caps.get(1)?.as_str());
    }
    YEAR_RE.captures(label)?.get(1)?.as_str().parse().ok()
}

fn fiscal_year_start(label: &str) -> Option<NaiveDate> {
    let caps = FY_RANGE_RE.captures(label)?;
    let start: i32 = caps.get(1)?.as_str().parse().ok()?;
    let end_raw = caps.get(2)?.as_str();
    let end: i32 = end_raw.parse().ok()?;

    let consecutive = if end_raw.len() == 2 {
        (start + 1) % 100 == end
    } else {
        start + 1 == end
    };
    if !consecutive {
        return None;
    }
    first_of_month(start, 4)
}

/// Two-digit years are read as `20xx` below 50 and `19xx` otherwise.
fn expand_year(raw: &str) -> Option<i32> {
    let y: i32 = raw.parse().ok()?;
    match raw.len() {
        2 if y < 50 => Some(2000 + y),
        2 => Some(1900 + y),
        4 => Some(y),
        _ => None,
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    // Spreadsheet exports sometimes write integer years as floats.
    let raw = raw.strip_suffix(".0").unwrap_or(raw);
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}
