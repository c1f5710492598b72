//! Shared domain enums and small value types.
//!
//! `Window` and `TagFilter` parse straight from CLI flags (`clap::ValueEnum` /
//! `FromStr`); `PeriodMode` is load-time configuration only.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// How a row's period descriptor encodes its point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodMode {
    /// A 4-digit year plus a month name (`Jan`, `Sept`, `September`).
    YearMonth,
    /// `Q1`..`Q4` of a January-starting year. Q1 maps to January.
    CalendarQuarter,
    /// `Q1`..`Q4` of an April-starting fiscal year. Q1 maps to April,
    /// Q4 to January of the following calendar year.
    FiscalQuarter,
    /// A fiscal-year range label such as `FY 2017-18`, mapped to April 1
    /// of the start year.
    FiscalYear,
}

impl PeriodMode {
    pub fn display_name(self) -> &'static str {
        match self {
            PeriodMode::YearMonth => "year-month",
            PeriodMode::CalendarQuarter => "calendar-quarter",
            PeriodMode::FiscalQuarter => "fiscal-quarter",
            PeriodMode::FiscalYear => "fiscal-year",
        }
    }
}

/// Named trailing window, measured back from a table's own latest date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Window {
    #[value(name = "3m")]
    ThreeMonths,
    #[value(name = "1y")]
    OneYear,
    #[value(name = "2y")]
    TwoYears,
    #[value(name = "3y")]
    ThreeYears,
    #[value(name = "5y")]
    FiveYears,
    #[value(name = "all")]
    All,
}

impl Window {
    /// Look-back length in days, or `None` for the unfiltered window.
    pub fn lookback_days(self) -> Option<i64> {
        match self {
            Window::ThreeMonths => Some(90),
            Window::OneYear => Some(365),
            Window::TwoYears => Some(730),
            Window::ThreeYears => Some(1095),
            Window::FiveYears => Some(1825),
            Window::All => None,
        }
    }
}

/// Equality filter on a categorical tag column, e.g. `Region=Urban`.
///
/// Matching is case-insensitive on both the tag name and the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub tag: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        value.trim().eq_ignore_ascii_case(self.value.trim())
    }
}

impl FromStr for TagFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter '{s}'. Expected TAG=VALUE."))?;
        let (tag, value) = (tag.trim(), value.trim());
        if tag.is_empty() || value.is_empty() {
            return Err(format!("Invalid filter '{s}'. Expected TAG=VALUE."));
        }
        Ok(Self::new(tag, value))
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}
