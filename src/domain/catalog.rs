//! The fixed set of indicators and their source-table configuration.
//!
//! Every indicator is loaded by the same CSV loader; what differs between them
//! lives here as data: file name, where the period comes from and how to read
//! it, which columns are numeric, and which columns are categorical tags.

use std::fmt;

use serde::Serialize;

use super::types::PeriodMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Gdp,
    Cpi,
    Gst,
    Unemployment,
    Forex,
    Iip,
    RepoRate,
    Trade,
    FinancialInclusion,
    DigitalPayment,
    Cli,
}

impl Indicator {
    pub const ALL: [Indicator; 11] = [
        Indicator::Gdp,
        Indicator::Cpi,
        Indicator::Gst,
        Indicator::Unemployment,
        Indicator::Forex,
        Indicator::Iip,
        Indicator::RepoRate,
        Indicator::Trade,
        Indicator::FinancialInclusion,
        Indicator::DigitalPayment,
        Indicator::Cli,
    ];

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    /// Resolve a user-supplied key (case-insensitive, `-` accepted for `_`).
    pub fn from_key(key: &str) -> Option<Indicator> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        Indicator::ALL.into_iter().find(|i| i.key() == key)
    }

    pub fn spec(self) -> &'static IndicatorSpec {
        match self {
            Indicator::Gdp => &GDP,
            Indicator::Cpi => &CPI,
            Indicator::Gst => &GST,
            Indicator::Unemployment => &UNEMPLOYMENT,
            Indicator::Forex => &FOREX,
            Indicator::Iip => &IIP,
            Indicator::RepoRate => &REPO_RATE,
            Indicator::Trade => &TRADE,
            Indicator::FinancialInclusion => &FINANCIAL_INCLUSION,
            Indicator::DigitalPayment => &DIGITAL_PAYMENT,
            Indicator::Cli => &CLI,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where a row's period descriptor lives and how to interpret it.
#[derive(Debug, Clone, Copy)]
pub struct PeriodSource {
    /// Separate year column. `None` means the year is embedded in the period label.
    pub year_column: Option<&'static str>,
    pub period_column: &'static str,
    pub mode: PeriodMode,
}

/// Per-indicator configuration record.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    pub file_name: &'static str,
    pub period: PeriodSource,
    /// Numeric columns; the first one is the primary column used for
    /// statistics and summaries when no column is requested.
    pub value_columns: &'static [&'static str],
    pub tag_columns: &'static [&'static str],
}

impl IndicatorSpec {
    pub fn primary_column(&self) -> &'static str {
        self.value_columns[0]
    }
}

const fn monthly(column: &'static str) -> PeriodSource {
    PeriodSource {
        year_column: Some("Year"),
        period_column: column,
        mode: PeriodMode::YearMonth,
    }
}

// The quarterly source tables label quarters of the calendar year.
const QUARTERLY: PeriodSource = PeriodSource {
    year_column: Some("Year"),
    period_column: "Quarter",
    mode: PeriodMode::CalendarQuarter,
};

static GDP: IndicatorSpec = IndicatorSpec {
    key: "gdp",
    name: "GDP Growth Rate",
    description: "Quarterly GDP growth percentage",
    category: "Growth",
    unit: "%",
    file_name: "gdp_growth_rate.csv",
    period: QUARTERLY,
    value_columns: &["GDP_Growth_Percent"],
    tag_columns: &[],
};

static CPI: IndicatorSpec = IndicatorSpec {
    key: "cpi",
    name: "Consumer Price Index",
    description: "Urban and Rural inflation rates",
    category: "Inflation",
    unit: "Index",
    file_name: "consumer_price_index.csv",
    period: monthly("Month"),
    value_columns: &["Inflation_Rate", "CPI"],
    tag_columns: &["Region"],
};

static GST: IndicatorSpec = IndicatorSpec {
    key: "gst",
    name: "GST Collections",
    description: "Monthly GST revenue collections",
    category: "Revenue",
    unit: "₹ Crores",
    file_name: "gst_collections.csv",
    period: monthly("Month"),
    value_columns: &["GST_Collections_Cr"],
    tag_columns: &[],
};

static UNEMPLOYMENT: IndicatorSpec = IndicatorSpec {
    key: "unemployment",
    name: "Unemployment Rate",
    description: "State-wise unemployment percentage",
    category: "Employment",
    unit: "%",
    file_name: "unemployment_rate.csv",
    period: monthly("Month"),
    value_columns: &["Unemployment_Rate"],
    tag_columns: &["State"],
};

static FOREX: IndicatorSpec = IndicatorSpec {
    key: "forex",
    name: "Forex Reserves",
    description: "Foreign exchange reserves",
    category: "Reserves",
    unit: "USD Billion",
    file_name: "forex_reserves.csv",
    period: monthly("Month"),
    value_columns: &["Forex_Reserves_USD_Bn"],
    tag_columns: &[],
};

static IIP: IndicatorSpec = IndicatorSpec {
    key: "iip",
    name: "IIP Growth",
    description: "Industrial production index growth",
    category: "Production",
    unit: "%",
    file_name: "iip.csv",
    period: monthly("Month"),
    value_columns: &["IIP_YOY_Growth"],
    tag_columns: &[],
};

static REPO_RATE: IndicatorSpec = IndicatorSpec {
    key: "repo_rate",
    name: "Repo Rate",
    description: "RBI benchmark interest rate",
    category: "Monetary",
    unit: "%",
    file_name: "repo_rate.csv",
    period: monthly("Month"),
    value_columns: &["Repo_Rate_Percent"],
    tag_columns: &[],
};

static TRADE: IndicatorSpec = IndicatorSpec {
    key: "trade",
    name: "Trade Balance",
    description: "Exports, Imports, and Balance",
    category: "Trade",
    unit: "USD Billion",
    file_name: "trade_balance.csv",
    period: monthly("Month"),
    value_columns: &["Trade_Balance_USD_Bn", "Exports_USD_Bn", "Imports_USD_Bn"],
    tag_columns: &[],
};

static FINANCIAL_INCLUSION: IndicatorSpec = IndicatorSpec {
    key: "financial_inclusion",
    name: "Financial Inclusion",
    description: "Banking penetration index",
    category: "Finance",
    unit: "Index",
    file_name: "financial_inclusion_index.csv",
    period: monthly("Month"),
    value_columns: &["FI_Index"],
    tag_columns: &[],
};

static DIGITAL_PAYMENT: IndicatorSpec = IndicatorSpec {
    key: "digital_payment",
    name: "Digital Payments",
    description: "UPI transaction volumes",
    category: "Digital",
    unit: "Million",
    file_name: "digital_payment_volume.csv",
    period: monthly("Month"),
    value_columns: &["Volume_Mn", "Value_Cr"],
    tag_columns: &["Payment_Mode"],
};

static CLI: IndicatorSpec = IndicatorSpec {
    key: "cli",
    name: "Composite Leading Indicator",
    description: "Economic forecasting indicator",
    category: "Forecast",
    unit: "Index",
    file_name: "composite_leading_indicator.csv",
    period: QUARTERLY,
    value_columns: &["CLI_Value"],
    tag_columns: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_key(indicator.key()), Some(indicator));
        }
        assert_eq!(Indicator::from_key("Repo-Rate"), Some(Indicator::RepoRate));
        assert_eq!(Indicator::from_key("bitcoin"), None);
    }

    #[test]
    fn every_spec_has_a_primary_column() {
        for indicator in Indicator::ALL {
            let spec = indicator.spec();
            assert!(!spec.value_columns.is_empty(), "{} has no value columns", spec.key);
            assert!(spec.file_name.ends_with(".csv"));
        }
    }
}
