//! Shared domain types.
//!
//! Observations come in from a series source, change records go out to the
//! writers. Both are plain serializable values with no lifecycle of their own.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::items::{item_code, item_names};
use crate::error::AppError;

/// Publication frequency of a single observation.
///
/// BLS mixes annual (`M13`, `S03`) and semiannual (`S01`, `S02`) averages into
/// the same payload as the monthly values; only `Monthly` feeds the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Monthly,
    Semiannual,
    Annual,
}

impl PeriodType {
    pub fn is_monthly(self) -> bool {
        matches!(self, PeriodType::Monthly)
    }
}

/// One published index value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub series_id: String,
    pub date: NaiveDate,
    pub value: f64,
    pub period_type: PeriodType,
}

/// A value paired with its percentage change against the lagged observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    #[serde(serialize_with = "serialize_iso_datetime")]
    pub date: NaiveDate,
    pub value: f64,
    pub change: f64,
    pub series_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Dates go out as midnight timestamps with millisecond precision
/// (`2024-01-01T00:00:00.000`), the shape downstream consumers already parse.
fn serialize_iso_datetime<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso_datetime(*date))
}

pub fn format_iso_datetime(date: NaiveDate) -> String {
    format!("{}T00:00:00.000", date.format("%Y-%m-%d"))
}

/// Comparison distance, in monthly periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Lag {
    /// Against the immediately preceding month.
    MonthToMonth,
    /// Against the same month one year earlier.
    YearOverYear,
}

impl Lag {
    pub fn periods(self) -> usize {
        match self {
            Lag::MonthToMonth => 1,
            Lag::YearOverYear => 12,
        }
    }
}

/// How a change is rounded to one decimal place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Ties go to the even neighbour (0.25 -> 0.2, 0.75 -> 0.8).
    #[default]
    HalfEven,
    /// Ties go away from zero (0.25 -> 0.3, -0.25 -> -0.3).
    HalfAway,
}

/// What to do with a series too short to yield a single change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortHistoryPolicy {
    /// Produce no records.
    #[default]
    Empty,
    /// Fail with an insufficient-history error.
    Fail,
}

/// Number of records kept by both published presets.
pub const DEFAULT_WINDOW: usize = 13;

/// Parameters of one change computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeConfig {
    pub lag: Lag,
    /// Keep at most this many of the most recent records.
    pub window: usize,
    pub rounding: Rounding,
    pub short_history: ShortHistoryPolicy,
}

impl ChangeConfig {
    pub fn new(lag: Lag) -> Self {
        Self {
            lag,
            window: DEFAULT_WINDOW,
            rounding: Rounding::default(),
            short_history: ShortHistoryPolicy::default(),
        }
    }
}

/// Output encoding for change records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Default item category.
pub const ALL_ITEMS: &str = "All items";
/// Core CPI: all items less food and energy.
pub const CORE_ITEMS: &str = "All items less food and energy";

/// Which CPI-U series to fetch.
///
/// Defaults to the seasonally adjusted, U.S. city average, all-items index.
/// `series_id` bypasses the item catalog when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSelector {
    pub seasonally_adjusted: bool,
    pub items: String,
    pub series_id: Option<String>,
}

impl Default for SeriesSelector {
    fn default() -> Self {
        Self {
            seasonally_adjusted: true,
            items: ALL_ITEMS.to_string(),
            series_id: None,
        }
    }
}

impl SeriesSelector {
    pub fn items(items: impl Into<String>, seasonally_adjusted: bool) -> Self {
        Self {
            seasonally_adjusted,
            items: items.into(),
            series_id: None,
        }
    }

    /// Resolve to a BLS series id: `CU` + `S`/`U` + `R` (monthly) + `0000`
    /// (U.S. city average) + item code.
    pub fn resolve_series_id(&self) -> Result<String, AppError> {
        if let Some(id) = &self.series_id {
            let id = id.trim();
            if id.is_empty() {
                return Err(AppError::config("Empty series id."));
            }
            return Ok(id.to_ascii_uppercase());
        }

        let code = item_code(&self.items).ok_or_else(|| {
            let known: Vec<&str> = item_names().collect();
            AppError::config(format!(
                "Unknown CPI item '{}'. Known items: {}.",
                self.items,
                known.join(", ")
            ))
        })?;
        let seasonal = if self.seasonally_adjusted { 'S' } else { 'U' };
        Ok(format!("CU{seasonal}R0000{code}"))
    }

    /// Label attached to records produced from this selector.
    pub fn label(&self) -> String {
        match &self.series_id {
            Some(id) => id.trim().to_ascii_uppercase(),
            None => self.items.clone(),
        }
    }
}
