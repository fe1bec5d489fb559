//! Command-line parsing for the CPI change reports.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fetch and calculation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data::bls::DEFAULT_LOOKBACK_YEARS;
use crate::domain::{ALL_ITEMS, DEFAULT_WINDOW, Lag, OutputFormat, Rounding, SeriesSelector};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cpi", version, about = "CPI-U percentage changes (BLS-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seasonally adjusted all-items CPI, change vs. the previous month (last 13 months).
    MonthToMonth(PresetArgs),
    /// Unadjusted all-items and core CPI, change vs. a year earlier (last 13 months each).
    YearOverYear(PresetArgs),
    /// Changes for arbitrary series, lag and window.
    Changes(ChangesArgs),
    /// Dump raw observations as JSON (re-usable later with `--input`).
    Series(SeriesArgs),
}

/// Where observations come from.
#[derive(Debug, Parser, Clone)]
pub struct SourceArgs {
    /// Read observations from a snapshot written by `cpi series` instead of the BLS API.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Years of history to request from the BLS API.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_YEARS)]
    pub lookback_years: u16,
}

/// Which series to select.
#[derive(Debug, Parser, Clone)]
pub struct SelectorArgs {
    /// CPI item name (repeatable), e.g. "All items less food and energy".
    #[arg(long = "items", value_name = "NAME")]
    pub items: Vec<String>,

    /// Explicit BLS series id (repeatable), bypasses the item catalog.
    #[arg(long = "series-id", value_name = "ID")]
    pub series_ids: Vec<String>,

    /// Use the not seasonally adjusted variant of each item.
    #[arg(long)]
    pub not_seasonally_adjusted: bool,
}

impl SelectorArgs {
    /// Item selectors first, then explicit ids; all-items when nothing is given.
    pub fn selectors(&self) -> Vec<SeriesSelector> {
        let seasonally_adjusted = !self.not_seasonally_adjusted;
        let mut out: Vec<SeriesSelector> = self
            .items
            .iter()
            .map(|items| SeriesSelector::items(items.clone(), seasonally_adjusted))
            .collect();
        out.extend(self.series_ids.iter().map(|id| SeriesSelector {
            seasonally_adjusted,
            items: ALL_ITEMS.to_string(),
            series_id: Some(id.clone()),
        }));
        if out.is_empty() {
            out.push(SeriesSelector::items(ALL_ITEMS, seasonally_adjusted));
        }
        out
    }
}

/// Options for the two published presets.
#[derive(Debug, Parser, Clone)]
pub struct PresetArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Tie-breaking rule when rounding to one decimal.
    #[arg(long, value_enum, default_value_t = Rounding::HalfEven)]
    pub rounding: Rounding,
}

/// Options for `cpi changes`.
#[derive(Debug, Parser, Clone)]
pub struct ChangesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub selector: SelectorArgs,

    /// Comparison lag.
    #[arg(long, value_enum, default_value_t = Lag::MonthToMonth)]
    pub lag: Lag,

    /// Keep at most this many of the most recent records per series.
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Tie-breaking rule when rounding to one decimal.
    #[arg(long, value_enum, default_value_t = Rounding::HalfEven)]
    pub rounding: Rounding,

    /// Fail instead of printing nothing when a series is shorter than the lag.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Options for `cpi series`.
#[derive(Debug, Parser, Clone)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub selector: SelectorArgs,

    /// Drop annual and semiannual averages.
    #[arg(long)]
    pub monthly_only: bool,
}
