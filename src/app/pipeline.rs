//! Shared "fetch → filter → change" logic used by every front-end.
//!
//! The `cpi` subcommands and the zero-argument preset binaries only differ in
//! which selectors and which `ChangeConfig` they hand to this module.

use crate::calc::{compute_changes, monthly_only};
use crate::data::SeriesSource;
use crate::domain::{
    ALL_ITEMS, CORE_ITEMS, ChangeConfig, ChangeRecord, Lag, Observation, Rounding, SeriesSelector,
};
use crate::error::AppError;

/// The two published reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Seasonally adjusted headline CPI, change against the previous month.
    MonthToMonth,
    /// Unadjusted headline and core CPI, change against the same month a year
    /// earlier, headline first.
    YearOverYear,
}

impl Preset {
    pub fn selectors(self) -> Vec<SeriesSelector> {
        match self {
            Preset::MonthToMonth => vec![SeriesSelector::default()],
            Preset::YearOverYear => vec![
                SeriesSelector::items(ALL_ITEMS, false),
                SeriesSelector::items(CORE_ITEMS, false),
            ],
        }
    }

    pub fn config(self, rounding: Rounding) -> ChangeConfig {
        let lag = match self {
            Preset::MonthToMonth => Lag::MonthToMonth,
            Preset::YearOverYear => Lag::YearOverYear,
        };
        ChangeConfig {
            rounding,
            ..ChangeConfig::new(lag)
        }
    }
}

pub fn run_preset(source: &dyn SeriesSource, preset: Preset, rounding: Rounding) -> Result<Vec<ChangeRecord>, AppError> {
    run_changes(source, &preset.selectors(), &preset.config(rounding))
}

/// Compute changes for each selector independently and concatenate the
/// results in selector order.
pub fn run_changes(
    source: &dyn SeriesSource,
    selectors: &[SeriesSelector],
    config: &ChangeConfig,
) -> Result<Vec<ChangeRecord>, AppError> {
    let mut out = Vec::new();
    for selector in selectors {
        out.extend(series_changes(source, selector, config)?);
    }
    Ok(out)
}

/// Change records for one series.
pub fn series_changes(
    source: &dyn SeriesSource,
    selector: &SeriesSelector,
    config: &ChangeConfig,
) -> Result<Vec<ChangeRecord>, AppError> {
    let series_id = selector.resolve_series_id()?;
    let observations = source.get(selector)?;

    let monthly = monthly_only(&observations);
    if monthly.is_empty() {
        return Err(AppError::data_unavailable(&series_id));
    }
    log::info!(
        "{series_id}: {} observations, {} monthly",
        observations.len(),
        monthly.len()
    );

    let label = selector.label();
    let records = compute_changes(&series_id, Some(&label), &monthly, config)?;
    log::info!("{series_id}: {} change records", records.len());
    Ok(records)
}

/// Raw observations for each selector, concatenated in selector order.
pub fn fetch_observations(
    source: &dyn SeriesSource,
    selectors: &[SeriesSelector],
    monthly: bool,
) -> Result<Vec<Observation>, AppError> {
    let mut out = Vec::new();
    for selector in selectors {
        let series_id = selector.resolve_series_id()?;
        let mut observations = source.get(selector)?;
        if monthly {
            observations = monthly_only(&observations);
        }
        if observations.is_empty() {
            return Err(AppError::data_unavailable(&series_id));
        }
        observations.sort_by_key(|o| o.date);
        out.extend(observations);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileSource;
    use crate::domain::{OutputFormat, PeriodType};
    use crate::error::ErrorKind;
    use crate::io::write_records;
    use chrono::{Months, NaiveDate};

    fn month(i: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .checked_add_months(Months::new(i))
            .unwrap()
    }

    fn monthly(series_id: &str, values: impl IntoIterator<Item = f64>) -> Vec<Observation> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Observation {
                series_id: series_id.to_string(),
                date: month(i as u32),
                value,
                period_type: PeriodType::Monthly,
            })
            .collect()
    }

    /// Thirty months of headline and core CPI, plus annual averages mixed in.
    fn fixture() -> FileSource {
        let mut obs = Vec::new();
        for id in ["CUSR0000SA0", "CUUR0000SA0"] {
            obs.extend(monthly(id, (0..30).map(|i| 300.0 + i as f64)));
        }
        obs.extend(monthly("CUUR0000SA0L1E", (0..30).map(|i| 310.0 + 0.5 * i as f64)));
        obs.push(Observation {
            series_id: "CUUR0000SA0".to_string(),
            date: month(0),
            value: 305.0,
            period_type: PeriodType::Annual,
        });
        // Newest first, as the API returns them.
        obs.reverse();
        FileSource::from_observations(obs)
    }

    #[test]
    fn month_to_month_preset() {
        let records = run_preset(&fixture(), Preset::MonthToMonth, Rounding::HalfEven).unwrap();
        assert_eq!(records.len(), 13);
        assert!(records.iter().all(|r| r.series_id == "CUSR0000SA0"));
        assert_eq!(records[0].date, month(17));
        assert_eq!(records[12].date, month(29));
        // 329 / 328 - 1 = 0.305%
        assert_eq!(records[12].change, 0.3);
        assert_eq!(records[12].label.as_deref(), Some("All items"));
    }

    #[test]
    fn year_over_year_concatenates_headline_then_core() {
        let records = run_preset(&fixture(), Preset::YearOverYear, Rounding::HalfEven).unwrap();
        assert_eq!(records.len(), 26);
        assert!(records[..13].iter().all(|r| r.series_id == "CUUR0000SA0"));
        assert!(records[13..].iter().all(|r| r.series_id == "CUUR0000SA0L1E"));
        assert_eq!(records[13].label.as_deref(), Some(CORE_ITEMS));

        // 329 / 317 - 1 = 3.785%
        assert_eq!(records[12].change, 3.8);
        // 324.5 / 318.5 - 1 = 1.884%
        assert_eq!(records[25].change, 1.9);
    }

    #[test]
    fn identical_input_gives_identical_json() {
        let render = || {
            let records = run_preset(&fixture(), Preset::YearOverYear, Rounding::HalfEven).unwrap();
            let mut out = Vec::new();
            write_records(&mut out, &records, OutputFormat::Json).unwrap();
            out
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn missing_series_is_data_unavailable() {
        let err = series_changes(
            &fixture(),
            &SeriesSelector::items("Shelter", true),
            &ChangeConfig::new(Lag::MonthToMonth),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }

    #[test]
    fn annual_only_series_is_data_unavailable() {
        let source = FileSource::from_observations(vec![Observation {
            series_id: "CUSR0000SA0".to_string(),
            date: month(0),
            value: 300.0,
            period_type: PeriodType::Annual,
        }]);
        let err = run_preset(&source, Preset::MonthToMonth, Rounding::HalfEven).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }

    #[test]
    fn fetch_observations_sorts_and_filters() {
        let obs = fetch_observations(&fixture(), &[SeriesSelector::items(ALL_ITEMS, false)], true).unwrap();
        assert_eq!(obs.len(), 30);
        assert_eq!(obs[0].date, month(0));
        assert!(obs.iter().all(|o| o.period_type == PeriodType::Monthly));

        let all = fetch_observations(&fixture(), &[SeriesSelector::items(ALL_ITEMS, false)], false).unwrap();
        assert_eq!(all.len(), 31);
    }
}
