//! Lagged percentage changes over a monthly index series.
//!
//! For each observation `i` at or after the lag `L`:
//!
//! `change = ((value[i] / value[i - L]) - 1) * 100`, rounded to one decimal.
//!
//! Observations without a predecessor at distance `L` produce nothing, and only
//! the most recent `window` records are kept.

use crate::domain::{ChangeConfig, ChangeRecord, Observation, Rounding, ShortHistoryPolicy};
use crate::error::{AppError, ErrorKind};

/// Keep only monthly observations, preserving input order.
pub fn monthly_only(observations: &[Observation]) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| o.period_type.is_monthly())
        .cloned()
        .collect()
}

/// Compute change records for a single series.
///
/// `observations` must already be restricted to monthly values; their order
/// does not matter (they are sorted by date, ties keep input order).
pub fn compute_changes(
    series_id: &str,
    label: Option<&str>,
    observations: &[Observation],
    config: &ChangeConfig,
) -> Result<Vec<ChangeRecord>, AppError> {
    let lag = config.lag.periods();

    let mut sorted: Vec<&Observation> = observations.iter().collect();
    sorted.sort_by_key(|o| o.date);

    if sorted.len() <= lag {
        return match config.short_history {
            ShortHistoryPolicy::Empty => {
                log::debug!(
                    "{series_id}: {} observations, lag {lag}; nothing to compute",
                    sorted.len()
                );
                Ok(Vec::new())
            }
            ShortHistoryPolicy::Fail => Err(AppError::insufficient_history(series_id, sorted.len(), lag)),
        };
    }

    // Only the tail that survives the window is computed.
    let available = sorted.len() - lag;
    let start = lag + available.saturating_sub(config.window);

    let mut out = Vec::with_capacity(sorted.len() - start);
    for i in start..sorted.len() {
        let base = sorted[i - lag];
        let current = sorted[i];

        if !(base.value.is_finite() && base.value != 0.0 && current.value.is_finite()) {
            return Err(AppError::new(
                ErrorKind::InvalidData,
                format!(
                    "{series_id}: cannot compute change for {} against {} (values {} and {}).",
                    current.date, base.date, current.value, base.value
                ),
            ));
        }

        let raw = (current.value / base.value - 1.0) * 100.0;
        let change = round_one_decimal(raw, config.rounding);
        if !change.is_finite() {
            return Err(AppError::new(
                ErrorKind::InvalidData,
                format!("{series_id}: non-finite change at {}.", current.date),
            ));
        }

        out.push(ChangeRecord {
            date: current.date,
            value: current.value,
            change,
            series_id: series_id.to_string(),
            label: label.map(str::to_string),
        });
    }

    Ok(out)
}

/// Round to one decimal place.
///
/// Negative zero is folded into zero so a flat month serializes as `0.0`.
pub fn round_one_decimal(x: f64, rounding: Rounding) -> f64 {
    let scaled = x * 10.0;
    let rounded = match rounding {
        Rounding::HalfEven => scaled.round_ties_even(),
        Rounding::HalfAway => scaled.round(),
    } / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
