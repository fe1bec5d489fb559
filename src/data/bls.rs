//! BLS public data API integration for CPI-U series.

use chrono::{Datelike, Local, NaiveDate};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::data::SeriesSource;
use crate::domain::{Observation, PeriodType, SeriesSelector};
use crate::error::AppError;

const BASE_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";
const STATUS_OK: &str = "REQUEST_SUCCEEDED";

/// Years of history requested before the current year. Three years covers
/// thirteen year-over-year records with room for a late publication.
pub const DEFAULT_LOOKBACK_YEARS: u16 = 3;
/// The API caps a single query at twenty years (ten without a key).
pub const MAX_LOOKBACK_YEARS: u16 = 19;

pub struct BlsClient {
    client: Client,
    api_key: Option<String>,
    lookback_years: u16,
}

impl BlsClient {
    /// Build a client, picking up an optional `BLS_API_KEY` from the
    /// environment or a `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("BLS_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let client = Client::builder()
            .user_agent(concat!("cpi-changes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::fetch(format!("Failed to build HTTP client: {e}")))?;

        log::debug!("BLS client ready (registration key: {})", api_key.is_some());
        Ok(Self {
            client,
            api_key,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
        })
    }

    pub fn with_lookback_years(mut self, years: u16) -> Result<Self, AppError> {
        if years > MAX_LOOKBACK_YEARS {
            return Err(AppError::config(format!(
                "Lookback of {years} years exceeds the API limit of {MAX_LOOKBACK_YEARS}."
            )));
        }
        if years > 9 && self.api_key.is_none() {
            log::warn!("Lookback of {years} years without BLS_API_KEY; the API may truncate to ten years.");
        }
        self.lookback_years = years;
        Ok(self)
    }

    fn fetch_series(&self, series_id: &str) -> Result<Vec<Observation>, AppError> {
        let end_year = Local::now().year();
        let start_year = end_year - i32::from(self.lookback_years);

        let request = SeriesRequest {
            seriesid: vec![series_id],
            startyear: start_year.to_string(),
            endyear: end_year.to_string(),
            registrationkey: self.api_key.as_deref(),
        };

        log::info!("Fetching {series_id} from BLS ({start_year}-{end_year})");

        let resp = self
            .client
            .post(BASE_URL)
            .json(&request)
            .send()
            .map_err(|e| AppError::fetch(format!("BLS request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "BLS request failed with status {}.",
                resp.status()
            )));
        }

        let body: SeriesResponse = resp
            .json()
            .map_err(|e| AppError::fetch(format!("Failed to parse BLS response: {e}")))?;

        parse_response(series_id, body)
    }
}

impl SeriesSource for BlsClient {
    fn get(&self, selector: &SeriesSelector) -> Result<Vec<Observation>, AppError> {
        let series_id = selector.resolve_series_id()?;
        self.fetch_series(&series_id)
    }
}

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    seriesid: Vec<&'a str>,
    startyear: String,
    endyear: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrationkey: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    status: String,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "Results", default)]
    results: Option<ResultsBlock>,
}

#[derive(Debug, Deserialize)]
struct ResultsBlock {
    #[serde(default)]
    series: Vec<SeriesBlock>,
}

#[derive(Debug, Deserialize)]
struct SeriesBlock {
    #[serde(rename = "seriesID")]
    series_id: String,
    #[serde(default)]
    data: Vec<DataPoint>,
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    year: String,
    period: String,
    value: String,
}

fn parse_response(series_id: &str, body: SeriesResponse) -> Result<Vec<Observation>, AppError> {
    if body.status != STATUS_OK {
        return Err(AppError::fetch(format!(
            "BLS request not processed ({}): {}",
            body.status,
            body.message.join(" ")
        )));
    }
    for msg in &body.message {
        log::warn!("BLS: {msg}");
    }

    let Some(block) = body
        .results
        .into_iter()
        .flat_map(|r| r.series)
        .find(|s| s.series_id.eq_ignore_ascii_case(series_id))
    else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(block.data.len());
    for point in block.data {
        let value = match parse_value(&point.value) {
            Some(v) => v,
            None => {
                log::debug!("{series_id}: skipping {} {} value '{}'", point.year, point.period, point.value);
                continue;
            }
        };
        let year: i32 = point
            .year
            .trim()
            .parse()
            .map_err(|e| AppError::fetch(format!("Invalid BLS year '{}': {e}", point.year)))?;
        let (date, period_type) = parse_period(year, &point.period)
            .ok_or_else(|| AppError::fetch(format!("Invalid BLS period '{}' for {year}.", point.period)))?;

        out.push(Observation {
            series_id: block.series_id.clone(),
            date,
            value,
            period_type,
        });
    }

    Ok(out)
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Map a BLS period code to the date it is reported under.
///
/// `M01`..`M12` are months, `M13` the annual average, `S01`/`S02` the first
/// and second half-year averages, `S03` the annual average of a semiannual series.
fn parse_period(year: i32, period: &str) -> Option<(NaiveDate, PeriodType)> {
    let period = period.trim();
    let (prefix, number) = period.split_at_checked(1)?;
    let number: u32 = number.parse().ok()?;

    let (month, period_type) = match (prefix, number) {
        ("M", 1..=12) => (number, PeriodType::Monthly),
        ("M", 13) => (1, PeriodType::Annual),
        ("S", 1) => (1, PeriodType::Semiannual),
        ("S", 2) => (7, PeriodType::Semiannual),
        ("S", 3) => (1, PeriodType::Annual),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, 1).map(|d| (d, period_type))
}
