//! Frozen observation snapshots.
//!
//! A snapshot is the JSON array written by `cpi series`; replaying it gives
//! byte-identical output without touching the network.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::SeriesSource;
use crate::domain::{Observation, SeriesSelector};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct FileSource {
    observations: Vec<Observation>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::config(format!("Failed to open snapshot '{}': {e}", path.display())))?;
        let observations: Vec<Observation> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::config(format!("Invalid snapshot JSON '{}': {e}", path.display())))?;
        log::info!("Loaded {} observations from {}", observations.len(), path.display());
        Ok(Self { observations })
    }

    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl SeriesSource for FileSource {
    fn get(&self, selector: &SeriesSelector) -> Result<Vec<Observation>, AppError> {
        let series_id = selector.resolve_series_id()?;
        Ok(self
            .observations
            .iter()
            .filter(|o| o.series_id.eq_ignore_ascii_case(&series_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CORE_ITEMS, PeriodType};
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    #[test]
    fn reads_snapshot_and_filters_by_series() {
        let path = std::env::temp_dir().join(format!("cpi_snapshot_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                {"series_id": "CUUR0000SA0", "date": "2024-01-01", "value": 308.417, "period_type": "monthly"},
                {"series_id": "CUUR0000SA0L1E", "date": "2024-01-01", "value": 314.438, "period_type": "monthly"},
                {"series_id": "CUUR0000SA0", "date": "2023-01-01", "value": 304.702, "period_type": "annual"}
            ]"#,
        )
        .unwrap();

        let source = FileSource::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let headline = source.get(&SeriesSelector::items("All items", false)).unwrap();
        assert_eq!(headline.len(), 2);
        assert_eq!(headline[1].period_type, PeriodType::Annual);

        let core = source.get(&SeriesSelector::items(CORE_ITEMS, false)).unwrap();
        assert_eq!(core.len(), 1);
        assert_eq!(core[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(source.get(&SeriesSelector::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = FileSource::open(Path::new("/nonexistent/cpi.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
