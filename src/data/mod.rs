//! Index-series sources.
//!
//! - live BLS API (`bls`)
//! - frozen JSON snapshots (`file`)

use crate::domain::{Observation, SeriesSelector};
use crate::error::AppError;

pub mod bls;
pub mod file;

pub use bls::BlsClient;
pub use file::FileSource;

/// Anything that can produce the observations of one CPI series.
pub trait SeriesSource {
    fn get(&self, selector: &SeriesSelector) -> Result<Vec<Observation>, AppError>;
}
