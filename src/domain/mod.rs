//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - source-side records (`Observation`, `PeriodType`)
//! - calculator configuration (`Lag`, `Rounding`, `ChangeConfig`)
//! - series selection (`SeriesSelector`) and the item catalog
//! - calculator output (`ChangeRecord`)

pub mod items;
pub mod types;

pub use items::*;
pub use types::*;
