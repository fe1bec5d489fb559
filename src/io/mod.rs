//! Output helpers.
//!
//! - change-record writers (JSON/CSV) and observation snapshots (`export`)

pub mod export;

pub use export::*;
