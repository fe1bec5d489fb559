//! `cpi-changes` library crate.
//!
//! The binaries (`cpi`, `month-to-month`, `year-over-year`) are thin wrappers
//! around this library so that:
//!
//! - the change calculation is testable without spawning processes or hitting the network
//! - series sources are swappable (live API vs. frozen snapshot)

pub mod app;
pub mod calc;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
