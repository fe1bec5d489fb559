//! Change calculation.

pub mod change;

pub use change::{compute_changes, monthly_only, round_one_decimal};
