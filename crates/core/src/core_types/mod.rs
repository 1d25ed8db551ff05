//! Core types and utilities

pub mod calendar;
pub mod site;
pub mod units;

// Re-export
pub use calendar::{
    month_days, month_of_day, DAYS_PER_YEAR, MID_MONTH_DAYS, MONTHS_PER_YEAR, MONTH_LENGTHS,
    MONTH_NAMES, MONTH_STARTS,
};
pub use site::{Coordinates, SiteCharacteristics};
pub use units::*;
