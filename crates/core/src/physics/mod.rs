//! Daily process models: soil water balance and thermal sums
//!
//! Both models consume the interpolated daily drivers of a single cell and
//! write into fixed-size daily arrays owned by that cell.

pub mod thermal;
pub mod water_balance;

// Re-export main types
pub use thermal::{DailyThermal, ThermalSumAccumulator, GDD_BASES};
pub use water_balance::{
    bucket_step, BucketStep, DailyWaterBalance, SpinUpOutcome, WaterBalanceEngine,
};
