//! Monthly and annual aggregation of daily model output

pub mod annual;
pub mod monthly;

// Re-export main types
pub use annual::{AnnualAggregator, AnnualPolicy, AnnualTotals};
pub use monthly::{alpha_index, moisture_index, MonthlyAggregator, MonthlyTotals};
