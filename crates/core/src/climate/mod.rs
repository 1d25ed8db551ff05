//! Climate drivers: interpolation, radiation and reference climates

pub mod drivers;
pub mod interpolation;
pub mod presets;
pub mod radiation;

// Re-export main types
pub use drivers::{DailyDrivers, MonthlyDrivers};
pub use interpolation::ClimateInterpolator;
pub use presets::ClimatePreset;
pub use radiation::{daily_radiation, DailyRadiation};
