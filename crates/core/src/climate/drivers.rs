//! Monthly and daily climate driver series for one cell

use super::interpolation::ClimateInterpolator;
use crate::config::ModelParameters;
use crate::core_types::{Fraction, DAYS_PER_YEAR, MONTHS_PER_YEAR};

/// The three monthly drivers supplied for a cell
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyDrivers {
    /// Mean monthly air temperature (°C)
    pub temperature: [f64; MONTHS_PER_YEAR],
    /// Monthly precipitation total (mm)
    pub precipitation: [f64; MONTHS_PER_YEAR],
    /// Mean monthly sunshine fraction (0-1)
    pub sunshine: [f64; MONTHS_PER_YEAR],
}

impl Default for MonthlyDrivers {
    fn default() -> Self {
        Self {
            temperature: [0.0; MONTHS_PER_YEAR],
            precipitation: [0.0; MONTHS_PER_YEAR],
            sunshine: [0.0; MONTHS_PER_YEAR],
        }
    }
}

impl MonthlyDrivers {
    /// Same value in every month for each driver
    #[must_use]
    pub fn uniform(temperature: f64, precipitation: f64, sunshine: f64) -> Self {
        Self {
            temperature: [temperature; MONTHS_PER_YEAR],
            precipitation: [precipitation; MONTHS_PER_YEAR],
            sunshine: [sunshine; MONTHS_PER_YEAR],
        }
    }

    /// Whether any monthly value of any driver is missing
    #[must_use]
    pub fn has_missing(&self, params: &ModelParameters) -> bool {
        self.temperature
            .iter()
            .chain(self.precipitation.iter())
            .chain(self.sunshine.iter())
            .any(|&v| params.is_missing(v))
    }

    /// Zero all values
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Interpolated daily drivers
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDrivers {
    /// Daily air temperature (°C)
    pub temperature: [f64; DAYS_PER_YEAR],
    /// Daily precipitation (mm/day)
    pub precipitation: [f64; DAYS_PER_YEAR],
    /// Daily sunshine fraction (0-1)
    pub sunshine: [f64; DAYS_PER_YEAR],
}

impl Default for DailyDrivers {
    fn default() -> Self {
        Self {
            temperature: [0.0; DAYS_PER_YEAR],
            precipitation: [0.0; DAYS_PER_YEAR],
            sunshine: [0.0; DAYS_PER_YEAR],
        }
    }
}

impl DailyDrivers {
    /// Fill the daily series from monthly drivers
    ///
    /// Temperature and sunshine are interpolated directly; precipitation
    /// totals are interpolated as a daily rate. Sunshine is clamped to
    /// `[0, 1]` and negative precipitation rates to zero.
    pub fn fill_from(&mut self, interpolator: &ClimateInterpolator, monthly: &MonthlyDrivers) {
        interpolator.interpolate(&monthly.temperature, &mut self.temperature);
        interpolator.interpolate(&monthly.sunshine, &mut self.sunshine);
        interpolator.interpolate_totals(&monthly.precipitation, &mut self.precipitation);

        for s in &mut self.sunshine {
            *s = *Fraction::new(*s);
        }
        for p in &mut self.precipitation {
            *p = p.max(0.0);
        }
    }

    /// Zero all values
    pub fn reset(&mut self) {
        self.temperature.fill(0.0);
        self.precipitation.fill(0.0);
        self.sunshine.fill(0.0);
    }
}
