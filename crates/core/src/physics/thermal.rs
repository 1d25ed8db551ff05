//! Growing-degree days and chill days
//!
//! Daily thermal indices derived from the interpolated temperature series:
//! - GDD above three base temperatures (0, 5 and 10 °C by default)
//! - Chill-day indicator: temperature at or below the chilling threshold

use crate::config::ModelParameters;
use crate::core_types::{Celsius, DAYS_PER_YEAR};

/// Number of growing-degree-day base temperatures tracked
pub const GDD_BASES: usize = 3;

/// Daily thermal series of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct DailyThermal {
    /// Daily growing-degree contribution per base temperature (°C·day)
    pub gdd: [[f64; DAYS_PER_YEAR]; GDD_BASES],
    /// Whether each day is a chill day
    pub chill: [bool; DAYS_PER_YEAR],
}

impl Default for DailyThermal {
    fn default() -> Self {
        Self {
            gdd: [[0.0; DAYS_PER_YEAR]; GDD_BASES],
            chill: [false; DAYS_PER_YEAR],
        }
    }
}

impl DailyThermal {
    /// Zero all series
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Running sum of one GDD series through the year
    ///
    /// `cumulative[d]` is the sum of contributions for days `0..=d`.
    #[must_use]
    pub fn cumulative_gdd(&self, base: usize) -> [f64; DAYS_PER_YEAR] {
        let mut running = [0.0; DAYS_PER_YEAR];
        let mut total = 0.0;
        for (day, value) in self.gdd[base].iter().enumerate() {
            total += value;
            running[day] = total;
        }
        running
    }

    /// Number of chill days in the year
    #[must_use]
    pub fn chill_days(&self) -> u32 {
        self.chill.iter().filter(|&&c| c).count() as u32
    }
}

/// Computes daily thermal indices from daily temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalSumAccumulator {
    bases: [Celsius; GDD_BASES],
    chill_threshold: Celsius,
}

impl ThermalSumAccumulator {
    /// Create an accumulator with the run's thresholds
    #[must_use]
    pub fn new(params: &ModelParameters) -> Self {
        Self {
            bases: params.gdd_thresholds,
            chill_threshold: params.chill_threshold,
        }
    }

    /// Fill the daily GDD contributions and chill indicators
    pub fn accumulate(&self, temperature: &[f64; DAYS_PER_YEAR], out: &mut DailyThermal) {
        for (day, &t) in temperature.iter().enumerate() {
            for (series, base) in out.gdd.iter_mut().zip(self.bases.iter()) {
                series[day] = base.excess(t);
            }
            out.chill[day] = t <= *self.chill_threshold;
        }
    }
}
