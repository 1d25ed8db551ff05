//! Daily to monthly aggregation
//!
//! Every flux and count is a plain sum over the days of the month. The two
//! ratio indices are computed from those sums with a zero fallback when the
//! denominator vanishes, so no NaN ever reaches the exported matrices.

use crate::core_types::{month_days, MONTHS_PER_YEAR};
use crate::physics::{DailyThermal, DailyWaterBalance, GDD_BASES};

/// Moisture index AET/PET, 0 when PET is not positive
#[inline]
#[must_use]
pub fn moisture_index(aet: f64, pet: f64) -> f64 {
    if pet > 0.0 {
        (aet / pet).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Alpha index AET/EET bounded by the Priestley-Taylor coefficient, 0 when EET is not positive
///
/// This is the Priestley-Taylor coefficient actually realised: it equals the
/// full coefficient when water is not limiting and falls towards zero as the
/// soil dries.
#[inline]
#[must_use]
pub fn alpha_index(aet: f64, eet: f64, priestley_taylor: f64) -> f64 {
    if eet > 0.0 {
        (aet / eet).clamp(0.0, priestley_taylor)
    } else {
        0.0
    }
}

/// Monthly totals and indices of one cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyTotals {
    /// Actual evapotranspiration (mm)
    pub aet: [f64; MONTHS_PER_YEAR],
    /// Equilibrium evapotranspiration (mm)
    pub eet: [f64; MONTHS_PER_YEAR],
    /// Potential evapotranspiration (mm)
    pub pet: [f64; MONTHS_PER_YEAR],
    /// Evapotranspiration deficit (mm)
    pub det: [f64; MONTHS_PER_YEAR],
    /// Runoff (mm)
    pub runoff: [f64; MONTHS_PER_YEAR],
    /// Photosynthetically active radiation (MJ/m²)
    pub par: [f64; MONTHS_PER_YEAR],
    /// Growing-degree days per base temperature (°C·day)
    pub gdd: [[f64; MONTHS_PER_YEAR]; GDD_BASES],
    /// Chill days
    pub chill: [u32; MONTHS_PER_YEAR],
    /// AET/PET
    pub moisture_index: [f64; MONTHS_PER_YEAR],
    /// Bounded AET/EET
    pub alpha_index: [f64; MONTHS_PER_YEAR],
}

impl MonthlyTotals {
    /// Zero all totals
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Folds daily series into monthly totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAggregator {
    priestley_taylor: f64,
}

impl MonthlyAggregator {
    /// Create an aggregator bounding alpha by `priestley_taylor`
    #[must_use]
    pub fn new(priestley_taylor: f64) -> Self {
        Self { priestley_taylor }
    }

    /// Sum the daily series of each month and derive the indices
    pub fn aggregate(
        &self,
        water: &DailyWaterBalance,
        thermal: &DailyThermal,
        out: &mut MonthlyTotals,
    ) {
        for month in 0..MONTHS_PER_YEAR {
            let days = month_days(month);
            let sum = |series: &[f64]| series[days.clone()].iter().sum::<f64>();

            out.aet[month] = sum(&water.aet);
            out.eet[month] = sum(&water.eet);
            out.pet[month] = sum(&water.pet);
            out.det[month] = sum(&water.det);
            out.runoff[month] = sum(&water.runoff);
            out.par[month] = sum(&water.par);
            for base in 0..GDD_BASES {
                out.gdd[base][month] = sum(&thermal.gdd[base]);
            }
            out.chill[month] = thermal.chill[days.clone()].iter().filter(|&&c| c).count() as u32;

            out.moisture_index[month] = moisture_index(out.aet[month], out.pet[month]);
            out.alpha_index[month] =
                alpha_index(out.aet[month], out.eet[month], self.priestley_taylor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{DAYS_PER_YEAR, MONTH_LENGTHS};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_index_fallbacks() {
        assert_eq!(moisture_index(0.0, 0.0), 0.0);
        assert_eq!(moisture_index(3.0, 0.0), 0.0);
        assert_eq!(alpha_index(1.0, 0.0, 1.26), 0.0);
        assert_eq!(alpha_index(2.0, 1.0, 1.26), 1.26);
        assert_abs_diff_eq!(moisture_index(1.0, 4.0), 0.25);
        assert_abs_diff_eq!(alpha_index(0.63, 1.0, 1.26), 0.63);
    }

    #[test]
    fn test_sums_follow_month_lengths() {
        let mut water = DailyWaterBalance::default();
        water.aet = [1.0; DAYS_PER_YEAR];
        water.pet = [2.0; DAYS_PER_YEAR];
        water.eet = [2.0 / 1.26; DAYS_PER_YEAR];
        water.det = [1.0; DAYS_PER_YEAR];
        let mut thermal = DailyThermal::default();
        thermal.chill[0] = true;
        thermal.chill[40] = true;
        thermal.chill[364] = true;
        thermal.gdd[1] = [3.0; DAYS_PER_YEAR];

        let mut totals = MonthlyTotals::default();
        MonthlyAggregator::new(1.26).aggregate(&water, &thermal, &mut totals);

        for month in 0..MONTHS_PER_YEAR {
            let days = MONTH_LENGTHS[month] as f64;
            assert_abs_diff_eq!(totals.aet[month], days, epsilon = 1e-9);
            assert_abs_diff_eq!(totals.pet[month], 2.0 * days, epsilon = 1e-9);
            assert_abs_diff_eq!(totals.gdd[1][month], 3.0 * days, epsilon = 1e-9);
            assert_abs_diff_eq!(totals.moisture_index[month], 0.5, epsilon = 1e-12);
            assert_abs_diff_eq!(totals.alpha_index[month], 0.63, epsilon = 1e-9);
            assert_eq!(totals.runoff[month], 0.0);
        }
        assert_eq!(totals.chill[0], 1);
        assert_eq!(totals.chill[1], 1);
        assert_eq!(totals.chill[11], 1);
        assert_eq!(totals.chill.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_zero_demand_month_has_zero_indices() {
        let water = DailyWaterBalance::default();
        let thermal = DailyThermal::default();
        let mut totals = MonthlyTotals::default();
        MonthlyAggregator::new(1.26).aggregate(&water, &thermal, &mut totals);
        assert!(totals.moisture_index.iter().all(|&m| m == 0.0));
        assert!(totals.alpha_index.iter().all(|&a| a == 0.0));
    }
}
