//! Monthly to annual aggregation
//!
//! Fluxes and counts are summed over the twelve monthly totals. The driving
//! variables use a per-variable policy: precipitation accumulates (sum),
//! temperature and sunshine are states (mean of the monthly inputs).

use super::monthly::{alpha_index, moisture_index, MonthlyTotals};
use crate::climate::MonthlyDrivers;
use crate::core_types::MONTHS_PER_YEAR;
use crate::physics::GDD_BASES;

/// Annual scalars of one cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnnualTotals {
    /// Actual evapotranspiration (mm)
    pub aet: f64,
    /// Equilibrium evapotranspiration (mm)
    pub eet: f64,
    /// Potential evapotranspiration (mm)
    pub pet: f64,
    /// Evapotranspiration deficit (mm)
    pub det: f64,
    /// Photosynthetically active radiation (MJ/m²)
    pub par: f64,
    /// Annual AET/PET
    pub moisture_index: f64,
    /// Annual bounded AET/EET
    pub alpha_index: f64,
    /// Mean of the monthly temperatures (°C)
    pub temperature: f64,
    /// Total precipitation (mm)
    pub precipitation: f64,
    /// Mean of the monthly sunshine fractions
    pub sunshine: f64,
    /// Runoff (mm)
    pub runoff: f64,
    /// Growing-degree days per base temperature (°C·day)
    pub gdd: [f64; GDD_BASES],
    /// Chill days
    pub chill: u32,
}

/// How a driving variable is folded into its annual value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnualPolicy {
    /// Total over the year (accumulating quantities)
    Sum,
    /// Mean of the twelve monthly values (state quantities)
    Mean,
}

impl AnnualPolicy {
    /// Fold twelve monthly values
    #[must_use]
    pub fn fold(self, monthly: &[f64; MONTHS_PER_YEAR]) -> f64 {
        let total: f64 = monthly.iter().sum();
        match self {
            AnnualPolicy::Sum => total,
            AnnualPolicy::Mean => total / MONTHS_PER_YEAR as f64,
        }
    }
}

/// Folds monthly totals into annual scalars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualAggregator {
    priestley_taylor: f64,
}

impl AnnualAggregator {
    /// Policy for annual temperature
    pub const TEMPERATURE: AnnualPolicy = AnnualPolicy::Mean;
    /// Policy for annual precipitation
    pub const PRECIPITATION: AnnualPolicy = AnnualPolicy::Sum;
    /// Policy for annual sunshine fraction
    pub const SUNSHINE: AnnualPolicy = AnnualPolicy::Mean;

    /// Create an aggregator bounding alpha by `priestley_taylor`
    #[must_use]
    pub fn new(priestley_taylor: f64) -> Self {
        Self { priestley_taylor }
    }

    /// Fold monthly totals and monthly drivers into annual values
    #[must_use]
    pub fn aggregate(&self, monthly: &MonthlyTotals, drivers: &MonthlyDrivers) -> AnnualTotals {
        let sum = |values: &[f64; MONTHS_PER_YEAR]| AnnualPolicy::Sum.fold(values);

        let aet = sum(&monthly.aet);
        let eet = sum(&monthly.eet);
        let pet = sum(&monthly.pet);

        AnnualTotals {
            aet,
            eet,
            pet,
            det: sum(&monthly.det),
            par: sum(&monthly.par),
            moisture_index: moisture_index(aet, pet),
            alpha_index: alpha_index(aet, eet, self.priestley_taylor),
            temperature: Self::TEMPERATURE.fold(&drivers.temperature),
            precipitation: Self::PRECIPITATION.fold(&drivers.precipitation),
            sunshine: Self::SUNSHINE.fold(&drivers.sunshine),
            runoff: sum(&monthly.runoff),
            gdd: [sum(&monthly.gdd[0]), sum(&monthly.gdd[1]), sum(&monthly.gdd[2])],
            chill: monthly.chill.iter().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_policies() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        assert_eq!(AnnualPolicy::Sum.fold(&values), 78.0);
        assert_eq!(AnnualPolicy::Mean.fold(&values), 6.5);
    }

    #[test]
    fn test_annual_is_fold_of_monthly() {
        let mut monthly = MonthlyTotals::default();
        for m in 0..MONTHS_PER_YEAR {
            let x = m as f64 + 1.0;
            monthly.aet[m] = 10.0 * x;
            monthly.eet[m] = 12.0 * x;
            monthly.pet[m] = 15.0 * x;
            monthly.det[m] = 5.0 * x;
            monthly.runoff[m] = x;
            monthly.par[m] = 100.0 + x;
            monthly.gdd[0][m] = 30.0 * x;
            monthly.gdd[1][m] = 20.0 * x;
            monthly.gdd[2][m] = 10.0 * x;
            monthly.chill[m] = m as u32 % 3;
        }
        let drivers = MonthlyDrivers::uniform(8.0, 50.0, 0.3);
        let annual = AnnualAggregator::new(1.26).aggregate(&monthly, &drivers);

        assert_abs_diff_eq!(annual.aet, 780.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual.pet, 1170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual.det, 390.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual.runoff, 78.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual.par, 1278.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual.gdd[0], 2340.0, epsilon = 1e-9);
        assert_eq!(annual.chill, 12);
        assert_abs_diff_eq!(annual.moisture_index, 780.0 / 1170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annual.alpha_index, 780.0 / 936.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annual.temperature, 8.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annual.precipitation, 600.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annual.sunshine, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_no_demand_year() {
        let annual =
            AnnualAggregator::new(1.26).aggregate(&MonthlyTotals::default(), &MonthlyDrivers::default());
        assert_eq!(annual.moisture_index, 0.0);
        assert_eq!(annual.alpha_index, 0.0);
    }
}
