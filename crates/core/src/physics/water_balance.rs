//! Single-layer soil moisture bucket
//!
//! Each day the soil store `W` (mm) of capacity `fc` receives precipitation
//! `P` and loses actual evapotranspiration:
//!
//! ```text
//! AET = min(PET, W + P)
//! W'  = W + P - AET
//! RO  = max(W' - fc, 0)
//! W'  = clamp(W', 0, fc)
//! DET = PET - AET
//! ```
//!
//! When the starting moisture is unknown the annual cycle is repeated from a
//! full bucket until the year-end moisture stops changing (spin-up), so the
//! exported year is independent of the arbitrary starting point.
//!
//! # References
//! - Prentice, I.C. et al. (1993). Ecological Modelling, 65, 51-70
//! - Sykes, M.T., Prentice, I.C., Cramer, W. (1996). Journal of Biogeography, 23, 203-233

use crate::climate::{daily_radiation, DailyDrivers};
use crate::config::ModelParameters;
use crate::core_types::{Coordinates, SiteCharacteristics, DAYS_PER_YEAR};

/// Fluxes of one bucket step (all mm/day)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketStep {
    /// Actual evapotranspiration
    pub aet: f64,
    /// Precipitation that did not fit in the store
    pub runoff: f64,
    /// Evapotranspiration deficit (PET - AET)
    pub deficit: f64,
    /// Store at the end of the day
    pub moisture: f64,
}

/// Advance the bucket by one day
///
/// # Arguments
/// * `moisture` - Store at the start of the day (mm), assumed within `[0, fc]`
/// * `precipitation` - Precipitation (mm/day)
/// * `pet` - Potential evapotranspiration (mm/day)
/// * `field_capacity` - Store capacity (mm); non-positive or NaN means no storage
///
/// # Returns
/// Fluxes and the new store, with `moisture` in `[0, max(fc, 0)]`
#[must_use]
pub fn bucket_step(moisture: f64, precipitation: f64, pet: f64, field_capacity: f64) -> BucketStep {
    let pet = pet.max(0.0);
    let precipitation = precipitation.max(0.0);

    if field_capacity.is_nan() || field_capacity <= 0.0 {
        // No storage: whatever is not evaporated the same day runs off
        let aet = pet.min(precipitation);
        return BucketStep {
            aet,
            runoff: precipitation - aet,
            deficit: pet - aet,
            moisture: 0.0,
        };
    }

    let available = moisture + precipitation;
    let aet = pet.min(available);
    let unclamped = available - aet;
    let runoff = (unclamped - field_capacity).max(0.0);

    BucketStep {
        aet,
        runoff,
        deficit: pet - aet,
        moisture: unclamped.clamp(0.0, field_capacity),
    }
}

/// Daily water balance series of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWaterBalance {
    /// Actual evapotranspiration (mm/day)
    pub aet: [f64; DAYS_PER_YEAR],
    /// Equilibrium evapotranspiration (mm/day)
    pub eet: [f64; DAYS_PER_YEAR],
    /// Potential evapotranspiration (mm/day)
    pub pet: [f64; DAYS_PER_YEAR],
    /// Evapotranspiration deficit (mm/day)
    pub det: [f64; DAYS_PER_YEAR],
    /// Runoff (mm/day)
    pub runoff: [f64; DAYS_PER_YEAR],
    /// Soil moisture at the end of each day (mm)
    pub soil_moisture: [f64; DAYS_PER_YEAR],
    /// Photosynthetically active radiation (MJ/m²/day)
    pub par: [f64; DAYS_PER_YEAR],
}

impl Default for DailyWaterBalance {
    fn default() -> Self {
        Self {
            aet: [0.0; DAYS_PER_YEAR],
            eet: [0.0; DAYS_PER_YEAR],
            pet: [0.0; DAYS_PER_YEAR],
            det: [0.0; DAYS_PER_YEAR],
            runoff: [0.0; DAYS_PER_YEAR],
            soil_moisture: [0.0; DAYS_PER_YEAR],
            par: [0.0; DAYS_PER_YEAR],
        }
    }
}

impl DailyWaterBalance {
    /// Zero all series
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Soil moisture on the final simulated day, used to seed a following year
    #[must_use]
    pub fn final_moisture(&self) -> f64 {
        self.soil_moisture[DAYS_PER_YEAR - 1]
    }
}

/// Result of running the bucket over a year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinUpOutcome {
    /// Passes over the annual cycle (1 when initial moisture was supplied)
    pub passes: u32,
    /// Whether the year-end moisture settled within tolerance
    pub converged: bool,
}

/// Daily soil moisture bucket with optional spin-up
///
/// ```
/// use stash_core::climate::{ClimateInterpolator, DailyDrivers, MonthlyDrivers};
/// use stash_core::core_types::{Coordinates, SiteCharacteristics};
/// use stash_core::physics::{DailyWaterBalance, WaterBalanceEngine};
/// use stash_core::ModelParameters;
///
/// let mut drivers = DailyDrivers::default();
/// drivers.fill_from(&ClimateInterpolator::new(), &MonthlyDrivers::uniform(10.0, 60.0, 0.4));
///
/// let engine = WaterBalanceEngine::new(&ModelParameters::default());
/// let mut out = DailyWaterBalance::default();
/// let outcome = engine.run(
///     Coordinates::new(0.0, 50.0),
///     &SiteCharacteristics::with_spin_up(0.0, 150.0),
///     &drivers,
///     &mut out,
/// );
/// assert!(outcome.converged);
/// assert!(out.soil_moisture.iter().all(|&w| (0.0..=150.0).contains(&w)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBalanceEngine {
    priestley_taylor: f64,
    spin_up_tolerance: f64,
    max_spin_up_years: u32,
}

impl WaterBalanceEngine {
    /// Create an engine from run parameters
    #[must_use]
    pub fn new(params: &ModelParameters) -> Self {
        Self {
            priestley_taylor: params.priestley_taylor,
            spin_up_tolerance: *params.spin_up_tolerance,
            max_spin_up_years: params.max_spin_up_years.max(1),
        }
    }

    /// Compute radiation and evaporative demand for every day
    ///
    /// Demand does not depend on soil moisture, so it is computed once per
    /// cell and reused by every spin-up pass.
    pub fn compute_demand(
        &self,
        coordinates: Coordinates,
        site: &SiteCharacteristics,
        drivers: &DailyDrivers,
        out: &mut DailyWaterBalance,
    ) {
        for day in 0..DAYS_PER_YEAR {
            let radiation = daily_radiation(
                day + 1,
                *coordinates.lat,
                drivers.sunshine[day],
                drivers.temperature[day],
                *site.elevation,
                self.priestley_taylor,
            );
            out.eet[day] = radiation.eet;
            out.pet[day] = radiation.pet;
            out.par[day] = radiation.par;
        }
    }

    /// Run the bucket over one annual cycle starting from `moisture`
    ///
    /// Overwrites the AET, DET, runoff and soil moisture series and returns
    /// the moisture at the end of the year. Demand must already be computed.
    pub fn run_year(
        &self,
        moisture: f64,
        field_capacity: f64,
        drivers: &DailyDrivers,
        out: &mut DailyWaterBalance,
    ) -> f64 {
        let mut moisture = moisture;
        for day in 0..DAYS_PER_YEAR {
            let step = bucket_step(
                moisture,
                drivers.precipitation[day],
                out.pet[day],
                field_capacity,
            );
            out.aet[day] = step.aet;
            out.det[day] = step.deficit;
            out.runoff[day] = step.runoff;
            out.soil_moisture[day] = step.moisture;
            moisture = step.moisture;
        }
        moisture
    }

    /// Simulate the water balance for one cell
    ///
    /// With known initial moisture the year runs once from that value
    /// (clamped into `[0, fc]`). Otherwise the year is repeated from a full
    /// bucket until the year-end moisture changes by less than the spin-up
    /// tolerance or the pass limit is reached; only the final pass is kept.
    pub fn run(
        &self,
        coordinates: Coordinates,
        site: &SiteCharacteristics,
        drivers: &DailyDrivers,
        out: &mut DailyWaterBalance,
    ) -> SpinUpOutcome {
        self.compute_demand(coordinates, site, drivers, out);

        let capacity = site.field_capacity;
        let field_capacity = *capacity;

        if let Some(initial) = site.initial_moisture {
            let start = *capacity.clamp_storage(initial);
            self.run_year(start, field_capacity, drivers, out);
            return SpinUpOutcome {
                passes: 1,
                converged: true,
            };
        }

        let mut moisture = field_capacity.max(0.0);
        for pass in 1..=self.max_spin_up_years {
            let start = moisture;
            moisture = self.run_year(start, field_capacity, drivers, out);
            if (moisture - start).abs() < self.spin_up_tolerance {
                return SpinUpOutcome {
                    passes: pass,
                    converged: true,
                };
            }
        }

        SpinUpOutcome {
            passes: self.max_spin_up_years,
            converged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::{ClimateInterpolator, MonthlyDrivers};
    use approx::assert_abs_diff_eq;

    fn daily(monthly: &MonthlyDrivers) -> DailyDrivers {
        let mut drivers = DailyDrivers::default();
        drivers.fill_from(&ClimateInterpolator::new(), monthly);
        drivers
    }

    #[test]
    fn test_step_demand_limited() {
        let step = bucket_step(50.0, 2.0, 3.0, 100.0);
        assert_eq!(step.aet, 3.0);
        assert_eq!(step.deficit, 0.0);
        assert_eq!(step.runoff, 0.0);
        assert_abs_diff_eq!(step.moisture, 49.0, epsilon = 1e-12);
    }

    #[test]
    fn test_step_supply_limited() {
        let step = bucket_step(1.0, 0.5, 4.0, 100.0);
        assert_eq!(step.aet, 1.5);
        assert_eq!(step.deficit, 2.5);
        assert_eq!(step.moisture, 0.0);
    }

    #[test]
    fn test_step_overflow_becomes_runoff() {
        let step = bucket_step(98.0, 10.0, 1.0, 100.0);
        assert_eq!(step.aet, 1.0);
        assert_abs_diff_eq!(step.runoff, 7.0, epsilon = 1e-12);
        assert_eq!(step.moisture, 100.0);
    }

    #[test]
    fn test_step_without_storage() {
        for capacity in [0.0, -25.0, f64::NAN] {
            let step = bucket_step(0.0, 5.0, 2.0, capacity);
            assert_eq!(step.aet, 2.0);
            assert_eq!(step.runoff, 3.0);
            assert_eq!(step.moisture, 0.0);
            assert!(step.aet.is_finite() && step.runoff.is_finite());

            let dry = bucket_step(0.0, 1.0, 2.0, capacity);
            assert_eq!(dry.aet, 1.0);
            assert_eq!(dry.deficit, 1.0);
            assert_eq!(dry.runoff, 0.0);
        }
    }

    #[test]
    fn test_step_conserves_water() {
        let (w0, p, pet, fc) = (63.0, 12.5, 2.25, 70.0);
        let step = bucket_step(w0, p, pet, fc);
        assert_abs_diff_eq!(w0 + p, step.moisture + step.aet + step.runoff, epsilon = 1e-12);
    }

    #[test]
    fn test_known_initial_moisture_runs_once() {
        let drivers = daily(&MonthlyDrivers::uniform(15.0, 40.0, 0.5));
        let engine = WaterBalanceEngine::new(&ModelParameters::default());
        let mut out = DailyWaterBalance::default();

        let site = SiteCharacteristics::new(0.0, 120.0, 60.0);
        let outcome = engine.run(Coordinates::new(0.0, 45.0), &site, &drivers, &mut out);
        assert_eq!(outcome, SpinUpOutcome { passes: 1, converged: true });

        // Day one starts from the supplied 60 mm
        let first = bucket_step(60.0, drivers.precipitation[0], out.pet[0], 120.0);
        assert_eq!(out.soil_moisture[0], first.moisture);
    }

    #[test]
    fn test_initial_moisture_is_clamped_to_capacity() {
        let drivers = daily(&MonthlyDrivers::uniform(15.0, 40.0, 0.5));
        let engine = WaterBalanceEngine::new(&ModelParameters::default());
        let mut over = DailyWaterBalance::default();
        let mut full = DailyWaterBalance::default();

        let coords = Coordinates::new(0.0, 45.0);
        engine.run(coords, &SiteCharacteristics::new(0.0, 80.0, 500.0), &drivers, &mut over);
        engine.run(coords, &SiteCharacteristics::new(0.0, 80.0, 80.0), &drivers, &mut full);
        assert_eq!(over, full);
    }

    #[test]
    fn test_spin_up_reaches_periodic_cycle() {
        let drivers = daily(&MonthlyDrivers::uniform(12.0, 45.0, 0.4));
        let params = ModelParameters::default();
        let engine = WaterBalanceEngine::new(&params);
        let mut out = DailyWaterBalance::default();
        let coords = Coordinates::new(0.0, 52.0);

        let outcome = engine.run(coords, &SiteCharacteristics::with_spin_up(0.0, 150.0), &drivers, &mut out);
        assert!(outcome.converged);

        // Re-running the year from its own end state reproduces it
        let end = out.final_moisture();
        let mut again = out.clone();
        engine.run_year(end, 150.0, &drivers, &mut again);
        assert_abs_diff_eq!(again.final_moisture(), end, epsilon = *params.spin_up_tolerance);
    }

    #[test]
    fn test_spin_up_non_convergence_is_reported() {
        let drivers = daily(&MonthlyDrivers::uniform(20.0, 10.0, 0.6));
        let params = ModelParameters {
            max_spin_up_years: 1,
            ..Default::default()
        };
        let engine = WaterBalanceEngine::new(&params);
        let mut out = DailyWaterBalance::default();

        // A full 500 mm bucket cannot drain to its dry-season equilibrium in one year
        let outcome = engine.run(
            Coordinates::new(0.0, 30.0),
            &SiteCharacteristics::with_spin_up(0.0, 500.0),
            &drivers,
            &mut out,
        );
        assert_eq!(outcome, SpinUpOutcome { passes: 1, converged: false });
        assert!(out.soil_moisture.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_moisture_bounds_hold_every_day() {
        let monthly = MonthlyDrivers {
            temperature: [-5.0, -3.0, 2.0, 8.0, 14.0, 18.0, 21.0, 20.0, 15.0, 9.0, 3.0, -2.0],
            precipitation: [80.0, 60.0, 50.0, 40.0, 30.0, 5.0, 0.0, 10.0, 40.0, 90.0, 120.0, 100.0],
            sunshine: [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.7, 0.6, 0.4, 0.3, 0.2],
        };
        let drivers = daily(&monthly);
        let engine = WaterBalanceEngine::new(&ModelParameters::default());
        let mut out = DailyWaterBalance::default();

        for capacity in [0.0, 20.0, 100.0, 400.0] {
            engine.run(
                Coordinates::new(10.0, 42.0),
                &SiteCharacteristics::with_spin_up(300.0, capacity),
                &drivers,
                &mut out,
            );
            for day in 0..DAYS_PER_YEAR {
                assert!(out.soil_moisture[day] >= 0.0);
                assert!(out.soil_moisture[day] <= capacity.max(0.0));
                assert!(out.aet[day] <= out.pet[day] + 1e-12);
                assert!(out.det[day] >= 0.0);
                assert!(out.runoff[day] >= 0.0);
            }
        }
    }
}
