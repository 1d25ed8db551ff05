//! Per-cell working state
//!
//! A [`GridCell`] holds one cell's inputs and every derived daily, monthly and
//! annual series in fixed-size arrays. It is created once per worker, then
//! reset and repopulated for each cell that worker processes, so no state
//! survives from one cell to the next.

use crate::aggregation::{AnnualTotals, MonthlyTotals};
use crate::climate::{DailyDrivers, MonthlyDrivers};
use crate::core_types::{Coordinates, SiteCharacteristics};
use crate::physics::{DailyThermal, DailyWaterBalance, SpinUpOutcome};

/// Storage for one grid cell
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    /// 0-based row in the input matrices
    pub(crate) index: usize,
    pub(crate) coordinates: Coordinates,
    pub(crate) site: SiteCharacteristics,
    pub(crate) monthly_drivers: MonthlyDrivers,
    pub(crate) daily_drivers: DailyDrivers,
    pub(crate) water: DailyWaterBalance,
    pub(crate) thermal: DailyThermal,
    pub(crate) monthly: MonthlyTotals,
    pub(crate) annual: AnnualTotals,
    /// Outcome of the water balance, `None` until it has run
    pub(crate) spin_up: Option<SpinUpOutcome>,
    /// Drivers contained a missing value; nothing was computed
    pub(crate) missing: bool,
}

impl GridCell {
    /// Create an empty cell
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every series and clear the flags
    pub fn reset(&mut self) {
        self.index = 0;
        self.coordinates = Coordinates::default();
        self.site = SiteCharacteristics::default();
        self.monthly_drivers.reset();
        self.daily_drivers.reset();
        self.water.reset();
        self.thermal.reset();
        self.monthly.reset();
        self.annual = AnnualTotals::default();
        self.spin_up = None;
        self.missing = false;
    }

    /// Reset the cell and load one cell's inputs
    pub fn populate(
        &mut self,
        index: usize,
        coordinates: Coordinates,
        site: SiteCharacteristics,
        drivers: &MonthlyDrivers,
    ) {
        self.reset();
        self.index = index;
        self.coordinates = coordinates;
        self.site = site;
        self.monthly_drivers.clone_from(drivers);
    }

    /// Flag the cell as missing
    pub fn set_missing(&mut self) {
        self.missing = true;
    }

    /// 0-based cell index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell position
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Site characteristics
    #[must_use]
    pub fn site(&self) -> &SiteCharacteristics {
        &self.site
    }

    /// Whether the water balance has to be spun up
    #[must_use]
    pub fn spin_up_required(&self) -> bool {
        self.site.spin_up_required()
    }

    /// Whether the cell was skipped because of missing drivers
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Monthly driver inputs
    #[must_use]
    pub fn monthly_drivers(&self) -> &MonthlyDrivers {
        &self.monthly_drivers
    }

    /// Interpolated daily drivers
    #[must_use]
    pub fn daily_drivers(&self) -> &DailyDrivers {
        &self.daily_drivers
    }

    /// Daily water balance
    #[must_use]
    pub fn water(&self) -> &DailyWaterBalance {
        &self.water
    }

    /// Daily thermal indices
    #[must_use]
    pub fn thermal(&self) -> &DailyThermal {
        &self.thermal
    }

    /// Monthly totals
    #[must_use]
    pub fn monthly(&self) -> &MonthlyTotals {
        &self.monthly
    }

    /// Annual totals
    #[must_use]
    pub fn annual(&self) -> &AnnualTotals {
        &self.annual
    }

    /// Water balance outcome, if it ran
    #[must_use]
    pub fn spin_up(&self) -> Option<SpinUpOutcome> {
        self.spin_up
    }

    /// Soil moisture at the end of the final day
    #[must_use]
    pub fn carryover_moisture(&self) -> f64 {
        self.water.final_moisture()
    }
}
