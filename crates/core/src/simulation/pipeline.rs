//! The per-cell pipeline
//!
//! Order of operations for one populated [`GridCell`]:
//! 1. Missing check on all 36 monthly driver values (short-circuits)
//! 2. Monthly to daily interpolation of the three drivers
//! 3. Radiation, evaporative demand and the soil-moisture bucket (with spin-up)
//! 4. Daily growing-degree days and chill days
//! 5. Monthly sums and indices
//! 6. Annual aggregates

use crate::aggregation::{AnnualAggregator, MonthlyAggregator};
use crate::climate::ClimateInterpolator;
use crate::config::ModelParameters;
use crate::grid::GridCell;
use crate::physics::{SpinUpOutcome, ThermalSumAccumulator, WaterBalanceEngine};

/// How a cell left the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    /// A driver value was missing; nothing was computed
    Missing,
    /// Fully computed
    Computed(SpinUpOutcome),
}

/// Stateless processing stages shared by every cell of a run
#[derive(Debug, Clone)]
pub struct CellPipeline {
    params: ModelParameters,
    interpolator: ClimateInterpolator,
    water: WaterBalanceEngine,
    thermal: ThermalSumAccumulator,
    monthly: MonthlyAggregator,
    annual: AnnualAggregator,
}

impl CellPipeline {
    /// Build the stages for a run
    #[must_use]
    pub fn new(params: &ModelParameters) -> Self {
        Self {
            params: params.clone(),
            interpolator: ClimateInterpolator::new(),
            water: WaterBalanceEngine::new(params),
            thermal: ThermalSumAccumulator::new(params),
            monthly: MonthlyAggregator::new(params.priestley_taylor),
            annual: AnnualAggregator::new(params.priestley_taylor),
        }
    }

    /// Parameters of the run
    #[must_use]
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Run every stage on a populated cell
    pub fn process(&self, cell: &mut GridCell) -> CellStatus {
        // A no-data latitude counts as a missing cell
        if cell.monthly_drivers.has_missing(&self.params)
            || self.params.is_missing(*cell.coordinates.lat)
        {
            cell.set_missing();
            return CellStatus::Missing;
        }

        cell.daily_drivers
            .fill_from(&self.interpolator, &cell.monthly_drivers);

        let outcome = self.water.run(
            cell.coordinates,
            &cell.site,
            &cell.daily_drivers,
            &mut cell.water,
        );
        cell.spin_up = Some(outcome);

        self.thermal
            .accumulate(&cell.daily_drivers.temperature, &mut cell.thermal);
        self.monthly
            .aggregate(&cell.water, &cell.thermal, &mut cell.monthly);
        cell.annual = self.annual.aggregate(&cell.monthly, &cell.monthly_drivers);

        CellStatus::Computed(outcome)
    }
}
