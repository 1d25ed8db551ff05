//! Grid runner: feeds every cell through the pipeline and exports the rows
//!
//! Cells are independent. In parallel mode each rayon worker owns one
//! [`GridCell`] (via `map_init`) that it resets for every cell it takes, and
//! results are collected in input order, so parallel and sequential runs
//! produce identical outputs.

use super::pipeline::{CellPipeline, CellStatus};
use super::progress::{NoProgress, ProgressReporter};
use crate::climate::MonthlyDrivers;
use crate::config::ModelParameters;
use crate::error::StashError;
use crate::grid::{CellRecord, ClimateInputs, GridCell, StashOutputs};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cells processed between progress notifications
const DEFAULT_BATCH_SIZE: usize = 1024;

/// Counters describing a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    /// Cells in the grid
    pub cells: usize,
    /// Cells skipped because of missing drivers or a no-data latitude
    pub missing: usize,
    /// Computed cells whose soil moisture had to be spun up
    pub spin_up_cells: usize,
    /// Spin-up cells that hit the pass limit without settling
    pub non_converged: usize,
    /// Largest number of spin-up passes any cell needed
    pub max_passes: u32,
}

impl RunSummary {
    /// Cells that went through the full pipeline
    #[must_use]
    pub fn computed(&self) -> usize {
        self.cells - self.missing
    }

    fn record(&mut self, status: CellStatus, spin_up_required: bool) {
        self.cells += 1;
        match status {
            CellStatus::Missing => self.missing += 1,
            CellStatus::Computed(outcome) if spin_up_required => {
                self.spin_up_cells += 1;
                self.max_passes = self.max_passes.max(outcome.passes);
                if !outcome.converged {
                    self.non_converged += 1;
                }
            }
            CellStatus::Computed(_) => {}
        }
    }
}

/// Result of one cell, ready to be written into the outputs
struct CellResult {
    record: CellRecord,
    status: CellStatus,
    spin_up_required: bool,
}

/// Runs the pipeline over every cell of a grid
///
/// ```
/// use stash_core::grid::{ClimateInputs, Matrix, OutputVariable};
/// use stash_core::{GridRunner, ModelParameters};
///
/// let params = ModelParameters::default();
/// let driver = |lat_first: bool, value: f64| {
///     let mut row = if lat_first { vec![45.0, 7.0] } else { vec![7.0, 45.0] };
///     row.extend([value; 12]);
///     Matrix::from_rows(&[row]).unwrap()
/// };
/// let inputs = ClimateInputs::new(
///     driver(true, 11.0),
///     driver(true, 70.0),
///     driver(false, 0.45),
///     Matrix::from_rows(&[[7.0, 45.0, 300.0, 150.0, -9999.0]]).unwrap(),
///     &params,
/// )
/// .unwrap();
///
/// let (outputs, summary) = GridRunner::new(&params).unwrap().run(&inputs);
/// assert_eq!(summary.cells, 1);
/// assert_eq!(summary.spin_up_cells, 1);
/// assert!(outputs.monthly(OutputVariable::Pet).get(0, 8) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct GridRunner {
    pipeline: CellPipeline,
    parallel: bool,
    batch_size: usize,
}

impl GridRunner {
    /// Create a parallel runner
    ///
    /// # Errors
    /// Returns [`StashError::InvalidParameter`] if `params` fails validation.
    pub fn new(params: &ModelParameters) -> Result<Self, StashError> {
        params.validate()?;
        Ok(Self {
            pipeline: CellPipeline::new(params),
            parallel: true,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Choose between the rayon pool and a single thread
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Cells processed between progress notifications (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Whether cells are spread over the rayon pool
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Parameters of the run
    #[must_use]
    pub fn params(&self) -> &ModelParameters {
        self.pipeline.params()
    }

    /// Process every cell without progress reporting
    #[must_use]
    pub fn run(&self, inputs: &ClimateInputs) -> (StashOutputs, RunSummary) {
        self.run_with_progress(inputs, &mut NoProgress)
    }

    /// Process every cell, notifying `progress` after each batch
    pub fn run_with_progress(
        &self,
        inputs: &ClimateInputs,
        progress: &mut dyn ProgressReporter,
    ) -> (StashOutputs, RunSummary) {
        let total = inputs.len();
        let started = Instant::now();
        info!(cells = total, parallel = self.parallel, "Starting STASH grid run");

        let mut outputs = StashOutputs::new(total);
        let mut summary = RunSummary::default();
        let mut sequential_cell = GridCell::new();

        progress.start(total);
        for start in (0..total).step_by(self.batch_size) {
            let end = (start + self.batch_size).min(total);

            let results: Vec<CellResult> = if self.parallel {
                (start..end)
                    .into_par_iter()
                    .map_init(
                        || Box::new(GridCell::new()),
                        |cell, index| self.process_row(inputs, cell, index),
                    )
                    .collect()
            } else {
                (start..end)
                    .map(|index| self.process_row(inputs, &mut sequential_cell, index))
                    .collect()
            };

            for (index, result) in (start..end).zip(results.iter()) {
                outputs.write_record(index, &result.record);
                summary.record(result.status, result.spin_up_required);
            }
            progress.advance(end, total);
        }
        progress.finish();

        if summary.non_converged > 0 {
            warn!(
                non_converged = summary.non_converged,
                spin_up_cells = summary.spin_up_cells,
                max_passes = summary.max_passes,
                "Soil moisture spin-up did not converge for some cells"
            );
        }
        info!(
            cells = summary.cells,
            missing = summary.missing,
            spin_up_cells = summary.spin_up_cells,
            max_passes = summary.max_passes,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "STASH grid run complete"
        );

        (outputs, summary)
    }

    fn process_row(&self, inputs: &ClimateInputs, cell: &mut GridCell, index: usize) -> CellResult {
        let coordinates = inputs.coordinates(index);
        let mut drivers = MonthlyDrivers::default();
        inputs.load_drivers(index, &mut drivers);
        cell.populate(index, coordinates, inputs.site(index), &drivers);

        let status = self.pipeline.process(cell);
        let record = match status {
            CellStatus::Missing => {
                CellRecord::missing(coordinates, self.pipeline.params().missing_value)
            }
            CellStatus::Computed(outcome) => {
                if !outcome.converged {
                    debug!(
                        cell = index,
                        lon = *coordinates.lon,
                        lat = *coordinates.lat,
                        passes = outcome.passes,
                        "Spin-up hit the pass limit"
                    );
                }
                CellRecord::from_cell(cell)
            }
        };

        CellResult {
            record,
            status,
            spin_up_required: cell.spin_up_required(),
        }
    }
}
