//! STASH Core Library
//!
//! Per-cell bioclimatic simulation over a grid of monthly climate data.
//! Each cell's twelve monthly temperature, precipitation and sunshine values
//! are interpolated to daily series and driven through:
//! - Radiation and Priestley-Taylor evaporative demand (EET, PET, PAR)
//! - A single-layer soil moisture bucket with spin-up (AET, DET, runoff)
//! - Growing-degree days above 0, 5 and 10 °C and chill days
//! - Monthly sums and indices, then annual aggregates
//!
//! Cells never interact, so a grid run spreads them over a rayon pool with
//! one reusable [`GridCell`] per worker.
//!
//! ## Example
//!
//! ```
//! use stash_core::climate::ClimatePreset;
//! use stash_core::core_types::{Coordinates, SiteCharacteristics};
//! use stash_core::{CellPipeline, CellStatus, GridCell, ModelParameters};
//!
//! let preset = ClimatePreset::temperate();
//! let pipeline = CellPipeline::new(&ModelParameters::default());
//! let mut cell = GridCell::new();
//! cell.populate(
//!     0,
//!     Coordinates::new(0.0, preset.latitude),
//!     SiteCharacteristics::with_spin_up(preset.elevation, preset.field_capacity),
//!     &preset.drivers(),
//! );
//!
//! assert!(matches!(pipeline.process(&mut cell), CellStatus::Computed(_)));
//! let annual = cell.annual();
//! assert!(annual.aet > 0.0 && annual.aet <= annual.pet);
//! ```

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Numerical model
pub mod aggregation;
pub mod climate;
pub mod physics;

// Grid data and runner
pub mod grid;
pub mod simulation;

// Re-export main types
pub use config::{ModelParameters, MISSING_VALUE};
pub use error::StashError;
pub use grid::{AnnualVariable, ClimateInputs, GridCell, Matrix, OutputVariable, StashOutputs};
pub use simulation::{
    CellPipeline, CellStatus, GridRunner, LogProgress, NoProgress, ProgressReporter, RunSummary,
};
