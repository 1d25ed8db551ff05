//! Validated input matrices of a grid run
//!
//! Column layout, one row per cell:
//! - temperature and precipitation: `[lat, lon, jan..dec]`
//! - sunshine fraction: `[lon, lat, jan..dec]`
//! - characteristics: `[lon, lat, elevation, field capacity, initial soil moisture, ...]`
//!
//! Cell coordinates are read from the sunshine matrix and normalized to
//! `(lon, lat)` everywhere downstream. The swapped order of the other two
//! driver matrices is only handled here, when they are cross-checked.

use super::matrix::Matrix;
use crate::climate::MonthlyDrivers;
use crate::config::ModelParameters;
use crate::core_types::{Coordinates, Meters, Millimeters, SiteCharacteristics, MONTHS_PER_YEAR};
use crate::error::StashError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns of each monthly driver matrix: two coordinates plus twelve months
pub const DRIVER_COLUMNS: usize = 2 + MONTHS_PER_YEAR;

/// Minimum columns of the characteristics matrix
pub const CHARACTERISTICS_COLUMNS: usize = 5;

const ELEVATION_COLUMN: usize = 2;
const FIELD_CAPACITY_COLUMN: usize = 3;
const INITIAL_MOISTURE_COLUMN: usize = 4;

/// The four host matrices before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMatrices {
    /// Monthly mean temperature, `[lat, lon, 12 months]`
    pub temperature: Matrix,
    /// Monthly precipitation totals, `[lat, lon, 12 months]`
    pub precipitation: Matrix,
    /// Monthly sunshine fraction, `[lon, lat, 12 months]`
    pub sunshine: Matrix,
    /// Site characteristics, `[lon, lat, elev, fc, swc0]`
    pub characteristics: Matrix,
}

/// Input matrices that passed shape and coordinate validation
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateInputs {
    matrices: InputMatrices,
    missing_value: f64,
}

impl ClimateInputs {
    /// Validate the four host matrices
    ///
    /// # Errors
    /// Fails before any cell is processed if row counts differ
    /// ([`StashError::RowCountMismatch`]), a matrix has the wrong number of
    /// columns ([`StashError::ColumnCountMismatch`]) or a driver matrix places
    /// a cell elsewhere than the sunshine matrix does
    /// ([`StashError::CoordinateMismatch`]).
    pub fn new(
        temperature: Matrix,
        precipitation: Matrix,
        sunshine: Matrix,
        characteristics: Matrix,
        params: &ModelParameters,
    ) -> Result<Self, StashError> {
        Self::from_matrices(
            InputMatrices {
                temperature,
                precipitation,
                sunshine,
                characteristics,
            },
            params,
        )
    }

    /// Validate an already bundled set of matrices
    ///
    /// # Errors
    /// See [`ClimateInputs::new`].
    pub fn from_matrices(matrices: InputMatrices, params: &ModelParameters) -> Result<Self, StashError> {
        let cells = matrices.sunshine.rows();

        for (name, matrix) in [
            ("temperature", &matrices.temperature),
            ("precipitation", &matrices.precipitation),
            ("characteristics", &matrices.characteristics),
        ] {
            if matrix.rows() != cells {
                return Err(StashError::RowCountMismatch {
                    matrix: name,
                    expected: cells,
                    found: matrix.rows(),
                });
            }
        }

        for (name, matrix) in [
            ("sunshine", &matrices.sunshine),
            ("temperature", &matrices.temperature),
            ("precipitation", &matrices.precipitation),
        ] {
            if matrix.cols() != DRIVER_COLUMNS {
                return Err(StashError::ColumnCountMismatch {
                    matrix: name,
                    expected: DRIVER_COLUMNS,
                    found: matrix.cols(),
                });
            }
        }
        if matrices.characteristics.cols() < CHARACTERISTICS_COLUMNS {
            return Err(StashError::ColumnCountMismatch {
                matrix: "characteristics",
                expected: CHARACTERISTICS_COLUMNS,
                found: matrices.characteristics.cols(),
            });
        }

        for row in 0..cells {
            let lon = matrices.sunshine.get(row, 0);
            let lat = matrices.sunshine.get(row, 1);
            for (name, matrix) in [
                ("temperature", &matrices.temperature),
                ("precipitation", &matrices.precipitation),
            ] {
                let other_lat = matrix.get(row, 0);
                let other_lon = matrix.get(row, 1);
                if !coordinates_agree(lon, other_lon, params)
                    || !coordinates_agree(lat, other_lat, params)
                {
                    return Err(StashError::CoordinateMismatch { matrix: name, row });
                }
            }
        }

        Ok(Self {
            matrices,
            missing_value: params.missing_value,
        })
    }

    /// Load and validate matrices serialized as JSON
    ///
    /// # Errors
    /// Returns [`StashError::Io`] or [`StashError::Parse`] if the file cannot
    /// be read or decoded, then any error of [`ClimateInputs::new`].
    pub fn from_json_file<P: AsRef<Path>>(path: P, params: &ModelParameters) -> Result<Self, StashError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| StashError::Io(e.to_string()))?;
        let matrices: InputMatrices =
            serde_json::from_str(&contents).map_err(|e| StashError::Parse(e.to_string()))?;
        Self::from_matrices(matrices, params)
    }

    /// Number of grid cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.sunshine.rows()
    }

    /// Whether the grid has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying matrices
    #[must_use]
    pub fn matrices(&self) -> &InputMatrices {
        &self.matrices
    }

    /// Position of a cell, as given by the sunshine matrix
    #[must_use]
    pub fn coordinates(&self, cell: usize) -> Coordinates {
        let row = self.matrices.sunshine.row(cell);
        Coordinates::new(row[0], row[1])
    }

    /// Site characteristics of a cell
    ///
    /// A missing initial moisture requests spin-up. A missing elevation is
    /// taken as sea level and a missing field capacity as no storage.
    #[must_use]
    pub fn site(&self, cell: usize) -> SiteCharacteristics {
        let row = self.matrices.characteristics.row(cell);
        let present = |v: f64| (v.is_finite() && v != self.missing_value).then_some(v);

        SiteCharacteristics {
            elevation: present(row[ELEVATION_COLUMN]).map_or(Meters::SEA_LEVEL, Meters::new),
            field_capacity: present(row[FIELD_CAPACITY_COLUMN])
                .map_or(Millimeters::ZERO, Millimeters::new),
            initial_moisture: present(row[INITIAL_MOISTURE_COLUMN]).map(Millimeters::new),
        }
    }

    /// Copy a cell's monthly drivers into `out`
    pub fn load_drivers(&self, cell: usize, out: &mut MonthlyDrivers) {
        out.temperature
            .copy_from_slice(&self.matrices.temperature.row(cell)[2..DRIVER_COLUMNS]);
        out.precipitation
            .copy_from_slice(&self.matrices.precipitation.row(cell)[2..DRIVER_COLUMNS]);
        out.sunshine
            .copy_from_slice(&self.matrices.sunshine.row(cell)[2..DRIVER_COLUMNS]);
    }
}

fn coordinates_agree(a: f64, b: f64, params: &ModelParameters) -> bool {
    if params.is_missing(a) || params.is_missing(b) {
        return true;
    }
    (a - b).abs() <= params.coordinate_tolerance
}
