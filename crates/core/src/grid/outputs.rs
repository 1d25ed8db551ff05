//! Output matrices of a grid run
//!
//! Each monthly output is selected by an [`OutputVariable`] tag that maps to
//! a small extraction function over [`MonthlyTotals`]; the annual matrix is
//! laid out by [`AnnualVariable`]. Adding a variable means adding a tag and
//! its extractor.

use super::cell::GridCell;
use super::matrix::Matrix;
use crate::aggregation::{AnnualTotals, MonthlyTotals};
use crate::core_types::{Coordinates, MONTHS_PER_YEAR};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Monthly output variables, in host export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputVariable {
    /// Actual evapotranspiration
    Aet,
    /// Equilibrium evapotranspiration
    Eet,
    /// Potential evapotranspiration
    Pet,
    /// Evapotranspiration deficit
    Det,
    /// Photosynthetically active radiation
    Par,
    /// Moisture index
    MoistureIndex,
    /// Alpha index
    AlphaIndex,
    /// Runoff
    Runoff,
    /// Growing-degree days above 0 °C
    Gdd0,
    /// Growing-degree days above 5 °C
    Gdd5,
    /// Growing-degree days above 10 °C
    Gdd10,
    /// Chill days
    ChillDays,
}

type MonthlyExtractor = fn(&MonthlyTotals) -> [f64; MONTHS_PER_YEAR];

impl OutputVariable {
    /// Every variable, in export order
    pub const ALL: [OutputVariable; 12] = [
        OutputVariable::Aet,
        OutputVariable::Eet,
        OutputVariable::Pet,
        OutputVariable::Det,
        OutputVariable::Par,
        OutputVariable::MoistureIndex,
        OutputVariable::AlphaIndex,
        OutputVariable::Runoff,
        OutputVariable::Gdd0,
        OutputVariable::Gdd5,
        OutputVariable::Gdd10,
        OutputVariable::ChillDays,
    ];

    /// Name of the output matrix on the host side
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OutputVariable::Aet => "act.evap",
            OutputVariable::Eet => "equ.evap",
            OutputVariable::Pet => "pot.evap",
            OutputVariable::Det => "del.evap",
            OutputVariable::Par => "photo.abs",
            OutputVariable::MoistureIndex => "moist.index",
            OutputVariable::AlphaIndex => "alpha.index",
            OutputVariable::Runoff => "run.off",
            OutputVariable::Gdd0 => "grow.deg0",
            OutputVariable::Gdd5 => "grow.deg5",
            OutputVariable::Gdd10 => "grow.deg10",
            OutputVariable::ChillDays => "chill.day",
        }
    }

    /// Look a variable up by its host name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Position in [`OutputVariable::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    fn extractor(self) -> MonthlyExtractor {
        match self {
            OutputVariable::Aet => |m| m.aet,
            OutputVariable::Eet => |m| m.eet,
            OutputVariable::Pet => |m| m.pet,
            OutputVariable::Det => |m| m.det,
            OutputVariable::Par => |m| m.par,
            OutputVariable::MoistureIndex => |m| m.moisture_index,
            OutputVariable::AlphaIndex => |m| m.alpha_index,
            OutputVariable::Runoff => |m| m.runoff,
            OutputVariable::Gdd0 => |m| m.gdd[0],
            OutputVariable::Gdd5 => |m| m.gdd[1],
            OutputVariable::Gdd10 => |m| m.gdd[2],
            OutputVariable::ChillDays => |m| m.chill.map(f64::from),
        }
    }

    /// The twelve monthly values of this variable
    #[must_use]
    pub fn extract(self, monthly: &MonthlyTotals) -> [f64; MONTHS_PER_YEAR] {
        (self.extractor())(monthly)
    }
}

/// Columns of the annual matrix after `[lon, lat]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnualVariable {
    /// Actual evapotranspiration
    Aet,
    /// Equilibrium evapotranspiration
    Eet,
    /// Potential evapotranspiration
    Pet,
    /// Evapotranspiration deficit
    Det,
    /// Photosynthetically active radiation
    Par,
    /// Moisture index
    MoistureIndex,
    /// Alpha index
    AlphaIndex,
    /// Mean temperature
    Temperature,
    /// Total precipitation
    Precipitation,
    /// Mean sunshine fraction
    Sunshine,
    /// Runoff
    Runoff,
    /// Growing-degree days above 0 °C
    Gdd0,
    /// Growing-degree days above 5 °C
    Gdd5,
    /// Growing-degree days above 10 °C
    Gdd10,
    /// Chill days
    ChillDays,
}

impl AnnualVariable {
    /// Every annual variable, in column order
    pub const ALL: [AnnualVariable; 15] = [
        AnnualVariable::Aet,
        AnnualVariable::Eet,
        AnnualVariable::Pet,
        AnnualVariable::Det,
        AnnualVariable::Par,
        AnnualVariable::MoistureIndex,
        AnnualVariable::AlphaIndex,
        AnnualVariable::Temperature,
        AnnualVariable::Precipitation,
        AnnualVariable::Sunshine,
        AnnualVariable::Runoff,
        AnnualVariable::Gdd0,
        AnnualVariable::Gdd5,
        AnnualVariable::Gdd10,
        AnnualVariable::ChillDays,
    ];

    /// Column header
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnnualVariable::Aet => "AET",
            AnnualVariable::Eet => "EET",
            AnnualVariable::Pet => "PET",
            AnnualVariable::Det => "DET",
            AnnualVariable::Par => "PAR",
            AnnualVariable::MoistureIndex => "MI",
            AnnualVariable::AlphaIndex => "ALPHA",
            AnnualVariable::Temperature => "TEMP",
            AnnualVariable::Precipitation => "PPT",
            AnnualVariable::Sunshine => "FSUN",
            AnnualVariable::Runoff => "RUNOFF",
            AnnualVariable::Gdd0 => "GDD0",
            AnnualVariable::Gdd5 => "GDD5",
            AnnualVariable::Gdd10 => "GDD10",
            AnnualVariable::ChillDays => "CHILL",
        }
    }

    /// Column in the annual matrix
    #[must_use]
    pub fn column(self) -> usize {
        2 + self as usize
    }

    /// Value of this variable
    #[must_use]
    pub fn extract(self, annual: &AnnualTotals) -> f64 {
        match self {
            AnnualVariable::Aet => annual.aet,
            AnnualVariable::Eet => annual.eet,
            AnnualVariable::Pet => annual.pet,
            AnnualVariable::Det => annual.det,
            AnnualVariable::Par => annual.par,
            AnnualVariable::MoistureIndex => annual.moisture_index,
            AnnualVariable::AlphaIndex => annual.alpha_index,
            AnnualVariable::Temperature => annual.temperature,
            AnnualVariable::Precipitation => annual.precipitation,
            AnnualVariable::Sunshine => annual.sunshine,
            AnnualVariable::Runoff => annual.runoff,
            AnnualVariable::Gdd0 => annual.gdd[0],
            AnnualVariable::Gdd5 => annual.gdd[1],
            AnnualVariable::Gdd10 => annual.gdd[2],
            AnnualVariable::ChillDays => f64::from(annual.chill),
        }
    }
}

/// Columns of the annual matrix
pub const ANNUAL_COLUMNS: usize = 2 + AnnualVariable::ALL.len();
/// Columns of each monthly matrix
pub const MONTHLY_COLUMNS: usize = 2 + MONTHS_PER_YEAR;
/// Columns of the carryover matrix: `[lon, lat, soil moisture]`
pub const CARRYOVER_COLUMNS: usize = 3;

/// Host name of the annual matrix
pub const ANNUAL_NAME: &str = "annual";
/// Host name of the carryover matrix
pub const CARRYOVER_NAME: &str = "swc.init";

/// Every output value of one cell, laid out as its matrix rows
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    /// Annual row
    pub annual: [f64; ANNUAL_COLUMNS],
    /// One row per [`OutputVariable`]
    pub monthly: [[f64; MONTHLY_COLUMNS]; OutputVariable::ALL.len()],
    /// Carryover row
    pub carryover: [f64; CARRYOVER_COLUMNS],
}

impl CellRecord {
    /// Rows for a computed cell
    #[must_use]
    pub fn from_cell(cell: &GridCell) -> Self {
        let Coordinates { lon, lat } = cell.coordinates();
        let mut record = Self::with_fill(cell.coordinates(), 0.0);

        for variable in AnnualVariable::ALL {
            record.annual[variable.column()] = variable.extract(cell.annual());
        }
        for variable in OutputVariable::ALL {
            let row = &mut record.monthly[variable.index()];
            row[2..].copy_from_slice(&variable.extract(cell.monthly()));
        }
        record.carryover = [*lon, *lat, cell.carryover_moisture()];
        record
    }

    /// Rows for a missing cell: coordinates kept, every value is the sentinel
    #[must_use]
    pub fn missing(coordinates: Coordinates, missing_value: f64) -> Self {
        Self::with_fill(coordinates, missing_value)
    }

    fn with_fill(coordinates: Coordinates, value: f64) -> Self {
        let (lon, lat) = (*coordinates.lon, *coordinates.lat);
        let mut annual = [value; ANNUAL_COLUMNS];
        annual[0] = lon;
        annual[1] = lat;
        let mut month_row = [value; MONTHLY_COLUMNS];
        month_row[0] = lon;
        month_row[1] = lat;
        Self {
            annual,
            monthly: [month_row; OutputVariable::ALL.len()],
            carryover: [lon, lat, value],
        }
    }
}

/// All output matrices of a run
#[derive(Debug, Clone, PartialEq)]
pub struct StashOutputs {
    annual: Matrix,
    monthly: Vec<Matrix>,
    carryover: Matrix,
}

impl StashOutputs {
    /// Allocate outputs for `cells` cells
    #[must_use]
    pub fn new(cells: usize) -> Self {
        Self {
            annual: Matrix::new(cells, ANNUAL_COLUMNS),
            monthly: OutputVariable::ALL
                .iter()
                .map(|_| Matrix::new(cells, MONTHLY_COLUMNS))
                .collect(),
            carryover: Matrix::new(cells, CARRYOVER_COLUMNS),
        }
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.annual.rows()
    }

    /// Whether there are no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Annual matrix `[lon, lat, 15 annual values]`
    #[must_use]
    pub fn annual(&self) -> &Matrix {
        &self.annual
    }

    /// Monthly matrix `[lon, lat, jan..dec]` of one variable
    #[must_use]
    pub fn monthly(&self, variable: OutputVariable) -> &Matrix {
        &self.monthly[variable.index()]
    }

    /// Carryover matrix `[lon, lat, soil moisture on the last day]`
    #[must_use]
    pub fn carryover(&self) -> &Matrix {
        &self.carryover
    }

    /// Annual value of one cell
    #[must_use]
    pub fn annual_value(&self, cell: usize, variable: AnnualVariable) -> f64 {
        self.annual.get(cell, variable.column())
    }

    /// Copy one cell's rows into place
    pub fn write_record(&mut self, cell: usize, record: &CellRecord) {
        self.annual.row_mut(cell).copy_from_slice(&record.annual);
        for (matrix, row) in self.monthly.iter_mut().zip(record.monthly.iter()) {
            matrix.row_mut(cell).copy_from_slice(row);
        }
        self.carryover.row_mut(cell).copy_from_slice(&record.carryover);
    }

    /// Mark a cell's row as missing
    pub fn write_missing(&mut self, cell: usize, coordinates: Coordinates, missing_value: f64) {
        self.write_record(cell, &CellRecord::missing(coordinates, missing_value));
    }

    /// Every matrix with its host name, in export order
    #[must_use]
    pub fn named(&self) -> Vec<(&'static str, &Matrix)> {
        let mut named = Vec::with_capacity(OutputVariable::ALL.len() + 2);
        named.push((ANNUAL_NAME, &self.annual));
        for variable in OutputVariable::ALL {
            named.push((variable.name(), self.monthly(variable)));
        }
        named.push((CARRYOVER_NAME, &self.carryover));
        named
    }
}

impl Serialize for StashOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let named = self.named();
        let mut map = serializer.serialize_map(Some(named.len()))?;
        for (name, matrix) in named {
            map.serialize_entry(name, matrix)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_names_are_unique() {
        let names: std::collections::HashSet<_> =
            OutputVariable::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), OutputVariable::ALL.len());
        assert_eq!(OutputVariable::from_name("run.off"), Some(OutputVariable::Runoff));
        assert_eq!(OutputVariable::from_name("nope"), None);
        for (i, v) in OutputVariable::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
        }
    }

    #[test]
    fn test_extractors_pick_their_field() {
        let mut monthly = MonthlyTotals::default();
        monthly.runoff[3] = 4.0;
        monthly.gdd[2][6] = 12.0;
        monthly.chill[0] = 31;
        assert_eq!(OutputVariable::Runoff.extract(&monthly)[3], 4.0);
        assert_eq!(OutputVariable::Gdd10.extract(&monthly)[6], 12.0);
        assert_eq!(OutputVariable::Gdd5.extract(&monthly)[6], 0.0);
        assert_eq!(OutputVariable::ChillDays.extract(&monthly)[0], 31.0);
    }

    #[test]
    fn test_annual_layout() {
        assert_eq!(ANNUAL_COLUMNS, 17);
        assert_eq!(AnnualVariable::Aet.column(), 2);
        assert_eq!(AnnualVariable::ChillDays.column(), 16);
        let annual = AnnualTotals {
            precipitation: 640.0,
            chill: 90,
            ..Default::default()
        };
        assert_eq!(AnnualVariable::Precipitation.extract(&annual), 640.0);
        assert_eq!(AnnualVariable::ChillDays.extract(&annual), 90.0);
    }

    #[test]
    fn test_missing_record_keeps_coordinates() {
        let mut outputs = StashOutputs::new(2);
        outputs.write_missing(1, Coordinates::new(12.5, -8.0), -9999.0);

        assert_eq!(outputs.annual().get(1, 0), 12.5);
        assert_eq!(outputs.annual().get(1, 1), -8.0);
        assert!(outputs.annual().row(1)[2..].iter().all(|&v| v == -9999.0));
        for variable in OutputVariable::ALL {
            let row = outputs.monthly(variable).row(1);
            assert_eq!(&row[..2], &[12.5, -8.0]);
            assert!(row[2..].iter().all(|&v| v == -9999.0));
        }
        assert_eq!(outputs.carryover().row(1), &[12.5, -8.0, -9999.0]);
        // Untouched row
        assert!(outputs.annual().row(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_named_matrices_in_host_order() {
        let outputs = StashOutputs::new(1);
        let names: Vec<&str> = outputs.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "annual",
                "act.evap",
                "equ.evap",
                "pot.evap",
                "del.evap",
                "photo.abs",
                "moist.index",
                "alpha.index",
                "run.off",
                "grow.deg0",
                "grow.deg5",
                "grow.deg10",
                "chill.day",
                "swc.init",
            ]
        );
        let json = serde_json::to_value(&outputs).unwrap();
        assert_eq!(json["swc.init"]["cols"], 3);
    }
}
