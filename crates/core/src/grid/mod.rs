//! Grid data: host matrices, per-cell working state and exported outputs

pub mod cell;
pub mod inputs;
pub mod matrix;
pub mod outputs;

// Re-export main types
pub use cell::GridCell;
pub use inputs::{ClimateInputs, InputMatrices, CHARACTERISTICS_COLUMNS, DRIVER_COLUMNS};
pub use matrix::Matrix;
pub use outputs::{
    AnnualVariable, CellRecord, OutputVariable, StashOutputs, ANNUAL_COLUMNS, CARRYOVER_COLUMNS,
    MONTHLY_COLUMNS,
};
