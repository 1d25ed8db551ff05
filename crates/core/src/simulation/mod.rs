//! Running the cell pipeline over a grid

pub mod pipeline;
pub mod progress;
pub mod runner;

// Re-export public types
pub use pipeline::{CellPipeline, CellStatus};
pub use progress::{LogProgress, NoProgress, ProgressReporter};
pub use runner::{GridRunner, RunSummary};
