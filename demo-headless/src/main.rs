use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use stash_core::climate::ClimatePreset;
use stash_core::core_types::MONTH_NAMES;
use stash_core::grid::{InputMatrices, CHARACTERISTICS_COLUMNS, DRIVER_COLUMNS};
use stash_core::{
    AnnualVariable, ClimateInputs, GridRunner, LogProgress, Matrix, ModelParameters,
    OutputVariable, RunSummary, StashError, StashOutputs,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Bioclimatic water balance over a climate grid
#[derive(Parser, Debug)]
#[command(name = "stash-headless")]
#[command(about = "Run the STASH bioclimatic model over a gridded climate", long_about = None)]
struct Args {
    /// Rows of the synthetic grid (one climate preset band per group of rows)
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Columns of the synthetic grid
    #[arg(long, default_value_t = 20)]
    cols: usize,

    /// Seed for the synthetic climate jitter
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Only use these presets (boreal, temperate, mediterranean, tropical, arid)
    #[arg(short, long, value_delimiter = ',')]
    presets: Vec<String>,

    /// Fraction of synthetic cells given a missing driver value (0-1)
    #[arg(long, default_value_t = 0.0)]
    missing_fraction: f64,

    /// Load input matrices from JSON instead of building a synthetic grid
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Load model parameters from JSON
    #[arg(long)]
    params: Option<PathBuf>,

    /// Override the chill-day threshold (°C)
    #[arg(long)]
    chill_threshold: Option<f64>,

    /// Override the spin-up pass limit
    #[arg(long)]
    max_spin_up_years: Option<u32>,

    /// Process cells on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write all output matrices and the run summary as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the input matrices as JSON (reusable with --input)
    #[arg(long)]
    write_inputs: Option<PathBuf>,

    /// Print the monthly table of one cell
    #[arg(short, long)]
    cell: Option<usize>,

    /// Number of cells shown in the annual table
    #[arg(long, default_value_t = 5)]
    show: usize,
}

#[derive(Serialize)]
struct RunReport<'a> {
    summary: RunSummary,
    parameters: &'a ModelParameters,
    outputs: &'a StashOutputs,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), StashError> {
    println!("=== STASH Bioclimatic Model ===\n");

    let params = load_parameters(args)?;

    let inputs = if let Some(path) = &args.input {
        println!("Loading inputs from {}", path.display());
        ClimateInputs::from_json_file(path, &params)?
    } else {
        let presets = select_presets(&args.presets)?;
        println!(
            "Building {}x{} synthetic grid from {} preset(s), seed {}",
            args.rows,
            args.cols,
            presets.len(),
            args.seed
        );
        let matrices = synthetic_grid(args, &presets, params.missing_value)?;
        ClimateInputs::from_matrices(matrices, &params)?
    };

    if let Some(path) = &args.write_inputs {
        write_json(path, inputs.matrices())?;
        println!("Inputs written to {}", path.display());
    }

    let runner = GridRunner::new(&params)?.with_parallel(!args.sequential);
    let mut progress = LogProgress::new(10);
    let (outputs, summary) = runner.run_with_progress(&inputs, &mut progress);

    print_summary(&summary, progress.elapsed_ms());
    print_annual_table(&outputs, args.show);

    if let Some(cell) = args.cell {
        if cell >= outputs.len() {
            return Err(StashError::InvalidParameter {
                name: "cell",
                reason: format!("grid has {} cells", outputs.len()),
            });
        }
        print_cell(&outputs, cell);
    }

    if let Some(path) = &args.output {
        write_json(
            path,
            &RunReport {
                summary,
                parameters: &params,
                outputs: &outputs,
            },
        )?;
        println!("\nOutputs written to {}", path.display());
    }

    Ok(())
}

fn load_parameters(args: &Args) -> Result<ModelParameters, StashError> {
    let mut params = match &args.params {
        Some(path) => ModelParameters::from_json_file(path)?,
        None => ModelParameters::default(),
    };
    if let Some(threshold) = args.chill_threshold {
        params.chill_threshold = threshold.into();
    }
    if let Some(years) = args.max_spin_up_years {
        params.max_spin_up_years = years;
    }
    params.validate()?;
    info!(?params, "Model parameters");
    Ok(params)
}

fn select_presets(names: &[String]) -> Result<Vec<ClimatePreset>, StashError> {
    if names.is_empty() {
        return Ok(ClimatePreset::all());
    }
    names
        .iter()
        .map(|name| {
            ClimatePreset::by_name(name).ok_or_else(|| StashError::InvalidParameter {
                name: "presets",
                reason: format!("unknown preset '{name}'"),
            })
        })
        .collect()
}

/// Build driver matrices from presets with seeded jitter
///
/// Rows are split into latitude bands, one preset per band. Within a band
/// each cell shifts temperature, scales precipitation and field capacity,
/// and nudges sunshine, so neighbouring cells differ.
fn synthetic_grid(
    args: &Args,
    presets: &[ClimatePreset],
    missing_value: f64,
) -> Result<InputMatrices, StashError> {
    let cells = args.rows * args.cols;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let missing_probability = if args.missing_fraction.is_finite() {
        args.missing_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut temperature = Vec::with_capacity(cells * DRIVER_COLUMNS);
    let mut precipitation = Vec::with_capacity(cells * DRIVER_COLUMNS);
    let mut sunshine = Vec::with_capacity(cells * DRIVER_COLUMNS);
    let mut characteristics = Vec::with_capacity(cells * CHARACTERISTICS_COLUMNS);

    for row in 0..args.rows {
        let preset = &presets[row * presets.len() / args.rows.max(1)];
        let drivers = preset.drivers();
        let lat = (preset.latitude + (row % 4) as f64 * 0.5).clamp(-90.0, 90.0);

        for col in 0..args.cols {
            let lon = -10.0 + col as f64 * 0.5;
            let warming = rng.random_range(-1.5..1.5);
            let wetness = rng.random_range(0.8..1.2);
            let brightness = rng.random_range(-0.05..0.05);
            let soil = rng.random_range(0.7..1.3);
            let missing = rng.random_bool(missing_probability);

            temperature.extend([lat, lon]);
            temperature.extend(drivers.temperature.map(|t| t + warming));
            precipitation.extend([lat, lon]);
            precipitation.extend(drivers.precipitation.map(|p| p * wetness));
            sunshine.extend([lon, lat]);
            sunshine.extend(drivers.sunshine.map(|s| (s + brightness).clamp(0.0, 1.0)));
            if missing {
                let feb = temperature.len() - 11;
                temperature[feb] = missing_value;
            }

            characteristics.extend([
                lon,
                lat,
                preset.elevation,
                preset.field_capacity * soil,
                missing_value,
            ]);
        }
    }

    Ok(InputMatrices {
        temperature: Matrix::from_vec(cells, DRIVER_COLUMNS, temperature)?,
        precipitation: Matrix::from_vec(cells, DRIVER_COLUMNS, precipitation)?,
        sunshine: Matrix::from_vec(cells, DRIVER_COLUMNS, sunshine)?,
        characteristics: Matrix::from_vec(cells, CHARACTERISTICS_COLUMNS, characteristics)?,
    })
}

fn print_summary(summary: &RunSummary, elapsed_ms: f64) {
    println!("\n=== Run Summary ===");
    println!("Cells:           {}", summary.cells);
    println!("Computed:        {}", summary.computed());
    println!("Missing:         {}", summary.missing);
    println!("Spun up:         {}", summary.spin_up_cells);
    println!("Not converged:   {}", summary.non_converged);
    println!("Max passes:      {}", summary.max_passes);
    println!("Elapsed:         {:.1} ms", elapsed_ms);
}

fn print_annual_table(outputs: &StashOutputs, show: usize) {
    let shown = show.min(outputs.len());
    if shown == 0 {
        return;
    }

    println!("\n=== Annual Values (first {shown} cells) ===");
    print!("{:>8} {:>8}", "LON", "LAT");
    for variable in AnnualVariable::ALL {
        print!(" {:>8}", variable.label());
    }
    println!();

    for cell in 0..shown {
        let row = outputs.annual().row(cell);
        print!("{:>8.2} {:>8.2}", row[0], row[1]);
        for variable in AnnualVariable::ALL {
            print!(" {:>8.2}", outputs.annual_value(cell, variable));
        }
        println!();
    }
}

fn print_cell(outputs: &StashOutputs, cell: usize) {
    let annual = outputs.annual().row(cell);
    println!(
        "\n=== Cell {cell} (lon {:.2}, lat {:.2}) ===",
        annual[0], annual[1]
    );
    print!("{:>12}", "");
    for name in MONTH_NAMES {
        print!(" {:>7}", name);
    }
    println!();

    for variable in OutputVariable::ALL {
        let row = outputs.monthly(variable).row(cell);
        print!("{:>12}", variable.name());
        for value in &row[2..] {
            print!(" {:>7.2}", value);
        }
        println!();
    }
    println!(
        "{:>12} {:>7.2}",
        "swc.init",
        outputs.carryover().get(cell, 2)
    );
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StashError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StashError::Parse(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| StashError::Io(e.to_string()))
}
