//! Calculate Command

use std::{io, time::Instant};

use clap::{Args, ValueEnum};
use humanize_duration::{Truncate, prelude::DurationExt};
use packwise::{calculator::PackCalculator, report::ShipmentReport, solvers::Solver};
use tracing::info;

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Table with a summary, for people.
    #[default]
    Table,

    /// One JSON document per line, for scripts.
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct CalculateArgs {
    /// Quantities to ship
    #[arg(required = true, allow_negative_numbers = true)]
    pub(crate) quantities: Vec<i64>,

    /// Comma-separated pack sizes to use instead of the defaults
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub(crate) sizes: Option<Vec<i64>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

/// Solve every requested quantity and write one report per quantity.
///
/// # Errors
///
/// Returns an error if a quantity cannot be solved or writing fails.
pub(crate) fn run<S: Solver>(
    args: &CalculateArgs,
    calculator: &PackCalculator<S>,
    mut out: impl io::Write,
) -> anyhow::Result<()> {
    for &quantity in &args.quantities {
        let start = Instant::now();

        let result = match args.sizes.as_deref() {
            Some(sizes) => calculator.calculate_with_sizes(quantity, sizes)?,
            None => calculator.calculate(quantity)?,
        };

        let elapsed = start.elapsed();
        let report = ShipmentReport::from_result(&result);

        match args.format {
            OutputFormat::Table => {
                report.write_to(&mut out)?;
                writeln!(out, " Took: {}\n", elapsed.human(Truncate::Nano))?;
            }
            OutputFormat::Json => report.write_json(&mut out)?,
        }
    }

    let metrics = calculator.cache_metrics();

    info!(
        hits = metrics.hits,
        misses = metrics.misses,
        evictions = metrics.evictions,
        cached = metrics.len,
        "cache summary"
    );

    Ok(())
}
