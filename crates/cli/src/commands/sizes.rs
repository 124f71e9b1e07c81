//! Sizes Command

use std::io;

use packwise::{calculator::PackCalculator, solvers::Solver};

/// Print the calculator's default pack sizes, largest first.
pub(crate) fn run<S: Solver>(
    calculator: &PackCalculator<S>,
    mut out: impl io::Write,
) -> io::Result<()> {
    writeln!(out, "{}", calculator.default_sizes())
}
