//! Dynamic Programming Solver

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    packs::PackSizes,
    solvers::{PackAllocation, PackAllocations, SolveResult, Solver, SolverError},
};

mod table;

use table::PackTable;

/// Default bound on the search ceiling, in units.
pub const DEFAULT_MAX_CEILING: u64 = 10_000_000;

/// Resource bounds applied before any table is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverLimits {
    /// Largest search ceiling (`quantity + largest pack - 1`) the solver will
    /// build a table for.
    ///
    /// A single pack size above this bound rejects every quantity, however
    /// small.
    pub max_ceiling: u64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_ceiling: DEFAULT_MAX_CEILING,
        }
    }
}

impl SolverLimits {
    /// Create limits with the given ceiling bound.
    #[must_use]
    pub const fn with_max_ceiling(max_ceiling: u64) -> Self {
        Self { max_ceiling }
    }
}

/// Solver using a minimum-pack-count table over every total up to the
/// search ceiling.
///
/// The smallest reachable total at or above the requested quantity wins,
/// and the table already holds the fewest packs for that total.
#[derive(Debug, Clone, Copy, Default)]
pub struct DPSolver {
    limits: SolverLimits,
}

impl DPSolver {
    /// Create a solver with the given limits.
    pub const fn new(limits: SolverLimits) -> Self {
        Self { limits }
    }

    /// The limits this solver enforces.
    pub const fn limits(&self) -> SolverLimits {
        self.limits
    }

    /// Search ceiling for a positive quantity, checked against the limits.
    fn ceiling(self, quantity: i64, largest: u64) -> Result<usize, SolverError> {
        let too_large = |ceiling: u64| SolverError::QuantityTooLarge {
            quantity,
            ceiling,
            limit: self.limits.max_ceiling,
        };

        let ceiling = u64::try_from(quantity)
            .ok()
            .and_then(|quantity| quantity.checked_add(largest))
            .and_then(|sum| sum.checked_sub(1))
            .ok_or_else(|| too_large(u64::MAX))?;

        if ceiling > self.limits.max_ceiling {
            return Err(too_large(ceiling));
        }

        usize::try_from(ceiling).map_err(|_overflow| too_large(ceiling))
    }
}

impl Solver for DPSolver {
    fn solve(&self, quantity: i64, sizes: &PackSizes) -> Result<SolveResult, SolverError> {
        if quantity <= 0 {
            return Ok(SolveResult::empty(quantity));
        }

        if sizes.is_empty() {
            return Err(SolverError::InvalidConfiguration);
        }

        let ceiling = self.ceiling(quantity, sizes.largest())?;

        // Every size is at most the ceiling, so these conversions cannot fail
        // once the ceiling itself fits.
        let table_sizes = sizes
            .iter()
            .map(usize::try_from)
            .collect::<Result<SmallVec<[usize; 8]>, _>>()
            .map_err(|_overflow| SolverError::InvariantViolation {
                message: "pack size does not fit the table",
            })?;

        let table = PackTable::build(&table_sizes, ceiling)?;

        let from = usize::try_from(quantity).map_err(|_overflow| SolverError::InvariantViolation {
            message: "quantity does not fit the table",
        })?;

        // Rounding up to a whole number of the largest pack always lands
        // inside the ceiling.
        let best_total = table
            .first_reachable_from(from)
            .ok_or(SolverError::InvariantViolation {
                message: "no reachable total within the search ceiling",
            })?;

        let counts = table.reconstruct(&table_sizes, best_total)?;

        let packs: PackAllocations = sizes
            .iter()
            .zip(counts)
            .filter(|&(_, count)| count > 0)
            .map(|(size, count)| PackAllocation::new(size, count))
            .collect();

        let total = u64::try_from(best_total).map_err(|_overflow| SolverError::InvariantViolation {
            message: "total does not fit u64",
        })?;

        Ok(SolveResult {
            requested: quantity,
            total,
            packs,
        })
    }
}
