//! Solvers for Pack Allocation

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::packs::PackSizes;

pub mod dp;

/// Solver Errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The pack size set reaching the solver was empty.
    #[error("invalid configuration: pack size set is empty")]
    InvalidConfiguration,

    /// The search ceiling for this quantity exceeds the configured bound.
    ///
    /// The ceiling is the quantity plus the largest pack size, less one, so
    /// an oversized pack size can trigger this for any quantity.
    #[error(
        "search ceiling {ceiling} for quantity {quantity} and the largest pack size exceeds the limit of {limit}"
    )]
    QuantityTooLarge {
        /// Requested quantity
        quantity: i64,

        /// Search ceiling the quantity would require (saturated on overflow)
        ceiling: u64,

        /// Configured ceiling limit
        limit: u64,
    },

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// A number of packs of a single size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackAllocation {
    /// Pack size
    pub size: u64,

    /// Number of packs of this size, always greater than zero
    pub count: u64,
}

impl PackAllocation {
    /// Create a new allocation entry.
    pub const fn new(size: u64, count: u64) -> Self {
        Self { size, count }
    }

    /// Units shipped by this entry.
    pub const fn units(&self) -> u64 {
        self.size.saturating_mul(self.count)
    }
}

impl From<(u64, u64)> for PackAllocation {
    fn from((size, count): (u64, u64)) -> Self {
        Self::new(size, count)
    }
}

/// Allocation entries, ordered descending by pack size.
pub type PackAllocations = SmallVec<[PackAllocation; 5]>;

/// Result of solving a pack allocation for a requested quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Quantity the caller asked for
    pub requested: i64,

    /// Total units shipped across all packs
    pub total: u64,

    /// Chosen packs, largest size first
    pub packs: PackAllocations,
}

impl SolveResult {
    /// The result for a quantity that needs nothing shipped.
    pub fn empty(requested: i64) -> Self {
        Self {
            requested,
            total: 0,
            packs: SmallVec::new(),
        }
    }

    /// Total number of packs shipped.
    pub fn pack_count(&self) -> u64 {
        self.packs.iter().map(|pack| pack.count).sum()
    }

    /// Units shipped beyond the requested quantity.
    pub fn surplus(&self) -> u64 {
        match u64::try_from(self.requested) {
            Ok(requested) => self.total.saturating_sub(requested),
            Err(_negative) => self.total,
        }
    }

    /// Whether no packs are shipped.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

/// Trait for solving pack allocation problems
pub trait Solver {
    /// Solve the pack allocation for `quantity` using the given pack sizes.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the sizes are empty, the quantity is
    /// beyond the solver's limits, or an internal invariant is broken.
    fn solve(&self, quantity: i64, sizes: &PackSizes) -> Result<SolveResult, SolverError>;
}
