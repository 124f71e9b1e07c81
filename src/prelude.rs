//! Packwise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cache::{CacheConfig, CacheMetricsSnapshot, ResultCache},
    calculator::PackCalculator,
    config::{CalculatorConfig, ConfigError},
    packs::{DEFAULT_PACK_SIZES, PackSizes, PackSizesError},
    report::{ReportError, ShipmentReport},
    solvers::{
        PackAllocation, PackAllocations, SolveResult, Solver, SolverError,
        dp::{DPSolver, SolverLimits},
    },
};
