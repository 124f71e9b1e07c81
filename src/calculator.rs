//! Pack Calculator
//!
//! Entry point for callers: solves against the configured default pack
//! sizes through the result cache, or against caller-supplied sizes without
//! it.

use std::{sync::Arc, time::Instant};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::{
    cache::{CacheConfig, CacheMetricsSnapshot, ResultCache},
    config::CalculatorConfig,
    packs::PackSizes,
    solvers::{SolveResult, Solver, SolverError, dp::DPSolver},
};

/// Pack calculator with a cached default catalogue.
///
/// The default pack sizes are held as a shared snapshot. Replacing them
/// swaps the snapshot and clears the cache in one step, so a result solved
/// against an old catalogue is never served afterwards.
#[derive(Debug)]
pub struct PackCalculator<S: Solver = DPSolver> {
    solver: S,
    default_sizes: RwLock<Arc<PackSizes>>,
    cache: ResultCache,
}

impl Default for PackCalculator {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl PackCalculator {
    /// Create a calculator from configuration.
    pub fn new(config: &CalculatorConfig) -> Self {
        Self::with_solver(
            DPSolver::new(config.limits),
            config.default_sizes.clone(),
            config.cache,
        )
    }
}

impl<S: Solver> PackCalculator<S> {
    /// Create a calculator around a specific solver.
    pub fn with_solver(solver: S, default_sizes: PackSizes, cache: CacheConfig) -> Self {
        Self {
            solver,
            default_sizes: RwLock::new(Arc::new(default_sizes)),
            cache: ResultCache::new(cache),
        }
    }

    /// Calculate packs for `quantity` using the default pack sizes.
    ///
    /// Results are served from the cache while fresh.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver rejects the quantity.
    pub fn calculate(&self, quantity: i64) -> Result<SolveResult, SolverError> {
        if quantity <= 0 {
            return Ok(SolveResult::empty(quantity));
        }

        if let Some(result) = self.cache.get(quantity) {
            debug!(quantity, total = result.total, "cache hit");

            return Ok(result);
        }

        let sizes = self.default_sizes();
        let result = self.solve(quantity, &sizes)?;

        // Holding the read lock while storing keeps a concurrent catalogue
        // swap from landing between the check and the insert.
        let current = self.default_sizes.read();

        if Arc::ptr_eq(&current, &sizes) {
            self.cache.set(quantity, result.clone());
        } else {
            debug!(
                quantity,
                "default pack sizes changed while solving, not caching"
            );
        }

        Ok(result)
    }

    /// Calculate packs for `quantity` using caller-supplied pack sizes.
    ///
    /// Non-positive sizes are dropped and duplicates removed. If nothing
    /// usable remains this behaves exactly like [`Self::calculate`];
    /// otherwise the cache is bypassed.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver rejects the quantity.
    pub fn calculate_with_sizes(
        &self,
        quantity: i64,
        sizes: &[i64],
    ) -> Result<SolveResult, SolverError> {
        match PackSizes::normalize(sizes) {
            Some(sizes) => self.solve(quantity, &sizes),
            None => self.calculate(quantity),
        }
    }

    /// Drop every cached result.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();

        info!("result cache invalidated");
    }

    /// Replace the default pack sizes and invalidate the cache.
    pub fn set_default_sizes(&self, sizes: PackSizes) {
        let mut current = self.default_sizes.write();

        info!(from = %current, to = %sizes, "replacing default pack sizes");

        *current = Arc::new(sizes);
        self.invalidate_cache();
    }

    /// The current default pack sizes.
    pub fn default_sizes(&self) -> Arc<PackSizes> {
        Arc::clone(&self.default_sizes.read())
    }

    /// Remove expired cache entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }

    /// Snapshot of the cache counters.
    pub fn cache_metrics(&self) -> CacheMetricsSnapshot {
        self.cache.metrics_snapshot()
    }

    fn solve(&self, quantity: i64, sizes: &PackSizes) -> Result<SolveResult, SolverError> {
        let start = Instant::now();

        let result = self.solver.solve(quantity, sizes)?;

        debug!(
            quantity,
            %sizes,
            total = result.total,
            packs = result.pack_count(),
            elapsed = ?start.elapsed(),
            "solved pack allocation"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use testresult::TestResult;

    use crate::solvers::dp::SolverLimits;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingSolver {
        calls: AtomicUsize,
    }

    impl Solver for CountingSolver {
        fn solve(&self, quantity: i64, sizes: &PackSizes) -> Result<SolveResult, SolverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            DPSolver::default().solve(quantity, sizes)
        }
    }

    impl CountingSolver {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn counting_calculator() -> PackCalculator<CountingSolver> {
        PackCalculator::with_solver(
            CountingSolver::default(),
            PackSizes::default(),
            CacheConfig::default(),
        )
    }

    #[test]
    fn second_calculate_is_served_from_cache() -> TestResult {
        let calculator = counting_calculator();

        let first = calculator.calculate(12001)?;
        let second = calculator.calculate(12001)?;

        assert_eq!(first, second);
        assert_eq!(calculator.solver.calls(), 1);
        assert_eq!(calculator.cache_metrics().hits, 1);

        Ok(())
    }

    #[test]
    fn invalidate_forces_recompute() -> TestResult {
        let calculator = counting_calculator();

        calculator.calculate(501)?;
        calculator.invalidate_cache();
        calculator.calculate(501)?;

        assert_eq!(calculator.solver.calls(), 2);

        Ok(())
    }

    #[test]
    fn custom_sizes_bypass_cache() -> TestResult {
        let calculator = counting_calculator();

        calculator.calculate_with_sizes(263, &[23, 31, 53])?;
        calculator.calculate_with_sizes(263, &[23, 31, 53])?;

        assert_eq!(calculator.solver.calls(), 2);
        assert_eq!(calculator.cache_metrics().len, 0);

        Ok(())
    }

    #[test]
    fn unusable_custom_sizes_fall_back_to_defaults() -> TestResult {
        let calculator = counting_calculator();

        let fallback = calculator.calculate_with_sizes(251, &[0, -5])?;
        let cached = calculator.calculate(251)?;

        assert_eq!(fallback, cached);
        assert_eq!(calculator.solver.calls(), 1);

        Ok(())
    }

    #[test]
    fn non_positive_quantity_skips_solver_and_cache() -> TestResult {
        let calculator = counting_calculator();

        assert_eq!(calculator.calculate(-10)?, SolveResult::empty(-10));
        assert_eq!(calculator.calculate(0)?, SolveResult::empty(0));
        assert_eq!(calculator.solver.calls(), 0);
        assert_eq!(calculator.cache_metrics().lookups(), 0);

        Ok(())
    }

    #[test]
    fn replacing_defaults_invalidates_cache() -> TestResult {
        let calculator = counting_calculator();

        assert_eq!(calculator.calculate(300)?.total, 500);

        calculator.set_default_sizes(PackSizes::new([100, 300])?);

        assert_eq!(calculator.calculate(300)?.total, 300);
        assert_eq!(calculator.solver.calls(), 2);
        assert_eq!(calculator.default_sizes().as_slice(), &[300, 100]);

        Ok(())
    }

    #[test]
    fn solver_errors_are_not_cached() {
        let calculator = PackCalculator::with_solver(
            DPSolver::new(SolverLimits::with_max_ceiling(1_000)),
            PackSizes::default(),
            CacheConfig::default(),
        );

        let result = calculator.calculate(10_000);

        assert!(matches!(result, Err(SolverError::QuantityTooLarge { .. })));
        assert_eq!(calculator.cache_metrics().len, 0);
    }

    #[test]
    fn purge_expired_with_zero_ttl_empties_cache() -> TestResult {
        let calculator = PackCalculator::with_solver(
            DPSolver::default(),
            PackSizes::default(),
            CacheConfig::with_capacity(8).ttl(Duration::ZERO),
        );

        calculator.calculate(1)?;

        assert_eq!(calculator.purge_expired(), 1);

        Ok(())
    }
}
