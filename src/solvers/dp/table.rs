//! Minimum pack count table

use smallvec::SmallVec;

use crate::solvers::SolverError;

const UNREACHABLE: u32 = u32::MAX;
const NO_CHOICE: u32 = u32::MAX;

/// Minimum number of packs summing exactly to each total in `0..=ceiling`,
/// with the pack chosen last for each reachable total.
#[derive(Debug)]
pub(crate) struct PackTable {
    min_packs: Vec<u32>,
    last_pack: Vec<u32>,
}

impl PackTable {
    /// Fill the table for `sizes` (largest first) up to and including `ceiling`.
    ///
    /// Sizes are tried in the order given and a choice is only replaced by a
    /// strictly smaller pack count, so ties keep the earliest (largest) size.
    pub(crate) fn build(sizes: &[usize], ceiling: usize) -> Result<Self, SolverError> {
        let len = ceiling
            .checked_add(1)
            .ok_or(SolverError::InvariantViolation {
                message: "table length overflows usize",
            })?;

        let mut min_packs = vec![UNREACHABLE; len];
        let mut last_pack = vec![NO_CHOICE; len];

        if let Some(zero) = min_packs.first_mut() {
            *zero = 0;
        }

        for total in 1..len {
            let mut best = UNREACHABLE;
            let mut best_idx = NO_CHOICE;

            for (idx, &size) in sizes.iter().enumerate() {
                let Some(rest) = total.checked_sub(size) else {
                    continue;
                };

                let prev = min_packs.get(rest).copied().unwrap_or(UNREACHABLE);

                if prev == UNREACHABLE {
                    continue;
                }

                let candidate = prev.saturating_add(1);

                if candidate < best {
                    best = candidate;
                    best_idx = u32::try_from(idx).map_err(|_overflow| {
                        SolverError::InvariantViolation {
                            message: "pack size index does not fit the table",
                        }
                    })?;
                }
            }

            if let (Some(count), Some(choice)) =
                (min_packs.get_mut(total), last_pack.get_mut(total))
            {
                *count = best;
                *choice = best_idx;
            }
        }

        Ok(Self {
            min_packs,
            last_pack,
        })
    }

    /// Whether some combination of packs sums exactly to `total`.
    pub(crate) fn is_reachable(&self, total: usize) -> bool {
        self.min_packs
            .get(total)
            .is_some_and(|&count| count != UNREACHABLE)
    }

    /// Minimum pack count for `total`, if reachable.
    pub(crate) fn min_packs(&self, total: usize) -> Option<u32> {
        self.min_packs
            .get(total)
            .copied()
            .filter(|&count| count != UNREACHABLE)
    }

    /// First reachable total in `from..=ceiling`.
    pub(crate) fn first_reachable_from(&self, from: usize) -> Option<usize> {
        (from..self.min_packs.len()).find(|&total| self.is_reachable(total))
    }

    /// Walk the recorded choices back from `total` to zero, counting packs
    /// per size index.
    ///
    /// The walk must use exactly the minimum pack count recorded for `total`.
    pub(crate) fn reconstruct(
        &self,
        sizes: &[usize],
        total: usize,
    ) -> Result<SmallVec<[u64; 8]>, SolverError> {
        let mut counts: SmallVec<[u64; 8]> = SmallVec::from_elem(0, sizes.len());
        let mut remaining = total;

        while remaining > 0 {
            let idx = self
                .last_pack
                .get(remaining)
                .copied()
                .filter(|&idx| idx != NO_CHOICE)
                .and_then(|idx| usize::try_from(idx).ok())
                .ok_or(SolverError::InvariantViolation {
                    message: "reachable total has no recorded pack",
                })?;

            let size = sizes
                .get(idx)
                .copied()
                .ok_or(SolverError::InvariantViolation {
                    message: "recorded pack index is out of range",
                })?;

            if let Some(count) = counts.get_mut(idx) {
                *count += 1;
            }

            remaining = remaining
                .checked_sub(size)
                .ok_or(SolverError::InvariantViolation {
                    message: "recorded pack is larger than the remaining total",
                })?;
        }

        let walked: u64 = counts.iter().sum();

        if self.min_packs(total).map(u64::from) != Some(walked) {
            return Err(SolverError::InvariantViolation {
                message: "reconstructed pack count differs from the table minimum",
            });
        }

        Ok(counts)
    }
}
