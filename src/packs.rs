//! Pack Sizes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Pack sizes used whenever no catalogue has been configured.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// Errors related to pack size set construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackSizesError {
    /// No pack sizes were supplied.
    #[error("pack size set is empty")]
    Empty,

    /// A pack size was zero or negative (index, value).
    #[error("pack size {1} at position {0} is not positive")]
    NonPositive(usize, i64),

    /// A pack size could not be parsed from text.
    #[error("invalid pack size: {0:?}")]
    Parse(String),
}

/// Ordered set of distinct, positive pack sizes.
///
/// Sizes are held in descending order so that iteration visits the largest
/// pack first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u64>")]
pub struct PackSizes {
    sizes: SmallVec<[u64; 8]>,
}

impl PackSizes {
    /// Create a pack size set, rejecting empty input and non-positive sizes.
    ///
    /// # Errors
    ///
    /// Returns [`PackSizesError::Empty`] if no sizes are given, or
    /// [`PackSizesError::NonPositive`] for the first size that is `<= 0`.
    pub fn new(sizes: impl IntoIterator<Item = i64>) -> Result<Self, PackSizesError> {
        let mut positive: SmallVec<[u64; 8]> = SmallVec::new();

        for (idx, size) in sizes.into_iter().enumerate() {
            match u64::try_from(size) {
                Ok(size) if size > 0 => positive.push(size),
                _ => return Err(PackSizesError::NonPositive(idx, size)),
            }
        }

        Self::from_positive(positive).ok_or(PackSizesError::Empty)
    }

    /// Create a pack size set from caller-supplied sizes, silently dropping
    /// anything that is not positive.
    ///
    /// Returns `None` when nothing usable remains.
    pub fn normalize(sizes: &[i64]) -> Option<Self> {
        Self::from_positive(
            sizes
                .iter()
                .filter_map(|&size| u64::try_from(size).ok())
                .filter(|&size| size > 0)
                .collect(),
        )
    }

    /// The built-in default catalogue.
    pub fn builtin() -> Self {
        let mut sizes = SmallVec::from_slice(&DEFAULT_PACK_SIZES);
        sizes.reverse();

        PackSizes { sizes }
    }

    fn from_positive(mut sizes: SmallVec<[u64; 8]>) -> Option<Self> {
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();

        if sizes.is_empty() {
            None
        } else {
            Some(PackSizes { sizes })
        }
    }

    /// Iterate over the sizes, largest first.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sizes.iter().copied()
    }

    /// The sizes as a slice, largest first.
    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    /// Largest pack size.
    pub fn largest(&self) -> u64 {
        self.sizes.first().copied().unwrap_or_default()
    }

    /// Smallest pack size.
    pub fn smallest(&self) -> u64 {
        self.sizes.last().copied().unwrap_or_default()
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the set holds no sizes. Always `false` for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl Default for PackSizes {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Display for PackSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, size) in self.sizes.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }

            write!(f, "{size}")?;
        }

        Ok(())
    }
}

impl FromStr for PackSizes {
    type Err = PackSizesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sizes = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_err| PackSizesError::Parse(part.to_string()))
            })
            .collect::<Result<SmallVec<[i64; 8]>, _>>()?;

        Self::new(sizes)
    }
}

impl TryFrom<Vec<i64>> for PackSizes {
    type Error = PackSizesError;

    fn try_from(sizes: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

impl From<PackSizes> for Vec<u64> {
    fn from(sizes: PackSizes) -> Self {
        sizes.sizes.into_vec()
    }
}
