//! Ordered list of primes produced by one sieve run.

use crate::error::SieveError;
use crate::sieve::Algorithm;
use serde::Serialize;

/// Primes strictly below `bound`, in ascending order.
///
/// Built once by a sieve and immutable afterwards. Two sets are compared with
/// [`same_as`](PrimeSet::same_as), which looks only at the values so that
/// results of different algorithms can be cross-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimeSet {
    bound: u64,
    values: Vec<u64>,
}

impl PrimeSet {
    /// Generate the primes below `bound` with `algorithm`.
    pub fn generate(bound: u64, algorithm: Algorithm) -> Result<Self, SieveError> {
        algorithm.generate(bound)
    }

    /// Freeze a list built by a sieve. `values` must be strictly increasing.
    pub(crate) fn from_sorted(bound: u64, values: Vec<u64>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(values.last().map_or(true, |&p| p < bound));
        PrimeSet { bound, values }
    }

    /// True iff both sets hold the same primes in the same order.
    pub fn same_as(&self, other: &PrimeSet) -> bool {
        self.values == other.values
    }

    /// The exclusive upper bound this set was generated for.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.values.iter()
    }

    pub fn contains(&self, n: u64) -> bool {
        self.values.binary_search(&n).is_ok()
    }

    /// Largest prime below the bound.
    pub fn largest(&self) -> Option<u64> {
        self.values.last().copied()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.values
    }
}

impl<'a> IntoIterator for &'a PrimeSet {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Comma-separated list, e.g. `2,3,5,7`.
impl std::fmt::Display for PrimeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}
