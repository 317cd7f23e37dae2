//! # Sieve — Prime Generation over a Packed Bit Vector
//!
//! Three classic sieves, each producing every prime strictly below a bound
//! `N`. All of them allocate a [`BitVector`], mark it, and scan the surviving
//! bits into an ascending list that is frozen into a [`PrimeSet`].
//!
//! | Algorithm      | Bits    | Access pattern                    |
//! |----------------|---------|-----------------------------------|
//! | Eratosthenes   | `N`     | strided clearing from `p²`        |
//! | Atkin          | `N`     | toggling by quadratic forms       |
//! | Sundaram       | `N / 2` | strided clearing, odd-only layout |
//!
//! ## Algorithm: Eratosthenes
//!
//! Start with every bit set. For each `i` whose bit survives, clear `i·j` for
//! `j ≥ 2`. Marking starts at `i²` since smaller multiples have a smaller
//! factor and are already clear. O(N log log N) time.
//!
//! ## Algorithm: Atkin
//!
//! A squarefree `n` coprime to 6 is prime iff it has an odd number of
//! representations by the form matching its residue mod 12:
//!
//! - `4x² + y² = n` for `n ≡ 1, 5 (mod 12)`
//! - `3x² + y² = n` for `n ≡ 7 (mod 12)`
//! - `3x² − y² = n`, `x > y`, for `n ≡ 11 (mod 12)`
//!
//! Each representation toggles bit `n`. Multiples of `i²` (`i ≥ 5`) are then
//! cleared to drop the non-squarefree survivors, and 2 and 3 are forced on.
//!
//! ## Algorithm: Sundaram
//!
//! Bit `i` of a vector of `N / 2` bits stands for the odd number `2i + 1`.
//! Clearing every `i + j(2i + 1)` with `1 ≤ i ≤ j` removes exactly the odd
//! composites, so the survivors `i ≥ 1` map back to the odd primes. Half the
//! memory of the other two sieves.
//!
//! ## References
//!
//! - A. O. L. Atkin and D. J. Bernstein, "Prime sieves using binary quadratic
//!   forms", Mathematics of Computation, 73(246):1023–1030, 2004.
//! - S. P. Sundaram, 1934; see V. Ramaswami Aiyar, "Sundaram's Sieve for Prime
//!   Numbers", The Mathematics Student, 2(2):73, 1934.

use crate::bitvec::BitVector;
use crate::error::SieveError;
use crate::prime_set::PrimeSet;
use crate::word::{NativeWord, Word};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

/// The sieve variants. [`Algorithm::generate`] is the single dispatch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Eratosthenes,
    Atkin,
    Sundaram,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Eratosthenes,
        Algorithm::Atkin,
        Algorithm::Sundaram,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Eratosthenes => "eratosthenes",
            Algorithm::Atkin => "atkin",
            Algorithm::Sundaram => "sundaram",
        }
    }

    /// Generate all primes below `bound` using native-width storage words.
    pub fn generate(self, bound: u64) -> Result<PrimeSet, SieveError> {
        self.generate_with::<NativeWord>(bound)
    }

    /// Generate all primes below `bound` with `W` as the storage word.
    pub fn generate_with<W: Word>(self, bound: u64) -> Result<PrimeSet, SieveError> {
        let n = validate_bound(bound)?;
        let span = debug_span!("sieve", algorithm = self.name(), bound);
        let _guard = span.enter();

        let primes = match self {
            Algorithm::Eratosthenes => eratosthenes::<W>(n),
            Algorithm::Atkin => atkin::<W>(n),
            Algorithm::Sundaram => sundaram::<W>(n),
        };
        debug!(count = primes.len(), word_bits = W::BITS, "sieve complete");
        Ok(PrimeSet::from_sorted(bound, primes))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eratosthenes" => Ok(Algorithm::Eratosthenes),
            "atkin" => Ok(Algorithm::Atkin),
            "sundaram" => Ok(Algorithm::Sundaram),
            other => Err(format!(
                "unknown sieve algorithm '{}' (expected eratosthenes, atkin or sundaram)",
                other
            )),
        }
    }
}

/// Reject bounds with no primes below them and bounds that cannot be indexed.
fn validate_bound(bound: u64) -> Result<usize, SieveError> {
    if bound <= 2 {
        return Err(SieveError::InvalidBound {
            bound,
            reason: "2 is smallest prime number",
        });
    }
    usize::try_from(bound).map_err(|_| SieveError::InvalidBound {
        bound,
        reason: "bound exceeds addressable bit range",
    })
}

/// Estimate prime count below n (upper side of n / ln n).
fn estimate_prime_count(n: usize) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}

/// `i² < n`, false when `i²` does not fit in `usize`.
#[inline]
fn square_below(i: usize, n: usize) -> bool {
    i.checked_mul(i).is_some_and(|square| square < n)
}

/// `coeff·ii + jj`, or `None` on overflow (the term is then past any bound).
#[inline]
fn quadratic_form(coeff: usize, ii: usize, jj: usize) -> Option<usize> {
    ii.checked_mul(coeff)?.checked_add(jj)
}

/// Set bits in `[2, n)` as an ascending prime list.
fn collect_primes<W: Word>(bits: &BitVector<W>, n: usize) -> Vec<u64> {
    let mut primes = Vec::with_capacity(estimate_prime_count(n));
    primes.extend(
        bits.iter_ones()
            .skip_while(|&i| i < 2)
            .take_while(|&i| i < n)
            .map(|i| i as u64),
    );
    primes
}

/// Sieve of Eratosthenes: primes below `n`.
pub fn eratosthenes<W: Word>(n: usize) -> Vec<u64> {
    let mut bits = BitVector::<W>::new(n);
    bits.set_all();

    let mut i = 2;
    while square_below(i, n) {
        if bits.test_bit(i) {
            for multiple in (i * i..n).step_by(i) {
                bits.clear_bit(multiple);
            }
        }
        i += 1;
    }
    collect_primes(&bits, n)
}

/// Sieve of Atkin: primes below `n`.
pub fn atkin<W: Word>(n: usize) -> Vec<u64> {
    let mut bits = BitVector::<W>::new(n);

    let mut i = 1;
    while square_below(i, n) {
        let ii = i * i;
        let mut j = 1;
        while square_below(j, n) {
            let jj = j * j;

            if let Some(x) = quadratic_form(4, ii, jj).filter(|&x| x < n) {
                if x % 12 == 1 || x % 12 == 5 {
                    bits.flip_bit(x);
                }
            }

            if let Some(x) = quadratic_form(3, ii, jj).filter(|&x| x < n) {
                if x % 12 == 7 {
                    bits.flip_bit(x);
                }
            }

            if i > j {
                // 3ii - jj = 2ii + (ii - jj) with ii > jj, so no term underflows.
                if let Some(x) = quadratic_form(2, ii, ii - jj).filter(|&x| x < n) {
                    if x % 12 == 11 {
                        bits.flip_bit(x);
                    }
                }
            }
            j += 1;
        }
        i += 1;
    }

    // Squarefree pass: i = 2, 3 never reach these residues.
    let mut i = 5;
    while square_below(i, n) {
        let square = i * i;
        for multiple in (square..n).step_by(square) {
            bits.clear_bit(multiple);
        }
        i += 1;
    }

    for p in [2, 3] {
        if p < n {
            bits.put_bit(p);
        }
    }
    collect_primes(&bits, n)
}

/// Sieve of Sundaram: primes below `n`, using `n / 2` bits.
pub fn sundaram<W: Word>(n: usize) -> Vec<u64> {
    if n <= 2 {
        return Vec::new();
    }
    let half = n >> 1;
    let mut bits = BitVector::<W>::new(half);
    bits.set_all();

    for i in 1..half {
        let step = 2 * i + 1;
        // j starts at i; the first mark grows with i, so stop once it passes half.
        let mut k = i + i * step;
        if k >= half {
            break;
        }
        while k < half {
            bits.clear_bit(k);
            k += step;
        }
    }

    let mut primes = Vec::with_capacity(estimate_prime_count(n));
    primes.push(2);
    primes.extend(
        bits.iter_ones()
            .skip_while(|&i| i < 1)
            .take_while(|&i| i < half)
            .map(|i| 2 * i as u64 + 1),
    );
    primes
}

#[cfg(test)]
mod tests {
    //! # Sieve Tests
    //!
    //! Each algorithm is checked against reference lists and the prime
    //! counting function π(x) (OEIS [A000720](https://oeis.org/A000720)):
    //! π(100)=25, π(1000)=168, π(10000)=1229, π(100000)=9592. Bounds around
    //! word boundaries (63/64/65, 127/128/129) catch scans that leak padding
    //! bits set by `set_all`.

    use super::*;

    const PRIMES_BELOW_50: [u64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    fn naive_primes(n: u64) -> Vec<u64> {
        (2..n)
            .filter(|&k| (2..).take_while(|d| d * d <= k).all(|d| k % d != 0))
            .collect()
    }

    /// The three algorithms agree on the bound 50.
    #[test]
    fn all_algorithms_below_50() {
        for alg in Algorithm::ALL {
            let set = alg.generate(50).unwrap();
            assert_eq!(set.as_slice(), &PRIMES_BELOW_50, "{} below 50", alg);
            assert_eq!(set.bound(), 50);
        }
        let e = Algorithm::Eratosthenes.generate(50).unwrap();
        let a = Algorithm::Atkin.generate(50).unwrap();
        let s = Algorithm::Sundaram.generate(50).unwrap();
        assert!(e.same_as(&a));
        assert!(e.same_as(&s));
    }

    #[test]
    fn known_prime_counts() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.generate(100).unwrap().len(), 25, "{}", alg);
            assert_eq!(alg.generate(1000).unwrap().len(), 168, "{}", alg);
            assert_eq!(alg.generate(10_000).unwrap().len(), 1229, "{}", alg);
            assert_eq!(alg.generate(100_000).unwrap().len(), 9592, "{}", alg);
        }
    }

    /// Bound is exclusive: a prime bound is not part of its own set.
    #[test]
    fn small_bounds() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.generate(3).unwrap().as_slice(), &[2], "{}", alg);
            assert_eq!(alg.generate(4).unwrap().as_slice(), &[2, 3], "{}", alg);
            assert_eq!(alg.generate(5).unwrap().as_slice(), &[2, 3], "{}", alg);
            assert_eq!(alg.generate(6).unwrap().as_slice(), &[2, 3, 5], "{}", alg);
            assert_eq!(alg.generate(8).unwrap().as_slice(), &[2, 3, 5, 7], "{}", alg);
            assert_eq!(alg.generate(12).unwrap().as_slice(), &[2, 3, 5, 7, 11], "{}", alg);
        }
    }

    #[test]
    fn bounds_at_or_below_two_rejected() {
        for alg in Algorithm::ALL {
            for bound in [0, 1, 2] {
                match alg.generate(bound) {
                    Err(SieveError::InvalidBound { bound: b, reason }) => {
                        assert_eq!(b, bound);
                        assert_eq!(reason, "2 is smallest prime number");
                    }
                    other => panic!("{} accepted bound {}: {:?}", alg, bound, other),
                }
            }
        }
    }

    /// Around word boundaries the scan must stop at the bound even though
    /// `set_all` leaves padding bits on.
    #[test]
    fn bounds_near_word_boundaries() {
        for n in [63u64, 64, 65, 127, 128, 129, 255, 256, 257] {
            let expected = naive_primes(n);
            for alg in Algorithm::ALL {
                let u16_run = alg.generate_with::<u16>(n).unwrap().into_vec();
                let u64_run = alg.generate_with::<u64>(n).unwrap().into_vec();
                let u128_run = alg.generate_with::<u128>(n).unwrap().into_vec();
                assert_eq!(u16_run, expected, "{} n={} u16", alg, n);
                assert_eq!(u64_run, expected, "{} n={} u64", alg, n);
                assert_eq!(u128_run, expected, "{} n={} u128", alg, n);
            }
        }
    }

    #[test]
    fn matches_trial_division_up_to_600() {
        for n in 3..600u64 {
            let expected = naive_primes(n);
            for alg in Algorithm::ALL {
                let primes = alg.generate_with::<u32>(n).unwrap().into_vec();
                assert_eq!(primes, expected, "{} n={}", alg, n);
            }
        }
    }

    /// 65 = 4·2² + 7² = 4·4² + 1² has two representations; a sieve that sets
    /// instead of toggling would report it as prime.
    #[test]
    fn atkin_toggles_even_representation_counts() {
        let primes = atkin::<u64>(70);
        assert!(!primes.contains(&65));
        assert!(!primes.contains(&25));
        assert!(!primes.contains(&49));
        assert_eq!(primes.last(), Some(&67));
    }

    /// Loop terms near `usize::MAX` report "not below the bound" instead of
    /// wrapping around to a small index.
    #[test]
    fn loop_terms_do_not_wrap() {
        let root = 1usize << (usize::BITS / 2);
        assert!(square_below(root - 1, usize::MAX));
        assert!(!square_below(root, usize::MAX));
        assert!(!square_below(usize::MAX, usize::MAX));

        assert_eq!(quadratic_form(4, 10, 3), Some(43));
        assert_eq!(quadratic_form(4, usize::MAX / 4 + 1, 0), None);
        assert_eq!(quadratic_form(3, usize::MAX / 3, usize::MAX), None);
        assert_eq!(quadratic_form(2, usize::MAX / 2 + 1, 0), None);

        // The largest i the Atkin loop admits has a 4·i² term that no longer
        // fits in usize.
        let i = root - 1;
        assert_eq!(quadratic_form(4, i * i, 1), None);
        assert_eq!(quadratic_form(2, i * i, i * i - 1), None);
    }

    #[test]
    fn sundaram_uses_half_the_bits() {
        // 2i + 1 for i in 1..25 covers the odd numbers 3..=49.
        assert_eq!(sundaram::<u64>(50), PRIMES_BELOW_50.to_vec());
        assert_eq!(sundaram::<u64>(51), PRIMES_BELOW_50.to_vec());
        assert_eq!(sundaram::<u64>(54).last(), Some(&53));
        assert!(sundaram::<u64>(2).is_empty());
    }

    #[test]
    fn free_functions_below_two_are_empty() {
        for n in [0usize, 1, 2] {
            assert!(eratosthenes::<u64>(n).is_empty());
            assert!(atkin::<u64>(n).is_empty());
            assert!(sundaram::<u64>(n).is_empty());
        }
    }

    #[test]
    fn algorithm_names_roundtrip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.name().parse::<Algorithm>(), Ok(alg));
            assert_eq!(alg.to_string(), alg.name());
        }
        assert_eq!("Atkin".parse::<Algorithm>(), Ok(Algorithm::Atkin));
        assert!("wheel".parse::<Algorithm>().is_err());
    }

    #[test]
    fn estimate_prime_count_is_upper_bound() {
        let reference = [(100usize, 25usize), (1000, 168), (10_000, 1229), (100_000, 9592)];
        for &(n, pi) in &reference {
            assert!(estimate_prime_count(n) >= pi, "estimate below π({})", n);
        }
    }
}
