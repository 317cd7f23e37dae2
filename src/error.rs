/// Errors from bit vector access and sieve construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// Upper bound rejected before generation (primes start at 2).
    InvalidBound { bound: u64, reason: &'static str },
    /// Bit index or cursor position outside `[0, size)`.
    IndexOutOfRange { index: usize, size: usize },
}

impl std::fmt::Display for SieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SieveError::InvalidBound { bound, reason } => {
                write!(f, "invalid upper bound {}: {}", bound, reason)
            }
            SieveError::IndexOutOfRange { index, size } => {
                write!(f, "bit index {} out of range for size {}", index, size)
            }
        }
    }
}

impl std::error::Error for SieveError {}
