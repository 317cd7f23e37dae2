//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=primebits=debug cargo test`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Primes below `n` by trial division, as an independent reference.
pub fn trial_division_primes(n: u64) -> Vec<u64> {
    (2..n)
        .filter(|&k| (2..).take_while(|d| d * d <= k).all(|d| k % d != 0))
        .collect()
}
