//! # primebits — Packed Bit Vectors and Classic Prime Sieves
//!
//! [`BitVector`] stores one flag per bit in 16/32/64/128-bit words with
//! checked random access, in-place resizing and a seekable [`Cursor`]. The
//! sieves of Eratosthenes, Atkin and Sundaram in [`sieve`] are built on it and
//! return their output as a [`PrimeSet`].
//!
//! ```
//! use primebits::{Algorithm, PrimeSet};
//!
//! let e = PrimeSet::generate(50, Algorithm::Eratosthenes).unwrap();
//! let s = PrimeSet::generate(50, Algorithm::Sundaram).unwrap();
//! assert!(e.same_as(&s));
//! assert_eq!(e.to_string(), "2,3,5,7,11,13,17,19,23,29,31,37,41,43,47");
//! ```

pub mod bitvec;
pub mod config;
pub mod error;
pub mod prime_set;
pub mod sieve;
pub mod word;

pub use bitvec::{BitVector, Cursor};
pub use config::SieveConfig;
pub use error::SieveError;
pub use prime_set::PrimeSet;
pub use sieve::Algorithm;
pub use word::{NativeWord, Word, WordWidth};
