//! # Word — Storage Units for Packed Bits
//!
//! A [`BitVector`](crate::bitvec::BitVector) stores its bits in unsigned
//! integer words. The word type fixes the index translation constants once, at
//! compile time:
//!
//! - `BITS`  — bits per word (16, 32, 64 or 128)
//! - `MASK`  — `BITS - 1`, selects the bit within a word
//! - `SHIFT` — `log2(BITS)`, selects the word
//!
//! so bit `i` lives in word `i >> SHIFT` at position `i & MASK`. No division or
//! modulo is performed on the access path.
//!
//! [`WordWidth`] is the runtime counterpart used by configuration files: it
//! names one of the four recognised widths and is mapped onto a concrete
//! [`Word`] type at a single match in [`crate::config`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl};

/// An unsigned integer usable as backing storage for a bit vector.
pub trait Word:
    Copy
    + Eq
    + Debug
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<usize, Output = Self>
{
    /// Bits per word.
    const BITS: usize;
    /// `BITS - 1`.
    const MASK: usize = Self::BITS - 1;
    /// `log2(BITS)`.
    const SHIFT: usize = Self::BITS.trailing_zeros() as usize;
    const ZERO: Self;
    const ONE: Self;
    /// All bits set.
    const ONES: Self;

    fn count_ones(self) -> u32;
    fn trailing_zeros(self) -> u32;

    /// Single-bit mask for bit `index` of the vector.
    #[inline]
    fn bit(index: usize) -> Self {
        Self::ONE << (index & Self::MASK)
    }
}

macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl Word for $t {
            const BITS: usize = <$t>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const ONES: Self = <$t>::MAX;

            #[inline]
            fn count_ones(self) -> u32 {
                <$t>::count_ones(self)
            }

            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$t>::trailing_zeros(self)
            }
        }
    )*};
}

impl_word!(u16, u32, u64, u128);

/// The natural machine word of the target.
#[cfg(target_pointer_width = "16")]
pub type NativeWord = u16;
#[cfg(target_pointer_width = "32")]
pub type NativeWord = u32;
#[cfg(target_pointer_width = "64")]
pub type NativeWord = u64;

/// Word width selected at configuration time.
///
/// Serialises as the bit count (`16`, `32`, `64`, `128`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WordWidth {
    W16,
    W32,
    W64,
    W128,
}

impl WordWidth {
    pub const ALL: [WordWidth; 4] = [
        WordWidth::W16,
        WordWidth::W32,
        WordWidth::W64,
        WordWidth::W128,
    ];

    /// Width matching [`NativeWord`].
    pub fn native() -> Self {
        match NativeWord::BITS {
            16 => WordWidth::W16,
            32 => WordWidth::W32,
            _ => WordWidth::W64,
        }
    }

    pub fn bits(self) -> usize {
        match self {
            WordWidth::W16 => 16,
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
            WordWidth::W128 => 128,
        }
    }

    pub fn mask(self) -> usize {
        self.bits() - 1
    }

    pub fn shift(self) -> usize {
        self.bits().trailing_zeros() as usize
    }
}

impl Default for WordWidth {
    fn default() -> Self {
        WordWidth::native()
    }
}

impl TryFrom<u32> for WordWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(WordWidth::W16),
            32 => Ok(WordWidth::W32),
            64 => Ok(WordWidth::W64),
            128 => Ok(WordWidth::W128),
            other => Err(format!(
                "unsupported word width {} (expected 16, 32, 64 or 128)",
                other
            )),
        }
    }
}

impl From<WordWidth> for u32 {
    fn from(width: WordWidth) -> u32 {
        width.bits() as u32
    }
}

impl std::fmt::Display for WordWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
