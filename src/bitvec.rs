//! # BitVector — Packed Single-Bit Storage
//!
//! A resizable array of flags stored one bit per flag in unsigned words. This
//! is the working memory of every sieve in [`crate::sieve`]: 8× smaller than
//! `Vec<bool>` and 64× smaller than `Vec<u64>`, so a bound of 10M fits in
//! 1.25 MB.
//!
//! ## Index Translation
//!
//! Bit `i` is stored in word `i >> W::SHIFT` at bit position `i & W::MASK`.
//! The word type `W` (see [`crate::word`]) is a type parameter, so the
//! mask/shift pair is fixed per instance at compile time.
//!
//! ## Capacity
//!
//! Requested sizes are rounded up to whole words. [`BitVector::size`] reports
//! the rounded capacity, so `BitVector::<u64>::new(33).size() == 64`. Every
//! addressable bit is zero after construction, `resize` growth, or `clear`.
//! After [`BitVector::set_all`] the padding bits are ones as well.
//!
//! ## Access
//!
//! Public accessors (`get`, `set`, `unset`, `toggle`) check the index and fail
//! with [`SieveError::IndexOutOfRange`]. Crate-internal `*_bit` variants skip
//! the check (guarded by `debug_assert!`) for sieve inner loops whose indices
//! are bounded by construction.

use crate::error::SieveError;
use crate::word::{NativeWord, Word};

/// Packed array of single-bit values.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVector<W: Word = NativeWord> {
    words: Vec<W>,
}

impl<W: Word> BitVector<W> {
    /// Create a vector holding at least `size` bits, all zero.
    pub fn new(size: usize) -> Self {
        BitVector {
            words: vec![W::ZERO; Self::words_for(size)],
        }
    }

    /// Number of words needed for `bits` bits.
    #[inline]
    fn words_for(bits: usize) -> usize {
        (bits >> W::SHIFT) + usize::from(bits & W::MASK != 0)
    }

    /// Resize to hold at least `new_size` bits and return the new capacity.
    ///
    /// Words below `min(old, new)` keep their content; added words are zero.
    /// When the word count does not change, storage is left untouched.
    pub fn resize(&mut self, new_size: usize) -> usize {
        let new_words = Self::words_for(new_size);
        let old_words = self.words.len();
        if new_words != old_words {
            self.words.resize(new_words, W::ZERO);
            if new_words < old_words {
                self.words.shrink_to_fit();
            }
        }
        self.size()
    }

    /// Set every bit to 0.
    pub fn clear(&mut self) {
        self.words.fill(W::ZERO);
    }

    /// Set every bit to 1, including padding bits in the last word.
    pub fn set_all(&mut self) {
        self.words.fill(W::ONES);
    }

    /// Bit capacity: word count × word width.
    #[inline]
    pub fn size(&self) -> usize {
        self.words.len() << W::SHIFT
    }

    /// Same as [`size`](Self::size).
    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true iff `index` is addressable.
    #[inline]
    pub fn exists(&self, index: usize) -> bool {
        index < self.size()
    }

    #[inline]
    fn check(&self, index: usize) -> Result<(), SieveError> {
        if self.exists(index) {
            Ok(())
        } else {
            Err(SieveError::IndexOutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    /// Read bit `index`.
    pub fn get(&self, index: usize) -> Result<bool, SieveError> {
        self.check(index)?;
        Ok(self.test_bit(index))
    }

    /// Write bit `index`. `false` is the same as [`unset`](Self::unset).
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), SieveError> {
        if !value {
            return self.unset(index);
        }
        self.check(index)?;
        self.put_bit(index);
        Ok(())
    }

    /// Zero bit `index`. The position itself stays addressable.
    pub fn unset(&mut self, index: usize) -> Result<(), SieveError> {
        self.check(index)?;
        self.clear_bit(index);
        Ok(())
    }

    /// Invert bit `index`.
    pub fn toggle(&mut self, index: usize) -> Result<(), SieveError> {
        self.check(index)?;
        self.flip_bit(index);
        Ok(())
    }

    #[inline]
    pub(crate) fn test_bit(&self, index: usize) -> bool {
        debug_assert!(
            self.exists(index),
            "BitVector index out of bounds: {} >= {}",
            index,
            self.size()
        );
        self.words[index >> W::SHIFT] & W::bit(index) != W::ZERO
    }

    #[inline]
    pub(crate) fn put_bit(&mut self, index: usize) {
        debug_assert!(self.exists(index));
        let word = &mut self.words[index >> W::SHIFT];
        *word = *word | W::bit(index);
    }

    #[inline]
    pub(crate) fn clear_bit(&mut self, index: usize) {
        debug_assert!(self.exists(index));
        let word = &mut self.words[index >> W::SHIFT];
        *word = *word & !W::bit(index);
    }

    #[inline]
    pub(crate) fn flip_bit(&mut self, index: usize) {
        debug_assert!(self.exists(index));
        let word = &mut self.words[index >> W::SHIFT];
        *word = *word ^ W::bit(index);
    }

    /// Number of set bits (padding included).
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over every bit in `[0, size())`.
    pub fn iter(&self) -> Iter<'_, W> {
        Iter {
            vec: self,
            pos: 0,
            end: self.size(),
        }
    }

    /// Iterate over the indices of set bits in ascending order.
    pub fn iter_ones(&self) -> Ones<'_, W> {
        Ones {
            words: self.words.iter(),
            base: 0,
            next_base: 0,
            current: W::ZERO,
        }
    }

    /// Seekable read/write view starting at position 0.
    pub fn cursor(&mut self) -> Cursor<'_, W> {
        Cursor { vec: self, pos: 0 }
    }
}

impl<W: Word> Default for BitVector<W> {
    fn default() -> Self {
        BitVector::new(0)
    }
}

impl<W: Word> std::fmt::Debug for BitVector<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitVector")
            .field("word_bits", &W::BITS)
            .field("size", &self.size())
            .field("ones", &self.count_ones())
            .finish()
    }
}

impl<'a, W: Word> IntoIterator for &'a BitVector<W> {
    type Item = bool;
    type IntoIter = Iter<'a, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bits of a [`BitVector`].
pub struct Iter<'a, W: Word> {
    vec: &'a BitVector<W>,
    pos: usize,
    end: usize,
}

impl<W: Word> Iterator for Iter<'_, W> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let bit = self.vec.test_bit(self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<W: Word> ExactSizeIterator for Iter<'_, W> {}

/// Iterator over set-bit indices, one word at a time via `trailing_zeros`.
pub struct Ones<'a, W: Word> {
    words: std::slice::Iter<'a, W>,
    base: usize,
    next_base: usize,
    current: W,
}

impl<W: Word> Iterator for Ones<'_, W> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == W::ZERO {
            self.current = *self.words.next()?;
            self.base = self.next_base;
            self.next_base += W::BITS;
        }
        let tz = self.current.trailing_zeros() as usize;
        self.current = self.current ^ (W::ONE << tz);
        Some(self.base + tz)
    }
}

/// Seekable cursor over a [`BitVector`] with read and write access.
///
/// The cursor is restartable ([`rewind`](Cursor::rewind)) and positioned by
/// [`seek`](Cursor::seek). Indexed access goes through the same checked
/// contract as the vector itself. As an [`Iterator`] it yields
/// `(position, bit)` pairs from the current position to the end.
pub struct Cursor<'a, W: Word = NativeWord> {
    vec: &'a mut BitVector<W>,
    pos: usize,
}

impl<W: Word> Cursor<'_, W> {
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Step to the next position (may move past the end).
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    pub fn valid(&self) -> bool {
        self.pos < self.vec.size()
    }

    pub fn key(&self) -> usize {
        self.pos
    }

    /// Bit at the current position, or `None` once past the end.
    pub fn current(&self) -> Option<bool> {
        self.vec.get(self.pos).ok()
    }

    /// Move to `position`, which must lie in `[0, size())`.
    pub fn seek(&mut self, position: usize) -> Result<(), SieveError> {
        if !self.vec.exists(position) {
            return Err(SieveError::IndexOutOfRange {
                index: position,
                size: self.vec.size(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn exists(&self, index: usize) -> bool {
        self.vec.exists(index)
    }

    pub fn get(&self, index: usize) -> Result<bool, SieveError> {
        self.vec.get(index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<(), SieveError> {
        self.vec.set(index, value)
    }

    pub fn unset(&mut self, index: usize) -> Result<(), SieveError> {
        self.vec.unset(index)
    }
}

impl<W: Word> Iterator for Cursor<'_, W> {
    type Item = (usize, bool);

    fn next(&mut self) -> Option<(usize, bool)> {
        let bit = self.current()?;
        let key = self.pos;
        self.advance();
        Some((key, bit))
    }
}
