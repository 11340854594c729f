// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides compact finite sets of small integers. These are 
//! used to represent the domain of labels available out of a given state as
//! well as to encode problem states (e.g. a set of vertices, a set of colors).
//!
//! Two flavors share the same contract: a `FixedSet` whose capacity is a
//! compile time constant (and which never allocates), and a `GrowableSet` 
//! which doubles its storage whenever a too large value gets inserted. In both
//! cases, the values are stored as the bits of 64 bits words.
//! 
//! The word level routines which are common to both flavors live here.
mod fixed;
mod growable;

pub use fixed::*;
pub use growable::*;

use std::fmt;

/// The number of bits in one word of a set
pub(crate) const WORD_BITS: usize = 64;

/// Returns the index of the word holding `value`
#[inline]
pub(crate) fn word_of(value: usize) -> usize {
    value / WORD_BITS
}
/// Returns the mask selecting the bit of `value` in its word
#[inline]
pub(crate) fn bit_of(value: usize) -> u64 {
    1_u64 << (value % WORD_BITS)
}
/// Returns the number of words needed to hold `capacity` values
#[inline]
pub(crate) fn words_for(capacity: usize) -> usize {
    (capacity + WORD_BITS - 1) / WORD_BITS
}

/// Sets all the bits in the range `[from, to)`.
pub(crate) fn fill_range(words: &mut [u64], from: usize, to: usize) {
    let mut v = from;
    while v < to {
        let w = word_of(v);
        let lo = v % WORD_BITS;
        let hi = (to - w * WORD_BITS).min(WORD_BITS);
        words[w] |= low_mask(hi) & !low_mask(lo);
        v = (w + 1) * WORD_BITS;
    }
}
/// Clears all bits strictly greater than `value`
pub(crate) fn clear_above(words: &mut [u64], value: usize) {
    let w = word_of(value);
    if w < words.len() {
        words[w] &= low_mask(value % WORD_BITS + 1);
        for x in words[w + 1..].iter_mut() {
            *x = 0;
        }
    }
}
/// Clears all bits strictly smaller than `value`
pub(crate) fn clear_below(words: &mut [u64], value: usize) {
    let w = word_of(value).min(words.len());
    for x in words[..w].iter_mut() {
        *x = 0;
    }
    if w < words.len() {
        words[w] &= !low_mask(value % WORD_BITS);
    }
}
/// A mask having the `n` least significant bits turned on (n <= 64)
#[inline]
fn low_mask(n: usize) -> u64 {
    if n >= WORD_BITS { u64::MAX } else { (1_u64 << n) - 1 }
}
/// Number of elements in the set
#[inline]
pub(crate) fn popcount(words: &[u64]) -> usize {
    words.iter().map(|w| w.count_ones() as usize).sum()
}
/// Stable hash of a set: fold of the significant words via rotate-xor. 
/// Trailing zero words are ignored so that two equal sets having different
/// capacities yield the same value.
pub(crate) fn fold_words(words: &[u64]) -> u64 {
    let significant = words.iter().rposition(|w| *w != 0).map_or(0, |p| p + 1);
    words[..significant].iter().fold(0_u64, |h, w| h.rotate_left(5) ^ *w)
}
/// Formats the set as `{a, b, c}`
pub(crate) fn fmt_words(words: &[u64], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(Iter::new(words)).finish()
}

/// Iterates over the values of a set in ascending order. It extracts the
/// least significant bit of each word in turn. This iterator is always 
/// finite and can be restarted by asking the set for a new one.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}
impl <'a> Iter<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        Self { words, index: 0, current: words.first().copied().unwrap_or(0) }
    }
}
impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.index += 1;
            if self.index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.index];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.index * WORD_BITS + bit)
    }
}
