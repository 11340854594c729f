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

//! This module provides the implementation of a set which grows on demand.
//! It is typically used to represent the domain of labels available out of 
//! a given state.

use std::{fmt, hash::{Hash, Hasher}, ops::{BitAnd, BitOr, Range, Sub}};

use super::{bit_of, clear_above, clear_below, fill_range, fmt_words, fold_words, popcount, word_of, words_for, Iter, WORD_BITS};

/// A set of small integers that doubles its word array whenever a value 
/// exceeding its current capacity gets inserted. Copies are deep.
///
/// # Example
/// ```
/// # use ddbb::GrowableSet;
/// let mut domain = GrowableSet::with_capacity(2);
/// domain.insert(1);
/// domain.insert(500); // grows
/// assert!(domain.capacity() > 500);
/// assert_eq!(vec![1, 500], domain.iter().collect::<Vec<_>>());
/// ```
#[derive(Clone, Default)]
pub struct GrowableSet {
    words: Vec<u64>,
}

impl GrowableSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates an empty set able to hold values in `[0, capacity)` without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { words: vec![0; words_for(capacity).max(1)] }
    }
    /// Creates a set that contains all values in the given range
    pub fn from_range(range: Range<usize>) -> Self {
        let mut set = Self::with_capacity(range.end);
        fill_range(&mut set.words, range.start, range.end);
        set
    }
    /// The number of values this set is currently able to hold
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }
    /// Adds a value to the set (growing it if needed). Returns true iff it
    /// was not present before.
    pub fn insert(&mut self, value: usize) -> bool {
        let w = word_of(value);
        if w >= self.words.len() {
            self.grow(w + 1);
        }
        let fresh = self.words[w] & bit_of(value) == 0;
        self.words[w] |= bit_of(value);
        fresh
    }
    /// Removes a value from the set. Returns true iff it was present
    pub fn remove(&mut self, value: usize) -> bool {
        if !self.contains(value) {
            return false;
        }
        self.words[word_of(value)] &= !bit_of(value);
        true
    }
    /// Returns true iff the value belongs to the set
    #[inline]
    pub fn contains(&self, value: usize) -> bool {
        self.words.get(word_of(value)).map_or(false, |w| w & bit_of(value) != 0)
    }
    /// The number of values in the set
    pub fn len(&self) -> usize {
        popcount(&self.words)
    }
    /// Returns true iff the set holds no value
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }
    /// Removes all values from the set (the capacity is retained)
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }
    /// In place union
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a |= *b);
    }
    /// In place intersection
    pub fn intersect_with(&mut self, other: &Self) {
        let common = self.words.len().min(other.words.len());
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a &= *b);
        self.words[common..].iter_mut().for_each(|w| *w = 0);
    }
    /// In place difference
    pub fn difference_with(&mut self, other: &Self) {
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a &= !*b);
    }
    /// Returns the union of both sets
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.union_with(other);
        out
    }
    /// Returns the intersection of both sets
    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.intersect_with(other);
        out
    }
    /// Returns the values of self which are not in other
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.difference_with(other);
        out
    }
    /// Returns the values in `[0, capacity)` which do not belong to this set
    pub fn complement(&self) -> Self {
        Self { words: self.words.iter().map(|w| !*w).collect() }
    }
    /// Removes all values strictly greater than `value`
    pub fn remove_above(&mut self, value: usize) {
        clear_above(&mut self.words, value);
    }
    /// Removes all values strictly smaller than `value`
    pub fn remove_below(&mut self, value: usize) {
        clear_below(&mut self.words, value);
    }
    /// Returns true iff all values of self belong to other
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words.iter().enumerate()
            .all(|(i, a)| a & !other.words.get(i).copied().unwrap_or(0) == 0)
    }
    /// The smallest value of the set (if any)
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }
    /// Iterates over the values of the set in ascending order
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.words)
    }

    /// Doubles the word array until it holds at least `words` words.
    fn grow(&mut self, words: usize) {
        let mut len = self.words.len().max(1);
        while len < words {
            len *= 2;
        }
        self.words.resize(len, 0);
    }
}

impl PartialEq for GrowableSet {
    /// Absent high words are considered to be zero
    fn eq(&self, other: &Self) -> bool {
        let (short, long) = if self.words.len() <= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        short.iter().zip(long.iter()).all(|(a, b)| a == b)
            && long[short.len()..].iter().all(|w| *w == 0)
    }
}
impl Eq for GrowableSet {}

impl Hash for GrowableSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(fold_words(&self.words));
    }
}
impl fmt::Debug for GrowableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_words(&self.words, f)
    }
}
impl fmt::Display for GrowableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_words(&self.words, f)
    }
}
impl <'a> IntoIterator for &'a GrowableSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
impl FromIterator<usize> for GrowableSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
impl Extend<usize> for GrowableSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}
impl BitOr for &GrowableSet {
    type Output = GrowableSet;
    fn bitor(self, rhs: Self) -> GrowableSet {
        self.union(rhs)
    }
}
impl BitAnd for &GrowableSet {
    type Output = GrowableSet;
    fn bitand(self, rhs: Self) -> GrowableSet {
        self.intersect(rhs)
    }
}
impl Sub for &GrowableSet {
    type Output = GrowableSet;
    fn sub(self, rhs: Self) -> GrowableSet {
        self.difference(rhs)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
