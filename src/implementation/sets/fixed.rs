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

//! This module provides the implementation of a set whose capacity is fixed
//! at compile time.

use std::{fmt, hash::{Hash, Hasher}, ops::{BitAnd, BitOr, Not, Range, Sub}};

use super::{bit_of, clear_above, clear_below, fill_range, fmt_words, fold_words, popcount, word_of, Iter, WORD_BITS};

/// A set of integers in `[0, 64 * W)`. It never allocates and all of its 
/// operations run in O(W).
///
/// # Example
/// ```
/// # use ddbb::FixedSet;
/// let mut colors = FixedSet::<1>::new();
/// colors.insert(3);
/// colors.insert(1);
/// assert!(colors.contains(3));
/// assert_eq!(vec![1, 3], colors.iter().collect::<Vec<_>>());
/// ```
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FixedSet<const W: usize> {
    words: [u64; W],
}

impl <const W: usize> FixedSet<W> {
    /// The number of values this set is able to hold
    pub const CAPACITY: usize = W * WORD_BITS;

    /// Creates an empty set
    pub const fn new() -> Self {
        Self { words: [0; W] }
    }
    /// Creates a set that contains all values in the given range
    pub fn from_range(range: Range<usize>) -> Self {
        assert!(range.end <= Self::CAPACITY, "range {range:?} exceeds the capacity of the set");
        let mut set = Self::new();
        fill_range(&mut set.words, range.start, range.end);
        set
    }
    /// Returns the number of values this set is able to hold
    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }
    /// Adds a value to the set. Returns true iff it was not present before
    pub fn insert(&mut self, value: usize) -> bool {
        assert!(value < Self::CAPACITY, "{value} exceeds the capacity of the set");
        let w = word_of(value);
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
        value < Self::CAPACITY && self.words[word_of(value)] & bit_of(value) != 0
    }
    /// The number of values in the set
    pub fn len(&self) -> usize {
        popcount(&self.words)
    }
    /// Returns true iff the set holds no value
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }
    /// Removes all values from the set
    pub fn clear(&mut self) {
        self.words = [0; W];
    }
    /// In place union
    pub fn union_with(&mut self, other: &Self) {
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a |= *b);
    }
    /// In place intersection
    pub fn intersect_with(&mut self, other: &Self) {
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a &= *b);
    }
    /// In place difference
    pub fn difference_with(&mut self, other: &Self) {
        self.words.iter_mut().zip(other.words.iter()).for_each(|(a, b)| *a &= !*b);
    }
    /// Returns the union of both sets
    pub fn union(mut self, other: &Self) -> Self {
        self.union_with(other);
        self
    }
    /// Returns the intersection of both sets
    pub fn intersect(mut self, other: &Self) -> Self {
        self.intersect_with(other);
        self
    }
    /// Returns the values of self which are not in other
    pub fn difference(mut self, other: &Self) -> Self {
        self.difference_with(other);
        self
    }
    /// Returns the values in `[0, capacity)` which do not belong to this set
    pub fn complement(mut self) -> Self {
        self.words.iter_mut().for_each(|w| *w = !*w);
        self
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
        self.words.iter().zip(other.words.iter()).all(|(a, b)| a & !b == 0)
    }
    /// The smallest value of the set (if any)
    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }
    /// Iterates over the values of the set in ascending order
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.words)
    }
}

impl <const W: usize> Default for FixedSet<W> {
    fn default() -> Self {
        Self::new()
    }
}
impl <const W: usize> Hash for FixedSet<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(fold_words(&self.words));
    }
}
impl <const W: usize> fmt::Debug for FixedSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_words(&self.words, f)
    }
}
impl <const W: usize> fmt::Display for FixedSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_words(&self.words, f)
    }
}
impl <'a, const W: usize> IntoIterator for &'a FixedSet<W> {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
impl <const W: usize> FromIterator<usize> for FixedSet<W> {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
impl <const W: usize> Extend<usize> for FixedSet<W> {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}
impl <const W: usize> BitOr for FixedSet<W> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}
impl <const W: usize> BitAnd for FixedSet<W> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(&rhs)
    }
}
impl <const W: usize> Sub for FixedSet<W> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.difference(&rhs)
    }
}
impl <const W: usize> Not for FixedSet<W> {
    type Output = Self;
    fn not(self) -> Self {
        self.complement()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_fixed_set {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::FixedSet;

    type Set = FixedSet<2>;

    fn hash_of(s: &Set) -> u64 {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    }

    #[test]
    fn by_default_it_is_empty() {
        let s = Set::default();
        assert!(s.is_empty());
        assert_eq!(0, s.len());
        assert_eq!(128, s.capacity());
    }
    #[test]
    fn insert_reports_whether_the_value_is_new() {
        let mut s = Set::new();
        assert!(s.insert(70));
        assert!(!s.insert(70));
        assert!(s.contains(70));
        assert_eq!(1, s.len());
    }
    #[test]
    fn remove_reports_whether_the_value_was_present() {
        let mut s = Set::from_range(0..3);
        assert!(s.remove(1));
        assert!(!s.remove(1));
        assert!(!s.remove(1000));
        assert_eq!(vec![0, 2], s.iter().collect::<Vec<_>>());
    }
    #[test]
    fn contains_is_false_beyond_the_capacity() {
        let s = Set::from_range(0..128);
        assert!(!s.contains(128));
        assert_eq!(128, s.len());
    }
    #[test]
    #[should_panic]
    fn inserting_beyond_the_capacity_is_a_programming_error() {
        let mut s = Set::new();
        s.insert(128);
    }
    #[test]
    fn set_operations() {
        let a: Set = [1, 2, 3, 100].into_iter().collect();
        let b: Set = [3, 4, 100].into_iter().collect();

        assert_eq!(vec![1, 2, 3, 4, 100], (a | b).iter().collect::<Vec<_>>());
        assert_eq!(vec![3, 100],          (a & b).iter().collect::<Vec<_>>());
        assert_eq!(vec![1, 2],            (a - b).iter().collect::<Vec<_>>());
        assert_eq!(124,                   (!a).len());
        assert!(!(!a).contains(100));
    }
    #[test]
    fn remove_above_and_below() {
        let mut s = Set::from_range(0..128);
        s.remove_above(99);
        s.remove_below(10);
        assert_eq!(90, s.len());
        assert_eq!(Some(10), s.first());
        assert_eq!(Some(99), s.iter().last());
    }
    #[test]
    fn subset() {
        let a = Set::from_range(2..5);
        let b = Set::from_range(0..10);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
    }
    #[test]
    fn equal_sets_hash_equal() {
        let a: Set = [5, 80].into_iter().collect();
        let mut b = Set::from_range(0..100);
        b.remove_above(80);
        b.remove_below(80);
        b.insert(5);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
    #[test]
    fn it_displays_as_a_set() {
        let a: Set = [5, 80].into_iter().collect();
        assert_eq!("{5, 80}", format!("{a}"));
        assert_eq!("{}", format!("{:?}", Set::new()));
    }
}
