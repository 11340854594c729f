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

//! This module provides the ordering of the solver fringe.

use std::cmp::Ordering;

use compare::Compare;

use crate::{FringeEntry, Sense};

/// The BestBound strategy is one that always selects the fringe entry having
/// the best dual bound estimate. In case of equalities, the ties are broken 
/// using the value of the best path leading to the subproblem and eventually
/// the insertion order (first in, first out).
///
/// # Example
/// ```
/// # use ddbb::*;
/// # use binary_heap_plus::BinaryHeap;
/// let a = FringeEntry { bound: 300, value: 42, seq: 0, slot: 0 };
/// let b = FringeEntry { bound: 100, value:  2, seq: 1, slot: 1 };
/// let c = FringeEntry { bound: 100, value: 19, seq: 2, slot: 2 };
/// let d = FringeEntry { bound: 700, value: 65, seq: 3, slot: 3 };
///
/// let mut heap = BinaryHeap::from_vec_cmp(vec![a, b, c, d], BestBound::new(Sense::Maximize));
/// assert_eq!(3, heap.pop().unwrap().slot); // because 700 is the highest bound
/// assert_eq!(0, heap.pop().unwrap().slot); // because 300 is the next highest
/// assert_eq!(2, heap.pop().unwrap().slot); // because bound = 100 but value = 19
/// assert_eq!(1, heap.pop().unwrap().slot); // because bound = 100 but value = 2
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BestBound {
    sense: Sense,
}
impl BestBound {
    pub fn new(sense: Sense) -> Self {
        Self { sense }
    }
}
impl Compare<FringeEntry> for BestBound {
    /// `Greater` means that `l` must be explored before `r`
    fn compare(&self, l: &FringeEntry, r: &FringeEntry) -> Ordering {
        self.sense.compare(l.bound, r.bound)
            .then_with(|| self.sense.compare(l.value, r.value))
            .then_with(|| r.seq.cmp(&l.seq))
    }
}
