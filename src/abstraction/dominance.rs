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

use std::sync::Arc;

use crate::Sense;

/// This trait gives the possibility to model dominance relations between the
/// states of a specific problem. The dominance relation is only evaluated for
/// pairs of states that are mapped onto the same key.
pub trait Dominance {
    type State;
    type Key;

    /// Takes a state and returns a key that maps it to comparable states.
    /// None means that the state is not comparable with any other.
    fn get_key(&self, state: &Self::State) -> Option<Self::Key>;

    /// Returns true iff any completion of `b` can be matched by a completion
    /// of `a` that is at least as good. The two states are assumed to share
    /// the same key.
    fn dominates(&self, a: &Self::State, b: &Self::State) -> bool;
}

/// Identifies one subproblem of the solver fringe: the slot it occupies in the
/// subproblem pool and the sequence number it was given when it was pushed.
/// The sequence number disambiguates the reuses of a same slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub slot: usize,
    pub seq: usize,
}

/// The structure that remembers the states that have been enqueued so far
/// and tells whether a new one is dominated by any of them.
pub trait DominanceChecker<T> {
    /// Returns true if the state is dominated by a stored one. Otherwise, the 
    /// state is recorded under the given `ticket` and the stored entries it 
    /// dominates are forgotten. The tickets of these evicted entries are 
    /// passed on to `evicted` so that the caller can invalidate them.
    fn is_dominated_or_insert(
        &mut self,
        state: Arc<T>,
        value: isize,
        sense: Sense,
        ticket: Ticket,
        evicted: &mut dyn FnMut(Ticket),
    ) -> bool;
    /// Forgets all stored entries
    fn clear(&mut self);
}
