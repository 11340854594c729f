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

use std::{hash::Hash, sync::Arc};

use fxhash::FxHashMap;

use crate::{Dominance, DominanceChecker, Sense, Ticket};

/// Simple implementation of a dominance checker that stores a vector of non-dominated
/// states for each disctinct key.
#[derive(Debug)]
struct DominanceEntry<T> {
    state: Arc<T>,
    value: isize,
    ticket: Ticket,
}

#[derive(Debug)]
pub struct SimpleDominanceChecker<D>
where
    D: Dominance,
    D::Key: Eq + Hash,
{
    dominance: D,
    data: FxHashMap<D::Key, Vec<DominanceEntry<D::State>>>,
}

impl<D> SimpleDominanceChecker<D>
where
    D: Dominance,
    D::Key: Eq + Hash,
{
    pub fn new(dominance: D) -> Self {
        Self { dominance, data: Default::default() }
    }
    /// The number of live entries that are recorded
    pub fn len(&self) -> usize {
        self.data.values().map(|entries| entries.len()).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D> DominanceChecker<D::State> for SimpleDominanceChecker<D>
where
    D: Dominance,
    D::Key: Eq + Hash,
{
    fn is_dominated_or_insert(
        &mut self,
        state: Arc<D::State>,
        value: isize,
        sense: Sense,
        ticket: Ticket,
        evicted: &mut dyn FnMut(Ticket),
    ) -> bool {
        let Some(key) = self.dominance.get_key(state.as_ref()) else {
            return false;
        };
        let dominance = &self.dominance;
        let entries = self.data.entry(key).or_default();

        let dominated = entries.iter().any(|e| 
            sense.is_at_least_as_good(e.value, value) && dominance.dominates(e.state.as_ref(), state.as_ref()));
        if dominated {
            return true;
        }

        entries.retain(|e| {
            let beaten = sense.is_at_least_as_good(value, e.value) && dominance.dominates(state.as_ref(), e.state.as_ref());
            if beaten {
                evicted(e.ticket);
            }
            !beaten
        });
        entries.push(DominanceEntry { state, value, ticket });
        false
    }

    fn clear(&mut self) {
        self.data.clear()
    }
}
