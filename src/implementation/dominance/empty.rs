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

use std::{marker::PhantomData, sync::Arc};

use crate::{DominanceChecker, Sense, Ticket};

/// Implementation of a dominance checker that never detects any dominance relation
#[derive(Debug)]
pub struct EmptyDominanceChecker<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for EmptyDominanceChecker<T> {
    fn default() -> Self {
        Self { _phantom: Default::default() }
    }
}

impl<T> DominanceChecker<T> for EmptyDominanceChecker<T> {
    fn is_dominated_or_insert(&mut self, _: Arc<T>, _: isize, _: Sense, _: Ticket, _: &mut dyn FnMut(Ticket)) -> bool {
        false
    }
    fn clear(&mut self) {}
}

#[cfg(test)]
mod test_empty_dominance {
    use std::sync::Arc;

    use crate::{DominanceChecker, EmptyDominanceChecker, Sense, Ticket};

    #[test]
    fn nothing_is_ever_dominated_nor_evicted() {
        let mut checker = EmptyDominanceChecker::default();
        let mut evicted = vec![];
        for seq in 0..3 {
            let ticket = Ticket { slot: 0, seq };
            assert!(!checker.is_dominated_or_insert(Arc::new(7), 10 - seq as isize, Sense::Maximize, ticket, &mut |t| evicted.push(t)));
        }
        assert!(evicted.is_empty());
    }
}
