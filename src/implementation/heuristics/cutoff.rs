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

//! This module provides the implementation of various cutoff heuristics that can 
//! be used to tune the behavior of a solver.

use std::time::Duration;

use crate::Cutoff;

/// _This is the default cutoff heuristic._ It imposes that the search goes
/// proves optimality before to stop.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self, _: Duration) -> bool {
        false
    }
}

/// This cutoff allows one to specify a maximum time budget to solve the problem.
/// Once the time budget is elapsed, the optimization stops and the best solution
/// that has been found (so far) is returned.
///
/// # Example
/// ```
/// # use ddbb::*;
/// use std::time::Duration;
///
/// let budget = TimeBudget::new(Duration::from_secs(10));
/// assert!(!budget.must_stop(Duration::from_secs(9)));
/// assert!(budget.must_stop(Duration::from_secs(10)));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct TimeBudget {
    budget: Duration,
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        TimeBudget { budget }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self, elapsed: Duration) -> bool {
        elapsed >= self.budget
    }
}

#[cfg(test)]
mod test_cutoff {
    use std::time::Duration;

    use crate::{Cutoff, NoCutoff, TimeBudget};

    #[test]
    fn no_cutoff_never_stops() {
        assert!(!NoCutoff.must_stop(Duration::ZERO));
        assert!(!NoCutoff.must_stop(Duration::from_secs(u64::MAX)));
    }
    #[test]
    fn time_budget_stops_once_the_budget_is_spent() {
        let cutoff = TimeBudget::new(Duration::from_millis(100));
        assert!(!cutoff.must_stop(Duration::from_millis(99)));
        assert!(cutoff.must_stop(Duration::from_millis(100)));
        assert!(cutoff.must_stop(Duration::from_millis(101)));
    }
    #[test]
    fn any_closure_can_be_used_as_a_cutoff() {
        let cutoff = |elapsed: Duration| elapsed > Duration::from_secs(1);
        let cutoff: &dyn Cutoff = &cutoff;
        assert!(!cutoff.must_stop(Duration::from_secs(1)));
        assert!(cutoff.must_stop(Duration::from_secs(2)));
    }
}
