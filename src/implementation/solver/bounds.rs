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

//! This module keeps track of the bounds on the optimum of the problem that
//! is being solved.

use std::fmt::Debug;

use tracing::info;

use crate::{Sense, Solution, SolutionObserver};

/// The bounds of an optimization: the value of the best known solution 
/// (primal) along with that solution, and the best value that could still
/// possibly be reached (dual). The observers are told about each solution
/// that improves the primal bound.
pub struct Bounds {
    sense: Sense,
    primal: isize,
    solution: Option<Solution>,
    dual: isize,
    observers: Vec<SolutionObserver>,
}

impl Debug for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bounds")
            .field("sense", &self.sense)
            .field("primal", &self.primal)
            .field("solution", &self.solution)
            .field("dual", &self.dual)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Bounds {
    /// Creates bounds telling nothing yet: the primal is the worst value and
    /// the dual is unbounded
    pub fn new(sense: Sense) -> Self {
        Self {
            sense,
            primal: sense.worst(),
            solution: None,
            dual: sense.unbounded(),
            observers: vec![],
        }
    }
    pub fn sense(&self) -> Sense {
        self.sense
    }
    pub fn primal(&self) -> isize {
        self.primal
    }
    pub fn dual(&self) -> isize {
        self.dual
    }
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
    /// The value of the best solution, None when no solution is known
    pub fn best_value(&self) -> Option<isize> {
        self.solution.as_ref().map(|_| self.primal)
    }
    /// The primal bound as an optional value: None while it is the worst value
    pub fn best_known(&self) -> Option<isize> {
        if self.primal == self.sense.worst() {
            None
        } else {
            Some(self.primal)
        }
    }
    /// Returns true iff a subproblem with the given dual bound may still 
    /// contain a solution strictly better than the primal.
    pub fn can_improve(&self, bound: isize) -> bool {
        self.sense.is_better(bound, self.primal)
    }
    /// Registers a callback invoked each time the primal improves
    pub fn observe(&mut self, observer: SolutionObserver) {
        self.observers.push(observer)
    }
    /// Raises the primal to a known value for which no solution is attached
    pub fn set_primal_value(&mut self, value: isize) {
        if self.can_improve(value) {
            self.primal = value;
            self.solution = None;
        }
    }
    /// Offers a new solution. It is only retained (and the observers only 
    /// told) when it strictly improves the primal bound. Returns true iff
    /// that was the case.
    pub fn offer(&mut self, value: isize, solution: Solution) -> bool {
        if !self.can_improve(value) {
            return false;
        }
        info!(value, gap = self.gap_with(value), "primal improved");
        for observer in self.observers.iter_mut() {
            observer(solution.as_slice(), value);
        }
        self.primal = value;
        self.solution = Some(solution);
        true
    }
    /// Moves the dual bound. It never becomes looser than the primal.
    pub fn set_dual(&mut self, dual: isize) {
        self.dual = self.sense.best(dual, self.primal);
    }
    /// Closes the gap: the primal is proved optimal
    pub fn close(&mut self) {
        self.dual = self.primal;
    }
    /// The relative distance between the primal and dual bounds: 
    /// `|dual - primal| / max(|dual|, |primal|)`. It is 0.0 once they meet 
    /// and 1.0 as long as one of them is unknown.
    pub fn gap(&self) -> f32 {
        self.gap_with(self.primal)
    }

    fn gap_with(&self, primal: isize) -> f32 {
        if primal == self.dual {
            return 0.0;
        }
        if primal == self.sense.worst() || self.dual == self.sense.unbounded() {
            return 1.0;
        }
        let primal = primal as f64;
        let dual = self.dual as f64;
        ((dual - primal).abs() / primal.abs().max(dual.abs())) as f32
    }
}
