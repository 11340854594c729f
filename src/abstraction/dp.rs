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

//! This module defines the `Model` trait: the dynamic programming formulation
//! of a problem, envisioned as a labeled transition system from a unique
//! initial state to a unique target state.

use crate::{CompilationType, GrowableSet, Label, Sense};

/// This trait defines the "contract" of what defines an optimization problem
/// solvable with the branch-and-bound with DD paradigm. The solver only ever
/// stores, compares and hashes the states; all the problem specific knowledge
/// lives in the implementation of this trait.
///
/// The model is assumed to be layered: every transition sends a state one
/// layer deeper so that the transition relation has no cycle.
///
/// # Note
/// In order to be compiled, the states must be `Eq + Hash + Clone + Debug`.
pub trait Model {
    /// The DP model of the problem manipulates a state which is user-defined.
    type State;

    /// Are we minimizing or maximizing the objective ?
    fn sense(&self) -> Sense;
    /// The state at the root of the problem
    fn initial_state(&self) -> Self::State;
    /// The value of the objective at the root of the problem
    fn initial_value(&self) -> isize {
        0
    }
    /// The unique state reached by all complete solutions
    fn target(&self) -> Self::State;
    /// Returns true iff the given state is the target state. This is the
    /// dedicated equality test used to connect the last transitions of a
    /// diagram to its sink.
    fn is_sink(&self, state: &Self::State) -> bool;
    /// The set of labels that may be applied to `state`. A relaxed compilation
    /// may legally be offered a larger domain than an exact or restricted one.
    fn label_domain(&self, state: &Self::State, comp_type: CompilationType) -> GrowableSet;
    /// The state reached when applying `label` to `state`, or None when that
    /// move is infeasible.
    fn transition(&self, state: &Self::State, label: Label) -> Option<Self::State>;
    /// The contribution to the objective of applying `label` to `state`
    fn cost(&self, state: &Self::State, label: Label) -> isize;
    /// Combines two states into a single one standing for both of them (their
    /// relaxation). It returns None when the two states cannot be merged.
    fn merge(&self, a: &Self::State, b: &Self::State) -> Option<Self::State>;
    /// An optimistic estimate of the best objective contribution that can 
    /// still be collected from `state` down to the target. None means that
    /// no such estimate is known.
    fn local_bound(&self, _state: &Self::State, _comp_type: CompilationType) -> Option<isize> {
        None
    }
}
