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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client library is likely to work with.

use std::{cmp::Ordering, sync::Arc};

// ----------------------------------------------------------------------------
// --- LABEL ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A label is one admissible decision (move) out of a given state. It is a
/// small non negative integer; the meaning of that integer is entirely up to
/// the model that produced it (a color, an item being taken or not, a city..)
pub type Label = usize;

/// A solution is nothing but the sequence of labels that leads from the root
/// of the problem to its unique sink.
pub type Solution = Vec<Label>;

// ----------------------------------------------------------------------------
// --- SENSE ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The optimization sense of a model. This is the comparator that decides 
/// whether the bounds are combined with `min` or with `max`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sense {
    /// The objective must be made as small as possible
    Minimize,
    /// The objective must be made as large as possible
    Maximize,
}
impl Sense {
    /// Compares two objective values. `Greater` means that `a` is *better* 
    /// than `b` (smaller when minimizing, larger when maximizing).
    ///
    /// # Examples:
    /// ```
    /// # use ddbb::Sense;
    /// # use std::cmp::Ordering;
    /// assert_eq!(Ordering::Greater, Sense::Maximize.compare(10, 2));
    /// assert_eq!(Ordering::Less,    Sense::Minimize.compare(10, 2));
    /// ```
    #[inline]
    pub fn compare(self, a: isize, b: isize) -> Ordering {
        match self {
            Sense::Maximize => a.cmp(&b),
            Sense::Minimize => b.cmp(&a),
        }
    }
    /// Returns true iff `a` is strictly better than `b`
    #[inline]
    pub fn is_better(self, a: isize, b: isize) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
    /// Returns true iff `a` is at least as good as `b`
    #[inline]
    pub fn is_at_least_as_good(self, a: isize, b: isize) -> bool {
        self.compare(a, b) != Ordering::Less
    }
    /// Returns the better of the two values
    #[inline]
    pub fn best(self, a: isize, b: isize) -> isize {
        if self.is_better(b, a) { b } else { a }
    }
    /// Returns the tighter of two dual bounds (that is, the worse of the two
    /// values: `min` when maximizing, `max` when minimizing).
    #[inline]
    pub fn tighter(self, a: isize, b: isize) -> isize {
        if self.is_better(a, b) { b } else { a }
    }
    /// The value no feasible solution can ever be worse than. This is the 
    /// identity of `best` and serves as the 'not reached yet' sentinel.
    #[inline]
    pub fn worst(self) -> isize {
        match self {
            Sense::Maximize => isize::MIN,
            Sense::Minimize => isize::MAX,
        }
    }
    /// The value no feasible solution can ever be better than. This is the
    /// identity of `tighter` and is used as a trivial dual bound.
    #[inline]
    pub fn unbounded(self) -> isize {
        match self {
            Sense::Maximize => isize::MAX,
            Sense::Minimize => isize::MIN,
        }
    }
}

// ----------------------------------------------------------------------------
// --- COMPILATION TYPE -------------------------------------------------------
// ----------------------------------------------------------------------------
/// How are we to compile the decision diagram ? This tag is also passed on to
/// the model callbacks (label domain and local bound) because a relaxed 
/// compilation may legally offer a superset of the moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilationType {
    /// The true diagram: no layer is ever trimmed
    Exact,
    /// A sub-diagram whose layers are trimmed to the maximum width. It yields
    /// genuine solutions (a primal bound)
    Restricted,
    /// An over approximation whose layers are shrunk by merging nodes. It 
    /// yields a dual bound
    Relaxed,
}

/// What type of cut-set are we using for relaxed DDs ?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CutsetType {
    /// enqueue the last layer with only exact nodes
    #[default]
    LastExactLayer,
    /// enqueue all exact nodes that have at least a relaxed child node
    Frontier,
}

/// How are nodes having the same forward bound ranked when a layer must be 
/// trimmed or squashed ?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// The node that was created first is deemed the most promising
    #[default]
    CreationOrder,
    /// The node with the best local bound estimate is deemed the most promising
    /// (creation order is used when the estimates are equal or missing)
    LocalBound,
}

// ----------------------------------------------------------------------------
// --- SUBPROBLEM -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A subproblem is a residual problem that must be solved in order to complete the
/// resolution of the original problem which had been defined. 
/// 
/// # Note:
/// Subproblems are automatically instanciated from nodes in the exact custsets 
/// of relaxed decision diagrams. They are the *only* thing that survives the
/// rollback of the arenas a diagram is compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProblem<T> {
    /// The root state of this sub problem
    pub state: Arc<T>,
    /// The root value of this sub problem (its forward bound)
    pub value: isize,
    /// The path to traverse to reach this subproblem from the root
    /// of the original problem
    pub path: Vec<Label>,
    /// A dual bound on the objective reachable in this subproblem
    pub bound: isize,
    /// The depth of the subproblem with respect to the root problem
    pub depth: usize,
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why the search stopped before proving optimality
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    #[error("the cutoff criterion was met before optimality could be proved")]
    CutoffOccurred
}

/// The outcome of an mdd development or of a complete search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// is the given solution exact (proved optimal for the given [sub-]problem)?
    /// or is it an approximation ?
    pub is_exact: bool,
    /// if present the value of the best solution derived from this mdd
    pub best_value: Option<isize>,
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
