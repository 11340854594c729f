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

//! # DDBB
//! DDBB is a decision diagram compiler paired with a best-first branch and
//! bound driver to solve combinatorial optimization problems. Its goal is to
//! let you describe your optimization problem as a dynamic program (see 
//! `Model`): a transition system going from a root state down to a unique 
//! target state, along with a way to merge states. The sole condition to 
//! ensure the correctness of the optimization is that the merged state must be
//! an over approximation of all what is feasible from the states it replaces.
//!
//! The diagrams are hash-consed: within one compilation, two transitions
//! reaching the same state lead to the very same node. Their nodes and edges 
//! are bump-allocated in arenas that are rolled back in one go when the next
//! compilation starts.
//!
//! ## Quick Example
//! The following presents a minimalistic use of ddbb. It implements a solver 
//! for the binary knapsack problem. Here, the state of a node is the index of 
//! the next item to consider along with the remaining capacity of the sack. 
//! When two states need to be merged, we keep the largest capacity as it 
//! enables at least all the behaviors feasible with lesser capacities.
//!
//! ```
//! use ddbb::*;
//!
//! struct Knapsack {
//!     capacity: usize,
//!     profit  : Vec<isize>,
//!     weight  : Vec<usize>,
//! }
//! impl Model for Knapsack {
//!     type State = (usize, usize);
//!
//!     fn sense(&self) -> Sense {
//!         Sense::Maximize
//!     }
//!     fn initial_state(&self) -> (usize, usize) {
//!         (0, self.capacity)
//!     }
//!     fn target(&self) -> (usize, usize) {
//!         (self.profit.len(), 0)
//!     }
//!     fn is_sink(&self, state: &(usize, usize)) -> bool {
//!         state.0 == self.profit.len()
//!     }
//!     fn label_domain(&self, &(item, capacity): &(usize, usize), _: CompilationType) -> GrowableSet {
//!         if capacity >= self.weight[item] {
//!             GrowableSet::from_range(0..2)
//!         } else {
//!             GrowableSet::from_range(0..1)
//!         }
//!     }
//!     fn transition(&self, &(item, capacity): &(usize, usize), label: Label) -> Option<(usize, usize)> {
//!         let remaining = capacity.checked_sub(label * self.weight[item])?;
//!         Some((item + 1, remaining))
//!     }
//!     fn cost(&self, &(item, _): &(usize, usize), label: Label) -> isize {
//!         self.profit[item] * label as isize
//!     }
//!     fn merge(&self, a: &(usize, usize), b: &(usize, usize)) -> Option<(usize, usize)> {
//!         if a.0 == b.0 { Some((a.0, a.1.max(b.1))) } else { None }
//!     }
//! }
//!
//! // 1. Create an instance of our knapsack problem
//! let problem = Knapsack {
//!     capacity: 50,
//!     profit  : vec![60, 100, 120],
//!     weight  : vec![10,  20,  30],
//! };
//! // 2. Tell the solver how large the diagrams may grow
//! let config = SolverConfigBuilder::default().max_width(2).build().unwrap();
//! // 3. Create a solver for that problem, and let it run until optimality is 
//! //    proved (a `TimeBudget` could be used instead of `NoCutoff`)
//! let mut solver = SequentialSolver::new(&problem, &NoCutoff, config);
//! // the outcome provides the value of the best solution that was found for
//! // the problem (if one was found) along with a flag indicating whether or
//! // not the solution was proven optimal. Hence an unsatisfiable problem
//! // would have `outcome.best_value == None` and `outcome.is_exact` true.
//! let outcome = solver.solve();
//!
//! assert!(outcome.is_exact);
//! assert_eq!(Some(220), outcome.best_value);
//! assert_eq!(Some(vec![0, 1, 1]), solver.best_solution());
//! assert_eq!(solver.best_primal(), solver.best_dual());
//! ```
//!
//! ## Getting a grasp on the codebase
//! The `abstraction` level defines the traits you will implement or use: 
//! `Model` and `Dominance` describe your problem, while `DecisionDiagram`,
//! `Fringe`, `DominanceChecker`, `Cutoff` and `Solver` are the seams of the 
//! solver. The `implementation` level provides the finite sets, the arenas,
//! the hash-consed `Mdd` and the `SequentialSolver`.
//!
//! ## Logging
//! The library reports its progress through the `tracing` facade; install
//! any subscriber (e.g. `tracing-subscriber`) to see it.

mod common;
mod abstraction;
mod implementation;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;
