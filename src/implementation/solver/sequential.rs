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

//! This module provides the implementation of a sequential branch-and-bound
//! solver. That is a solver that will solve the problem using one single 
//! thread of execution.
//!
//! The solver explores the subproblems best bound first. For each of them, it
//! compiles a restricted diagram (which may improve the primal bound) and then
//! a relaxed diagram whose exact cut-set yields the subproblems that must 
//! still be explored.
use std::{fmt::Debug, hash::Hash, sync::Arc, time::Instant};

use tracing::{debug, info};

use crate::{
    Bounds, CompilationInput, CompilationType, Completion, Cutoff, DecisionDiagram, 
    DominanceChecker, EmptyDominanceChecker, Fringe, FringeEntry, Mdd, Model, 
    Reason, SimpleFringe, Slab, Solution, SolutionObserver, Solver, SolverConfig, 
    SubProblem, Ticket,
};

/// A subproblem waiting in the pool along with the insertion number of the
/// fringe entry pointing at it
struct Pending<T> {
    seq: usize,
    node: SubProblem<T>,
}

pub struct SequentialSolver<'a, T, C = EmptyDominanceChecker<T>>
where C: DominanceChecker<T>,
{
    /// A reference to the model of the problem being solved
    model: &'a dyn Model<State = T>,
    /// Detects the subproblems that need not be explored because an other 
    /// one is at least as promising
    dominance: C,
    /// A cutoff heuristic meant to decide when to stop the resolution of 
    /// a given problem.
    cutoff: &'a dyn Cutoff,
    /// How the diagrams are compiled
    config: SolverConfig,

    /// This is the fringe: the entries of all subproblems that must still be
    /// explored before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This fringe orders the entries by dual bound (best first). So, it is 
    /// guaranteed that the bound of the first entry being popped is a bound on
    /// the value reachable by exploring any of the entries remaining on the
    /// fringe.
    fringe: SimpleFringe,
    /// The subproblems the fringe entries point to. A subproblem leaves the
    /// pool either when its entry is popped or when it gets dominated, in 
    /// which case its entry is lazily skipped.
    pool: Slab<Pending<T>>,
    /// The insertion number of the next fringe entry
    next_seq: usize,
    /// Scratch buffer receiving the cut-set of the relaxed diagrams
    cutset: Vec<SubProblem<T>>,
    /// The diagram (reused for all compilations)
    mdd: Mdd<T>,

    bounds: Bounds,
    /// This is a counter that tracks the number of subproblems that have 
    /// effectively been explored.
    explored: usize,
    /// If we decide not to go through a complete proof of optimality, this is
    /// the reason why we took that decision.
    abort_proof: Option<Reason>,
}

impl<'a, T> SequentialSolver<'a, T>
where T: Eq + Hash + Clone + Debug,
{
    /// Creates a solver that does not use any dominance rule
    pub fn new(model: &'a dyn Model<State = T>, cutoff: &'a dyn Cutoff, config: SolverConfig) -> Self {
        Self::custom(model, EmptyDominanceChecker::default(), cutoff, config)
    }
}

impl<'a, T, C> SequentialSolver<'a, T, C>
where 
    T: Eq + Hash + Clone + Debug,
    C: DominanceChecker<T>,
{
    pub fn custom(model: &'a dyn Model<State = T>, dominance: C, cutoff: &'a dyn Cutoff, config: SolverConfig) -> Self {
        let sense = model.sense();
        let mut bounds = Bounds::new(sense);
        if let Some(value) = config.initial_primal {
            bounds.set_primal_value(value);
        }
        SequentialSolver {
            model,
            dominance,
            cutoff,
            mdd: Mdd::with_segment_size(config.segment_size),
            config,
            fringe: SimpleFringe::new(sense),
            pool: Slab::new(),
            next_seq: 0,
            cutset: vec![],
            bounds,
            explored: 0,
            abort_proof: None,
        }
    }

    /// The number of subproblems that have been explored so far
    pub fn explored(&self) -> usize {
        self.explored
    }
    /// The number of subproblems that are still waiting to be explored
    pub fn pending(&self) -> usize {
        self.pool.len()
    }
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// This method initializes the problem resolution. Put more simply, this
    /// method posts the root subproblem onto the fringe so that the processing
    /// can be bootstrapped.
    fn initialize(&mut self) {
        self.fringe.clear();
        self.pool.clear();
        self.dominance.clear();
        self.abort_proof = None;

        let root = self.root_node();
        self.enqueue(root);
    }

    fn root_node(&self) -> SubProblem<T> {
        SubProblem {
            state: Arc::new(self.model.initial_state()),
            value: self.model.initial_value(),
            path: vec![],
            bound: self.model.sense().unbounded(),
            depth: 0,
        }
    }

    /// Stores the given subproblem in the pool and pushes an entry pointing to
    /// it onto the fringe, unless it turns out to be dominated. The entries it
    /// dominates are removed from the pool.
    fn enqueue(&mut self, node: SubProblem<T>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let sense = self.bounds.sense();
        let bound = node.bound;
        let value = node.value;
        let state = node.state.clone();
        let slot = self.pool.insert(Pending { seq, node });

        let pool = &mut self.pool;
        let dominated = self.dominance.is_dominated_or_insert(state, value, sense, Ticket { slot, seq }, &mut |ticket| {
            if pool.get(ticket.slot).map_or(false, |p| p.seq == ticket.seq) {
                pool.remove(ticket.slot);
            }
        });

        if dominated {
            self.pool.remove(slot);
        } else {
            self.fringe.push(FringeEntry { bound, value, seq, slot });
        }
    }

    /// Takes the subproblem an entry points to out of the pool. None means
    /// that the entry was invalidated by dominance.
    fn take(&mut self, entry: &FringeEntry) -> Option<SubProblem<T>> {
        match self.pool.get(entry.slot) {
            Some(pending) if pending.seq == entry.seq => self.pool.remove(entry.slot).map(|p| p.node),
            _ => None,
        }
    }

    /// This method processes the given `node`. To do so, it compiles a 
    /// restricted and possibly a relaxed mdd rooted in `node`. If that is
    /// necessary, it stores cutset nodes onto the fringe for further processing.
    fn process_one_node(&mut self, node: SubProblem<T>) {
        debug!(depth = node.depth, value = node.value, bound = node.bound, "explore subproblem");

        // 1. RESTRICTION
        let mut compilation = CompilationInput {
            comp_type: CompilationType::Restricted,
            model: self.model,
            max_width: self.config.max_width,
            residual: &node,
            best_known: self.bounds.best_known(),
            tie_break: self.config.tie_break,
            cutset: self.config.cutset,
        };

        let Completion { is_exact, .. } = self.mdd.compile(&compilation);
        self.maybe_update_best();
        if is_exact {
            return;
        }

        // 2. RELAXATION
        compilation.comp_type = CompilationType::Relaxed;
        compilation.best_known = self.bounds.best_known();

        let Completion { is_exact, best_value } = self.mdd.compile(&compilation);
        self.maybe_update_best();
        if is_exact {
            return;
        }
        match best_value {
            Some(value) if self.bounds.can_improve(value) => self.enqueue_cutset(),
            _ => {}
        }
    }

    /// This private method updates the best known solution in case the best
    /// exact path of the current `mdd` improves it.
    fn maybe_update_best(&mut self) {
        if let Some(value) = self.mdd.best_exact_value() {
            if self.bounds.can_improve(value) {
                if let Some(solution) = self.mdd.best_exact_solution() {
                    self.bounds.offer(value, solution);
                }
            }
        }
    }

    /// Adds the cutset nodes of `mdd` that may still improve the primal bound
    /// to the fringe.
    fn enqueue_cutset(&mut self) {
        let mut cutset = std::mem::take(&mut self.cutset);
        self.mdd.drain_cutset(|sub| cutset.push(sub));

        let before = self.fringe.len();
        for sub in cutset.drain(..) {
            if self.bounds.can_improve(sub.bound) {
                self.enqueue(sub);
            }
        }
        debug!(enqueued = self.fringe.len() - before, fringe = self.fringe.len(), "cutset enqueued");

        self.cutset = cutset;
    }

    fn abort_search(&mut self, reason: Reason) {
        info!(explored = self.explored, primal = self.bounds.primal(), dual = self.bounds.dual(), "search aborted: {reason}");
        self.abort_proof = Some(reason);
        self.fringe.clear();
        self.pool.clear();
    }
}

impl<'a, T, C> Solver for SequentialSolver<'a, T, C>
where
    T: Eq + Hash + Clone + Debug,
    C: DominanceChecker<T>,
{
    /// Applies the branch and bound algorithm proposed by Bergman et al. to
    /// solve the problem to optimality.
    fn solve(&mut self) -> Completion {
        let start = Instant::now();
        self.initialize();

        loop {
            if self.cutoff.must_stop(start.elapsed()) {
                self.abort_search(Reason::CutoffOccurred);
                break;
            }
            let Some(entry) = self.fringe.pop() else {
                self.bounds.close();
                break;
            };
            let Some(node) = self.take(&entry) else {
                continue;
            };
            if !self.bounds.can_improve(entry.bound) {
                continue;
            }

            self.explored += 1;
            self.bounds.set_dual(entry.bound);
            self.process_one_node(node);
        }

        let is_exact = self.abort_proof.is_none();
        info!(
            explored = self.explored,
            primal = self.bounds.primal(),
            dual = self.bounds.dual(),
            is_exact,
            "search complete"
        );
        Completion { is_exact, best_value: self.bounds.best_value() }
    }
    /// Returns the best solution that has been identified for this problem.
    fn best_solution(&self) -> Option<Solution> {
        self.bounds.solution().cloned()
    }
    /// Returns the value of the best solution that has been identified for
    /// this problem.
    fn best_value(&self) -> Option<isize> {
        self.bounds.best_value()
    }
    fn best_primal(&self) -> isize {
        self.bounds.primal()
    }
    fn best_dual(&self) -> isize {
        self.bounds.dual()
    }
    fn set_primal(&mut self, value: isize, solution: Solution) {
        self.bounds.offer(value, solution);
    }
    fn on_solution(&mut self, observer: SolutionObserver) {
        self.bounds.observe(observer)
    }
    fn gap(&self) -> f32 {
        self.bounds.gap()
    }
}
