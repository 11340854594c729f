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

use crate::{CompilationType, Completion, CutsetType, Model, Solution, SubProblem, TieBreak};

/// The set of parameters used to tweak the compilation of a decision diagram
pub struct CompilationInput<'a, State> {
    /// How is the dd being compiled ?
    pub comp_type: CompilationType,
    /// A reference to the model of the problem being solved
    pub model: &'a dyn Model<State = State>,
    /// What is the maximum width of a layer ?
    pub max_width: usize,
    /// The subproblem whose state space must be explored
    pub residual: &'a SubProblem<State>,
    /// The value of the best known solution (if any) at the time when the dd
    /// is being compiled. Nodes that cannot improve it are not expanded.
    pub best_known: Option<isize>,
    /// How are the nodes having the same value ranked ?
    pub tie_break: TieBreak,
    /// Which nodes form the exact cut-set of a relaxed dd ?
    pub cutset: CutsetType,
}

/// This trait describes the operations that can be expected from an abstract
/// decision diagram regardless of the way it is implemented.
pub trait DecisionDiagram<State> {
    /// This method provokes the compilation of the DD based on the given 
    /// compilation input (compilation type, and root subproblem)
    fn compile(&mut self, input: &CompilationInput<State>) -> Completion;
    /// Returns true iff the DD which has been compiled is an exact DD.
    fn is_exact(&self) -> bool;
    /// Returns the optimal value of the objective function or None when no 
    /// feasible solution has been identified (no r-t path) either because
    /// the subproblem at the root of this DD is infeasible or because restriction
    /// has removed all feasible paths that could potentially have been found.
    fn best_value(&self) -> Option<isize>;
    /// Returns the best solution of this subproblem as a sequence of labels
    /// (starting from the root of the original problem). When no feasible 
    /// solution exists in the approximate DD, it returns the value None instead.
    fn best_solution(&self) -> Option<Solution>;
    /// Returns the value of the best path of the DD when that path only
    /// traverses exact nodes (hence is an actual solution), None otherwise.
    fn best_exact_value(&self) -> Option<isize>;
    /// Returns the best path of the DD when it only traverses exact nodes
    fn best_exact_solution(&self) -> Option<Solution>;
    /// Iteratively applies the given function `func` to each element of the
    /// exact cut-set that was computed during DD compilation.
    ///
    /// # Important:
    /// This can only be called if the DD was compiled in relaxed mode.
    /// All implementations of the DecisionDiagram trait are allowed to assume
    /// this method will be called at most once per relaxed DD compilation.
    fn drain_cutset<F>(&mut self, func: F)
    where
        F: FnMut(SubProblem<State>);
    /// Iteratively applies the given function `func` to each node that was
    /// trimmed away from a layer of a restricted DD.
    fn drain_discarded<F>(&mut self, func: F)
    where
        F: FnMut(SubProblem<State>);
}
