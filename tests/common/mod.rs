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

//! Small models used to drive the public api of the crate along with a brute
//! force reference solver.
#![allow(dead_code)]

use ddbb::*;

// ----------------------------------------------------------------------------
// --- REFERENCE --------------------------------------------------------------
// ----------------------------------------------------------------------------

/// Enumerates every path of the model and returns the value of the best one
pub fn brute_force<T>(model: &dyn Model<State = T>) -> Option<isize> {
    fn explore<T>(model: &dyn Model<State = T>, state: &T, value: isize, best: &mut Option<isize>) {
        if model.is_sink(state) {
            *best = Some(best.map_or(value, |b| model.sense().best(b, value)));
            return;
        }
        for label in model.label_domain(state, CompilationType::Exact).iter() {
            if let Some(next) = model.transition(state, label) {
                explore(model, &next, value + model.cost(state, label), best);
            }
        }
    }
    let mut best = None;
    explore(model, &model.initial_state(), model.initial_value(), &mut best);
    best
}

/// Replays a solution from the root of the model. It returns the value of 
/// that solution, or None when it is not a feasible path to the target.
pub fn evaluate<T>(model: &dyn Model<State = T>, solution: &[Label]) -> Option<isize> {
    let mut state = model.initial_state();
    let mut value = model.initial_value();
    for label in solution.iter().copied() {
        if model.is_sink(&state) || !model.label_domain(&state, CompilationType::Exact).contains(label) {
            return None;
        }
        let next = model.transition(&state, label)?;
        value += model.cost(&state, label);
        state = next;
    }
    if model.is_sink(&state) { Some(value) } else { None }
}

pub fn config(max_width: usize) -> SolverConfig {
    SolverConfigBuilder::default().max_width(max_width).build().unwrap()
}

// ----------------------------------------------------------------------------
// --- KNAPSACK ---------------------------------------------------------------
// ----------------------------------------------------------------------------

/// The binary knapsack. A state is the index of the next item to consider 
/// along with the remaining capacity.
#[derive(Debug, Clone)]
pub struct Knapsack {
    pub capacity: usize,
    pub profit: Vec<isize>,
    pub weight: Vec<usize>,
}
impl Knapsack {
    /// Items are given as (weight, profit) pairs
    pub fn new(capacity: usize, items: &[(usize, isize)]) -> Self {
        Knapsack {
            capacity,
            weight: items.iter().map(|i| i.0).collect(),
            profit: items.iter().map(|i| i.1).collect(),
        }
    }
}
impl Model for Knapsack {
    type State = (usize, usize);

    fn sense(&self) -> Sense {
        Sense::Maximize
    }
    fn initial_state(&self) -> (usize, usize) {
        (0, self.capacity)
    }
    fn target(&self) -> (usize, usize) {
        (self.profit.len(), 0)
    }
    fn is_sink(&self, state: &(usize, usize)) -> bool {
        state.0 >= self.profit.len()
    }
    fn label_domain(&self, &(item, capacity): &(usize, usize), _: CompilationType) -> GrowableSet {
        if capacity >= self.weight[item] {
            GrowableSet::from_range(0..2)
        } else {
            GrowableSet::from_range(0..1)
        }
    }
    fn transition(&self, &(item, capacity): &(usize, usize), label: Label) -> Option<(usize, usize)> {
        let remaining = capacity.checked_sub(label * self.weight[item])?;
        Some((item + 1, remaining))
    }
    fn cost(&self, &(item, _): &(usize, usize), label: Label) -> isize {
        self.profit[item] * label as isize
    }
    fn merge(&self, a: &(usize, usize), b: &(usize, usize)) -> Option<(usize, usize)> {
        if a.0 == b.0 { Some((a.0, a.1.max(b.1))) } else { None }
    }
    fn local_bound(&self, &(item, _): &(usize, usize), _: CompilationType) -> Option<isize> {
        Some(self.profit[item.min(self.profit.len())..].iter().sum())
    }
}

/// With the same items left, the sack having the most room wins
pub struct KnapsackDominance;
impl Dominance for KnapsackDominance {
    type State = (usize, usize);
    type Key = usize;

    fn get_key(&self, state: &(usize, usize)) -> Option<usize> {
        Some(state.0)
    }
    fn dominates(&self, a: &(usize, usize), b: &(usize, usize)) -> bool {
        a.1 >= b.1
    }
}

// ----------------------------------------------------------------------------
// --- GRAPH COLORING ---------------------------------------------------------
// ----------------------------------------------------------------------------

/// Minimizes the number of colors of a proper coloring. The vertices are 
/// colored in their natural order and a new color is always the smallest 
/// unused one.
#[derive(Debug, Clone)]
pub struct Coloring {
    pub nb_vertices: usize,
    pub neighbors: Vec<Vec<usize>>,
}
impl Coloring {
    pub fn new(nb_vertices: usize, edges: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![vec![]; nb_vertices];
        for &(a, b) in edges {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        Coloring { nb_vertices, neighbors }
    }
    /// Returns true iff no two adjacent vertices share a color
    pub fn is_proper(&self, colors: &[Label]) -> bool {
        colors.len() == self.nb_vertices &&
        (0..self.nb_vertices).all(|v| self.neighbors[v].iter().all(|&w| colors[v] != colors[w]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColoringState {
    /// The next vertex to color
    pub vertex: usize,
    /// The number of colors used so far
    pub colors: usize,
    /// The colors that can no longer be given to each of the vertices
    pub forbidden: Vec<GrowableSet>,
}

impl Model for Coloring {
    type State = ColoringState;

    fn sense(&self) -> Sense {
        Sense::Minimize
    }
    fn initial_state(&self) -> ColoringState {
        ColoringState { vertex: 0, colors: 0, forbidden: vec![GrowableSet::new(); self.nb_vertices] }
    }
    fn target(&self) -> ColoringState {
        ColoringState { vertex: self.nb_vertices, colors: 0, forbidden: vec![] }
    }
    fn is_sink(&self, state: &ColoringState) -> bool {
        state.vertex >= self.nb_vertices
    }
    fn label_domain(&self, state: &ColoringState, _: CompilationType) -> GrowableSet {
        let candidates = GrowableSet::from_range(0..state.colors + 1);
        &candidates - &state.forbidden[state.vertex]
    }
    fn transition(&self, state: &ColoringState, color: Label) -> Option<ColoringState> {
        let v = state.vertex;
        if color > state.colors || state.forbidden[v].contains(color) {
            return None;
        }
        let mut forbidden = state.forbidden.clone();
        forbidden[v].clear();
        for &w in self.neighbors[v].iter().filter(|&&w| w > v) {
            forbidden[w].insert(color);
        }
        Some(ColoringState { vertex: v + 1, colors: state.colors.max(color + 1), forbidden })
    }
    fn cost(&self, state: &ColoringState, color: Label) -> isize {
        if color == state.colors { 1 } else { 0 }
    }
    /// Only the states having used the same number of colors are merged: 
    /// the merged state forbids what both of them forbid.
    fn merge(&self, a: &ColoringState, b: &ColoringState) -> Option<ColoringState> {
        if a.vertex != b.vertex || a.colors != b.colors {
            return None;
        }
        let forbidden = a.forbidden.iter().zip(b.forbidden.iter()).map(|(x, y)| x & y).collect();
        Some(ColoringState { vertex: a.vertex, colors: a.colors, forbidden })
    }
}

// ----------------------------------------------------------------------------
// --- MAXIMUM WEIGHTED INDEPENDENT SET ---------------------------------------
// ----------------------------------------------------------------------------

/// Maximum weighted independent set. A state is the index of the next vertex
/// to decide upon along with the set of vertices that can still be taken.
#[derive(Debug, Clone)]
pub struct Misp {
    pub weight: Vec<isize>,
    pub neighbors: Vec<GrowableSet>,
}
impl Misp {
    pub fn new(weight: Vec<isize>, edges: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![GrowableSet::new(); weight.len()];
        for &(a, b) in edges {
            neighbors[a].insert(b);
            neighbors[b].insert(a);
        }
        Misp { weight, neighbors }
    }
    /// Returns true iff the selected vertices (label 1) are pairwise independent
    pub fn is_independent(&self, solution: &[Label]) -> bool {
        let taken: GrowableSet = solution.iter().enumerate().filter(|(_, l)| **l == 1).map(|(v, _)| v).collect();
        taken.iter().all(|v| self.neighbors[v].intersect(&taken).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MispState {
    pub vertex: usize,
    pub free: GrowableSet,
}

impl Model for Misp {
    type State = MispState;

    fn sense(&self) -> Sense {
        Sense::Maximize
    }
    fn initial_state(&self) -> MispState {
        MispState { vertex: 0, free: GrowableSet::from_range(0..self.weight.len()) }
    }
    fn target(&self) -> MispState {
        MispState { vertex: self.weight.len(), free: GrowableSet::new() }
    }
    fn is_sink(&self, state: &MispState) -> bool {
        state.vertex >= self.weight.len()
    }
    fn label_domain(&self, state: &MispState, _: CompilationType) -> GrowableSet {
        if state.free.contains(state.vertex) {
            GrowableSet::from_range(0..2)
        } else {
            GrowableSet::from_range(0..1)
        }
    }
    fn transition(&self, state: &MispState, label: Label) -> Option<MispState> {
        let v = state.vertex;
        let mut free = state.free.clone();
        if label == 1 {
            if !free.contains(v) {
                return None;
            }
            free.difference_with(&self.neighbors[v]);
        }
        free.remove(v);
        Some(MispState { vertex: v + 1, free })
    }
    fn cost(&self, state: &MispState, label: Label) -> isize {
        self.weight[state.vertex] * label as isize
    }
    fn merge(&self, a: &MispState, b: &MispState) -> Option<MispState> {
        if a.vertex == b.vertex {
            Some(MispState { vertex: a.vertex, free: a.free.union(&b.free) })
        } else {
            None
        }
    }
    fn local_bound(&self, state: &MispState, _: CompilationType) -> Option<isize> {
        Some(state.free.iter().map(|v| self.weight[v]).sum())
    }
}

/// With the same vertex to decide upon, the state that can still take more
/// vertices wins
pub struct MispDominance;
impl Dominance for MispDominance {
    type State = MispState;
    type Key = usize;

    fn get_key(&self, state: &MispState) -> Option<usize> {
        Some(state.vertex)
    }
    fn dominates(&self, a: &MispState, b: &MispState) -> bool {
        b.free.is_subset(&a.free)
    }
}
