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

use std::sync::Arc;

use ddbb::*;

mod common;
use common::*;

/// A triangle (0, 1, 2) sharing the vertices 0 and 2 with a 4-cycle
fn toy() -> Coloring {
    Coloring::new(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 0)])
}

fn solve(model: &Coloring, width: usize) -> (Completion, Solution) {
    let mut solver = SequentialSolver::new(model, &NoCutoff, config(width));
    let completion = solver.solve();
    assert!(completion.is_exact);
    assert_eq!(solver.best_primal(), solver.best_dual());
    (completion, solver.best_solution().unwrap())
}

#[test]
fn the_toy_graph_needs_three_colors_even_with_width_one() {
    let model = toy();
    let (completion, colors) = solve(&model, 1);
    assert_eq!(Some(3), completion.best_value);
    assert!(model.is_proper(&colors));
    assert_eq!(Some(3), evaluate(&model, &colors));
}

#[test]
fn the_toy_graph_needs_three_colors_whatever_the_width() {
    let model = toy();
    for width in 1..=6 {
        let (completion, colors) = solve(&model, width);
        assert_eq!(Some(3), completion.best_value);
        assert!(model.is_proper(&colors));
    }
}

#[test]
fn an_even_cycle_is_bipartite() {
    let model = Coloring::new(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
    let (completion, colors) = solve(&model, 2);
    assert_eq!(Some(2), completion.best_value);
    assert!(model.is_proper(&colors));
}

#[test]
fn an_odd_wheel_needs_four_colors() {
    // hub 0 connected to the 5-cycle 1..=5
    let model = Coloring::new(6, &[
        (0, 1), (0, 2), (0, 3), (0, 4), (0, 5),
        (1, 2), (2, 3), (3, 4), (4, 5), (5, 1),
    ]);
    assert_eq!(Some(4), brute_force(&model));
    let (completion, colors) = solve(&model, 1);
    assert_eq!(Some(4), completion.best_value);
    assert!(model.is_proper(&colors));
}

#[test]
fn a_graph_without_edges_needs_a_single_color() {
    let model = Coloring::new(4, &[]);
    let (completion, colors) = solve(&model, 1);
    assert_eq!(Some(1), completion.best_value);
    assert_eq!(vec![0, 0, 0, 0], colors);
}

#[test]
fn when_minimizing_the_relaxed_bound_is_below_the_restricted_one() {
    let model = Coloring::new(7, &[
        (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 0), (0, 3), (1, 5),
    ]);
    let optimum = brute_force(&model).unwrap();
    let residual = SubProblem {
        state: Arc::new(model.initial_state()),
        value: 0,
        path: vec![],
        bound: Sense::Minimize.unbounded(),
        depth: 0,
    };
    for width in 1..=3 {
        let mut mdd = Mdd::new();
        let mut input = CompilationInput {
            comp_type: CompilationType::Restricted,
            model: &model,
            max_width: width,
            residual: &residual,
            best_known: None,
            tie_break: TieBreak::CreationOrder,
            cutset: CutsetType::LastExactLayer,
        };
        let restricted = mdd.compile(&input).best_value.unwrap();
        input.comp_type = CompilationType::Relaxed;
        let relaxed = mdd.compile(&input).best_value.unwrap();
        assert!(relaxed <= optimum && optimum <= restricted);
    }
}

#[test]
fn the_frontier_cutset_yields_the_same_optimum() {
    let model = toy();
    let config = SolverConfigBuilder::default()
        .max_width(1)
        .cutset(CutsetType::Frontier)
        .build()
        .unwrap();
    let mut solver = SequentialSolver::new(&model, &NoCutoff, config);
    assert_eq!(Completion { is_exact: true, best_value: Some(3) }, solver.solve());
}
