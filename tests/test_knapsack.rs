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

use std::{cell::RefCell, rc::Rc, sync::Arc, time::Duration};

use ddbb::*;
use proptest::prelude::*;

mod common;
use common::*;

fn small() -> Knapsack {
    Knapsack::new(5, &[(2, 3), (3, 4), (4, 5)])
}

fn medium() -> Knapsack {
    Knapsack::new(40, &[
        (12, 24), (7, 13), (11, 23), (8, 15), (9, 16), (6, 11),
        (14, 30), (5, 8), (10, 19), (13, 27), (4, 6), (3, 5),
    ])
}

fn root<T>(model: &dyn Model<State = T>) -> SubProblem<T> {
    SubProblem {
        state: Arc::new(model.initial_state()),
        value: model.initial_value(),
        path: vec![],
        bound: model.sense().unbounded(),
        depth: 0,
    }
}

fn compile(model: &Knapsack, comp_type: CompilationType, max_width: usize) -> (Completion, Mdd<(usize, usize)>) {
    let residual = root(model);
    let input = CompilationInput {
        comp_type,
        model,
        max_width,
        residual: &residual,
        best_known: None,
        tie_break: TieBreak::CreationOrder,
        cutset: CutsetType::LastExactLayer,
    };
    let mut mdd = Mdd::new();
    let completion = mdd.compile(&input);
    (completion, mdd)
}

fn solve(model: &Knapsack, config: SolverConfig) -> (Completion, Option<Solution>) {
    let mut solver = SequentialSolver::new(model, &NoCutoff, config);
    let completion = solver.solve();
    assert_eq!(solver.best_primal(), solver.best_dual());
    (completion, solver.best_solution())
}

#[test]
fn the_small_instance_is_solved_whatever_the_width() {
    let model = small();
    for width in 1..=4 {
        let (completion, solution) = solve(&model, config(width));
        assert_eq!(Completion { is_exact: true, best_value: Some(7) }, completion);
        assert_eq!(Some(vec![1, 1, 0]), solution);
    }
}

#[test]
fn an_exact_compilation_yields_the_brute_force_optimum() {
    let model = medium();
    let (completion, mdd) = compile(&model, CompilationType::Exact, usize::MAX);
    assert!(completion.is_exact);
    assert_eq!(brute_force(&model), completion.best_value);

    let root = mdd.root().unwrap();
    let sink = mdd.sink().unwrap();
    assert!(mdd.is_node_exact(root));
    assert!(mdd.is_node_exact(sink));
    let solution = mdd.best_solution().unwrap();
    assert_eq!(completion.best_value, evaluate(&model, &solution));
}

#[test]
fn restricted_and_relaxed_diagrams_bracket_the_optimum() {
    let model = medium();
    let optimum = brute_force(&model).unwrap();
    for width in [1, 2, 3, 5, 8] {
        let (restricted, _) = compile(&model, CompilationType::Restricted, width);
        let (relaxed, _) = compile(&model, CompilationType::Relaxed, width);
        let primal = restricted.best_value.unwrap();
        let dual = relaxed.best_value.unwrap();
        assert!(primal <= optimum, "width {width}: {primal} > {optimum}");
        assert!(optimum <= dual, "width {width}: {optimum} > {dual}");
    }
}

#[test]
fn the_restricted_best_path_is_a_genuine_solution() {
    let model = medium();
    let (completion, mdd) = compile(&model, CompilationType::Restricted, 2);
    let solution = mdd.best_exact_solution().unwrap();
    assert_eq!(completion.best_value, evaluate(&model, &solution));
}

#[test]
fn the_medium_instance_matches_brute_force() {
    let model = medium();
    let expected = brute_force(&model);
    for width in [1, 2, 5, 100] {
        let (completion, solution) = solve(&model, config(width));
        assert!(completion.is_exact);
        assert_eq!(expected, completion.best_value);
        assert_eq!(expected, evaluate(&model, &solution.unwrap()));
    }
}

#[test]
fn the_frontier_cutset_yields_the_same_optimum() {
    let model = medium();
    let config = SolverConfigBuilder::default()
        .max_width(2)
        .cutset(CutsetType::Frontier)
        .build()
        .unwrap();
    let (completion, _) = solve(&model, config);
    assert_eq!(brute_force(&model), completion.best_value);
}

#[test]
fn ranking_by_local_bound_yields_the_same_optimum() {
    let model = medium();
    let config = SolverConfigBuilder::default()
        .max_width(3)
        .tie_break(TieBreak::LocalBound)
        .build()
        .unwrap();
    let (completion, _) = solve(&model, config);
    assert_eq!(brute_force(&model), completion.best_value);
}

#[test]
fn dominance_does_not_change_the_optimum() {
    let model = medium();
    let checker = SimpleDominanceChecker::new(KnapsackDominance);
    let mut solver = SequentialSolver::custom(&model, checker, &NoCutoff, config(2));
    let completion = solver.solve();
    assert!(completion.is_exact);
    assert_eq!(brute_force(&model), completion.best_value);
    assert_eq!(0, solver.pending());
}

#[test]
fn observers_see_every_improvement_of_the_primal() {
    let model = medium();
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();

    let mut solver = SequentialSolver::new(&model, &NoCutoff, config(1));
    solver.on_solution(Box::new(move |path, value| sink.borrow_mut().push((path.to_vec(), value))));
    let completion = solver.solve();

    let seen = seen.borrow();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0].1 < w[1].1));
    let (path, value) = seen.last().unwrap();
    assert_eq!(completion.best_value, Some(*value));
    assert_eq!(Some(*value), evaluate(&model, path));
}

#[test]
fn a_zero_time_budget_stops_before_anything_is_explored() {
    let model = medium();
    let cutoff = TimeBudget::new(Duration::ZERO);
    let mut solver = SequentialSolver::new(&model, &cutoff, config(2));
    let completion = solver.solve();
    assert_eq!(Completion { is_exact: false, best_value: None }, completion);
    assert_eq!(0, solver.explored());
    assert_eq!(1.0, solver.gap());
}

#[test]
fn an_optimal_primal_that_was_set_beforehand_is_kept() {
    let model = small();
    let mut solver = SequentialSolver::new(&model, &NoCutoff, config(1));
    solver.set_primal(7, vec![1, 1, 0]);
    let completion = solver.solve();
    assert_eq!(Completion { is_exact: true, best_value: Some(7) }, completion);
    assert_eq!(Some(vec![1, 1, 0]), solver.best_solution());
    assert_eq!(0.0, solver.gap());
}

#[test]
fn an_initial_primal_value_prunes_everything_that_cannot_beat_it() {
    let model = small();
    let config = SolverConfigBuilder::default().max_width(1).initial_primal(7).build().unwrap();
    let mut solver = SequentialSolver::new(&model, &NoCutoff, config);
    let completion = solver.solve();
    assert_eq!(Completion { is_exact: true, best_value: None }, completion);
    assert_eq!(7, solver.best_primal());

    let config = SolverConfigBuilder::default().max_width(1).initial_primal(6).build().unwrap();
    let mut solver = SequentialSolver::new(&model, &NoCutoff, config);
    assert_eq!(Completion { is_exact: true, best_value: Some(7) }, solver.solve());
}

#[test]
fn the_search_can_be_traced() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    let (completion, _) = solve(&small(), config(1));
    assert_eq!(Some(7), completion.best_value);
}

proptest! {
    #[test]
    fn random_instances_are_solved_to_optimality(
        items in prop::collection::vec((1_usize..10, 1_isize..20), 1..9),
        capacity in 0_usize..30,
        width in 1_usize..4,
    ) {
        let model = Knapsack::new(capacity, &items);
        let mut solver = SequentialSolver::new(&model, &NoCutoff, config(width));
        let completion = solver.solve();

        prop_assert!(completion.is_exact);
        prop_assert_eq!(brute_force(&model), completion.best_value);
        prop_assert_eq!(completion.best_value, evaluate(&model, &solver.best_solution().unwrap()));
        prop_assert_eq!(solver.best_primal(), solver.best_dual());
    }
}
