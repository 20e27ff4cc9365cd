//! Tests for the branch-and-bound search.

use std::time::Duration;

use daycare_match_model::LinearExpr;

use super::*;

fn params() -> SolveParams {
    SolveParams {
        time_limit: Duration::from_secs(10),
        worker_count: 1,
    }
}

#[test]
fn test_picks_best_of_exclusive_options() {
    let mut model = BoolModel::new();
    let vars: Vec<_> = (0..4).map(|i| model.new_bool_var(format!("x{i}"))).collect();
    model.add_le(LinearExpr::sum(vars.iter().copied()), 2);
    model.add_le(LinearExpr::sum([vars[0], vars[3]]), 1);
    model.maximize(
        LinearExpr::new()
            .term(vars[0], 5)
            .term(vars[1], 1)
            .term(vars[2], 2)
            .term(vars[3], 4),
    );

    let response = BranchAndBoundSolver::new().solve(&model, &params());
    assert_eq!(response.status, SolveStatus::Optimal);
    assert_eq!(response.objective, Some(7));
    assert_eq!(response.values(), Some(&[true, false, true, false][..]));
}

#[test]
fn test_reports_infeasible_model() {
    let mut model = BoolModel::new();
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    model.add_eq(LinearExpr::sum([a, b]), 1);
    model.add_eq(LinearExpr::from(a), 1).only_enforce_if(!b);
    model.add_eq(LinearExpr::from(a), 1).only_enforce_if(b);
    model.add_eq(LinearExpr::from(b), 1).only_enforce_if(a);

    let response = BranchAndBoundSolver::new().solve(&model, &params());
    assert_eq!(response.status, SolveStatus::Infeasible);
    assert_eq!(response.values(), None);
    assert_eq!(response.value(a), None);
}

#[test]
fn test_empty_model_is_trivially_optimal() {
    let model = BoolModel::new();
    let response = BranchAndBoundSolver::new().solve(&model, &params());
    assert_eq!(response.status, SolveStatus::Optimal);
    assert_eq!(response.objective, Some(0));
}

#[test]
fn test_expired_limit_without_solution_is_unknown() {
    let mut model = BoolModel::new();
    let a = model.new_bool_var("a");
    model.maximize(LinearExpr::from(a));

    let params = SolveParams {
        time_limit: Duration::ZERO,
        worker_count: 1,
    };
    let response = BranchAndBoundSolver::new()
        .with_check_interval(1)
        .solve(&model, &params);
    assert_eq!(response.status, SolveStatus::Unknown);
    assert!(!response.status.has_solution());
    assert_eq!(response.objective, None);
}

#[test]
fn test_stats_track_search() {
    let mut model = BoolModel::new();
    let vars: Vec<_> = (0..3).map(|i| model.new_bool_var(format!("x{i}"))).collect();
    model.add_le(LinearExpr::sum(vars.iter().copied()), 1);
    model.maximize(LinearExpr::sum(vars.iter().copied()));

    let (response, stats) = BranchAndBoundSolver::new().solve_with_stats(&model, &params());
    assert_eq!(response.status, SolveStatus::Optimal);
    assert_eq!(response.objective, Some(1));
    assert_eq!(stats.solutions, 1);
    assert_eq!(stats.nodes, 5);
    assert_eq!(stats.pruned, 2);
    assert_eq!(stats.propagations, 3);
}

#[test]
fn test_solution_satisfies_model() {
    let mut model = BoolModel::new();
    let vars: Vec<_> = (0..6).map(|i| model.new_bool_var(format!("x{i}"))).collect();
    for pair in vars.chunks(2) {
        model.add_le(LinearExpr::sum(pair.iter().copied()), 1);
    }
    model.add_ge(LinearExpr::sum([vars[1], vars[3]]), 2);
    model.add_eq(LinearExpr::from(vars[4]), 0).only_enforce_if(vars[3]);
    model.maximize(LinearExpr::sum(vars.iter().copied()));

    let response = BranchAndBoundSolver::new().solve(&model, &params());
    let values = response.values().unwrap();
    assert!(model.is_feasible(values));
    assert_eq!(response.objective, Some(3));
}
