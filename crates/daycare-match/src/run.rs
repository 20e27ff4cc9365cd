//! Matching entry point that hides the model wiring.

use daycare_match_config::{ConfigError, MatchConfig};
use daycare_match_core::{MatchError, MatchingContext, MatchingInput};
use daycare_match_model::{
    MatchOutcome, MatchingModelBuilder, ModelSettings, SolveParams, SolverService,
};
use daycare_match_solver::BranchAndBoundSolver;
use thiserror::Error;
use tracing::info;

/// Why a matching run could not produce an outcome.
///
/// Infeasible or timed-out solves are not errors; they yield an outcome
/// with every child unmatched.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Derives the context, builds the model, solves it with `solver` and reads
/// the assignment back.
///
/// The configuration is validated before any input is processed. With the
/// `console` feature enabled the console output is initialized first.
pub fn run_matching<S>(
    input: &MatchingInput,
    config: &MatchConfig,
    solver: &S,
) -> Result<MatchOutcome, RunError>
where
    S: SolverService + ?Sized,
{
    #[cfg(feature = "console")]
    daycare_match_console::init();

    let settings = ModelSettings::from_config(config)?;
    let ctx = MatchingContext::from_input(input)?;
    let built = MatchingModelBuilder::new(&ctx, settings).build()?;

    let params = SolveParams {
        time_limit: config.time_limit(),
        worker_count: config.worker_count,
    };
    info!(
        event = "solve_start",
        time_limit_secs = params.time_limit.as_secs(),
        worker_count = params.worker_count,
    );

    let response = solver.solve(built.model(), &params);
    let outcome = built.read_back(&ctx, &response)?;

    info!(
        event = "solve_end",
        status = %outcome.status,
        objective = outcome.objective.unwrap_or(0),
        matched = outcome.matched_count(),
        blocking = outcome.blocking,
        duration_ms = outcome.wall_time.as_millis() as u64,
    );
    Ok(outcome)
}

/// [`run_matching`] with the bundled [`BranchAndBoundSolver`].
pub fn solve(input: &MatchingInput, config: &MatchConfig) -> Result<MatchOutcome, RunError> {
    run_matching(input, config, &BranchAndBoundSolver::new())
}
