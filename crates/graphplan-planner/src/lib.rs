//! # GraphPlan Planner
//!
//! Relaxed planning-graph heuristics and A* search over grounded STRIPS
//! problems, in two directions:
//! - [`ForwardPlanner`] - state-space search from the initial state
//! - [`BackwardPlanner`] - regression search from the goal

pub mod backward;
pub mod forward;
mod frontier;
pub mod graph;
pub mod heuristic;
pub mod planner;

pub use backward::BackwardPlanner;
pub use forward::ForwardPlanner;
pub use graph::PlanningGraph;
pub use heuristic::{backward_estimate, forward_estimate, Estimate};
pub use planner::{
    Plan, Planner, PlannerConfig, PlanningResult, RegressionGoalTest, SearchDirection,
    SearchOutcome, SearchStats,
};

use graphplan_core::{Action, Problem, Result, State};

/// Run a forward search with the default configuration.
///
/// Fails only on malformed input; an unsolvable problem yields
/// [`SearchOutcome::Infeasible`].
pub fn forward_search(initial: State, goal: State, actions: Vec<Action>) -> Result<SearchOutcome> {
    let problem = Problem::new(initial, goal, actions)?;
    Ok(ForwardPlanner::new().plan(&problem).outcome)
}

/// Run a backward search with the default configuration.
///
/// The returned plan is in execution order.
pub fn backward_search(initial: State, goal: State, actions: Vec<Action>) -> Result<SearchOutcome> {
    let problem = Problem::new(initial, goal, actions)?;
    Ok(BackwardPlanner::new().plan(&problem).outcome)
}

/// Create a planner searching in `direction`.
pub fn planner_for(direction: SearchDirection, config: PlannerConfig) -> Box<dyn Planner> {
    match direction {
        SearchDirection::Forward => Box::new(ForwardPlanner::with_config(config)),
        SearchDirection::Backward => Box::new(BackwardPlanner::with_config(config)),
    }
}
