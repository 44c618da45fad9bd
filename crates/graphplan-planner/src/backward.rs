//! Backward (regression) A* search.
//!
//! Starts from the goal and regresses it through actions until the regressed
//! description holds in the initial state. Nodes are scored against a single
//! planning graph built from the initial state.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

use graphplan_core::{Problem, State};
use tracing::{debug, info, trace};

use crate::frontier::Frontier;
use crate::graph::PlanningGraph;
use crate::heuristic::backward_estimate;
use crate::planner::{
    Plan, Planner, PlannerConfig, PlanningResult, RegressionGoalTest, SearchDirection,
    SearchOutcome, SearchStats,
};

/// Regression planner searching from the goal toward the initial state.
#[derive(Debug, Clone, Default)]
pub struct BackwardPlanner {
    config: PlannerConfig,
}

impl BackwardPlanner {
    /// Create a new backward planner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new backward planner with custom configuration.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    fn reaches_initial(&self, state: &State, initial: &State) -> bool {
        match self.config.regression_goal_test {
            RegressionGoalTest::Entailed => state.is_subset(initial),
            RegressionGoalTest::Exact => state == initial,
        }
    }
}

/// Replays the actions at `taken` from the initial state.
fn replays_to_goal(problem: &Problem, taken: &[usize]) -> bool {
    let mut state = problem.initial.clone();
    for &index in taken {
        let action = &problem.actions[index];
        if !action.is_applicable(&state) {
            return false;
        }
        state = action.apply(&state);
    }
    problem.goal.is_subset(&state)
}

impl Planner for BackwardPlanner {
    fn plan(&self, problem: &Problem) -> PlanningResult {
        let start_time = Instant::now();
        let mut stats = SearchStats::default();

        info!(
            actions = problem.actions.len(),
            initial = problem.initial.len(),
            goal = problem.goal.len(),
            "Starting backward search"
        );

        let mut graph = PlanningGraph::build(&problem.initial, &problem.goal, &problem.actions);
        if graph.is_empty() {
            debug!("Goal unreachable from the initial state even ignoring deletes");
        } else {
            // Regressed states may need propositions beyond the goal level.
            graph.saturate(&problem.actions);
            debug!(levels = graph.len(), "Built planning graph from initial state");
        }

        let mut frontier = Frontier::new();
        let mut closed: HashSet<Rc<State>> = HashSet::new();

        let h = backward_estimate(&problem.goal, &graph);
        if h.is_unbounded() && self.config.discard_unreachable {
            stats.pruned_unreachable += 1;
        } else {
            frontier.push_root(problem.goal.clone(), h);
            stats.generated += 1;
        }

        while let Some(current) = frontier.pop() {
            if self.reaches_initial(&current.state, &problem.initial) {
                // Actions were collected walking back from the goal.
                let mut taken = current.actions_taken();
                taken.reverse();

                if replays_to_goal(problem, &taken) {
                    let plan = Plan::new(
                        taken
                            .into_iter()
                            .map(|index| problem.actions[index].name.clone())
                            .collect(),
                    );
                    stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
                    info!(
                        steps = plan.len(),
                        expanded = stats.expanded,
                        elapsed_ms = stats.elapsed_ms,
                        "Backward search found plan"
                    );
                    return PlanningResult {
                        outcome: SearchOutcome::Found(plan),
                        stats,
                    };
                }

                // An initial fact switched a conditional effect to another branch.
                debug!(state = %current.state, "Regressed plan does not replay from the initial state");
                stats.rejected_plans += 1;
            }

            if self.config.use_closed_set {
                if closed.contains(&current.state) {
                    stats.closed_hits += 1;
                    continue;
                }
                closed.insert(Rc::clone(&current.state));
            }
            stats.expanded += 1;
            trace!(
                g = current.g,
                h = %current.h,
                open = frontier.len(),
                state = %current.state,
                "Regressing"
            );

            for (index, action) in problem.actions.iter().enumerate() {
                let Some(previous) = action.regression(&current.state) else {
                    stats.pruned_infeasible += 1;
                    continue;
                };

                if previous == *current.state {
                    stats.pruned_noop += 1;
                    continue;
                }
                if self.config.use_closed_set && closed.contains(&previous) {
                    stats.closed_hits += 1;
                    continue;
                }

                let h = backward_estimate(&previous, &graph);
                if h.is_unbounded() && self.config.discard_unreachable {
                    debug!(action = %action.name, "Skipping regression never reachable from the initial state");
                    stats.pruned_unreachable += 1;
                    continue;
                }

                frontier.push_child(&current, previous, index, h);
                stats.generated += 1;
            }
        }

        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            expanded = stats.expanded,
            elapsed_ms = stats.elapsed_ms,
            "Backward search exhausted the frontier without reaching the initial state"
        );
        PlanningResult {
            outcome: SearchOutcome::Infeasible,
            stats,
        }
    }

    fn direction(&self) -> SearchDirection {
        SearchDirection::Backward
    }

    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }
}
