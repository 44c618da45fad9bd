//! Forward (state-space) A* search with a planning-graph heuristic.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

use graphplan_core::{Problem, State};
use tracing::{debug, info, trace};

use crate::frontier::Frontier;
use crate::heuristic::forward_estimate;
use crate::planner::{
    Plan, Planner, PlannerConfig, PlanningResult, SearchDirection, SearchOutcome, SearchStats,
};

/// Fast-Forward style planner searching from the initial state.
///
/// Every generated state is scored by building a fresh planning graph from it
/// toward the goal.
#[derive(Debug, Clone, Default)]
pub struct ForwardPlanner {
    config: PlannerConfig,
}

impl ForwardPlanner {
    /// Create a new forward planner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new forward planner with custom configuration.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }
}

impl Planner for ForwardPlanner {
    fn plan(&self, problem: &Problem) -> PlanningResult {
        let start_time = Instant::now();
        let mut stats = SearchStats::default();

        info!(
            actions = problem.actions.len(),
            initial = problem.initial.len(),
            goal = problem.goal.len(),
            "Starting forward search"
        );

        let mut frontier = Frontier::new();
        let mut closed: HashSet<Rc<State>> = HashSet::new();

        let h = forward_estimate(&problem.initial, &problem.goal, &problem.actions);
        if h.is_unbounded() && self.config.discard_unreachable {
            debug!("Goal unreachable from the initial state even ignoring deletes");
            stats.pruned_unreachable += 1;
        } else {
            frontier.push_root(problem.initial.clone(), h);
            stats.generated += 1;
        }

        while let Some(current) = frontier.pop() {
            if problem.goal.is_subset(&current.state) {
                let plan = Plan::new(
                    current
                        .actions_taken()
                        .into_iter()
                        .map(|index| problem.actions[index].name.clone())
                        .collect(),
                );
                stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
                info!(
                    steps = plan.len(),
                    expanded = stats.expanded,
                    elapsed_ms = stats.elapsed_ms,
                    "Forward search found plan"
                );
                return PlanningResult {
                    outcome: SearchOutcome::Found(plan),
                    stats,
                };
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
                "Expanding"
            );

            for (index, action) in problem.actions.iter().enumerate() {
                let next = action.apply(&current.state);

                if next == *current.state {
                    stats.pruned_noop += 1;
                    continue;
                }
                if self.config.use_closed_set && closed.contains(&next) {
                    stats.closed_hits += 1;
                    continue;
                }

                let h = forward_estimate(&next, &problem.goal, &problem.actions);
                if h.is_unbounded() && self.config.discard_unreachable {
                    debug!(action = %action.name, "Skipping successor with unreachable goal");
                    stats.pruned_unreachable += 1;
                    continue;
                }

                frontier.push_child(&current, next, index, h);
                stats.generated += 1;
            }
        }

        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            expanded = stats.expanded,
            elapsed_ms = stats.elapsed_ms,
            "Forward search exhausted the frontier without reaching the goal"
        );
        PlanningResult {
            outcome: SearchOutcome::Infeasible,
            stats,
        }
    }

    fn direction(&self) -> SearchDirection {
        SearchDirection::Forward
    }

    fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }
}
