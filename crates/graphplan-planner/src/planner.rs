//! Planner trait, configuration and result types.

use std::fmt;

use graphplan_core::{Problem, Result};
use serde::{Deserialize, Serialize};

/// How the backward search decides that a regressed state has reached the
/// initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegressionGoalTest {
    /// Every proposition of the regressed state holds initially (default).
    #[default]
    Entailed,
    /// The regressed state is set-equal to the initial state.
    Exact,
}

/// Which way a planner searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    /// State-space search from the initial state.
    #[default]
    Forward,
    /// Regression search from the goal.
    Backward,
}

/// Configuration for the planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Drop nodes whose heuristic is unbounded instead of queueing them last.
    pub discard_unreachable: bool,

    /// Skip states that were already expanded.
    pub use_closed_set: bool,

    /// Termination test used by the backward search.
    pub regression_goal_test: RegressionGoalTest,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            discard_unreachable: true,
            use_closed_set: true,
            regression_goal_test: RegressionGoalTest::Entailed,
        }
    }
}

impl PlannerConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An executable plan: action names in the order they must be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    steps: Vec<String>,
}

impl Plan {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<empty plan>");
        }
        write!(f, "{}", self.steps.join(" -> "))
    }
}

/// Result of a search: a plan, or proof that the frontier ran dry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "plan", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A plan reaching the goal. May be empty if the goal already held.
    Found(Plan),
    /// The frontier was exhausted without reaching the goal.
    Infeasible,
}

impl SearchOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            SearchOutcome::Infeasible => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            SearchOutcome::Infeasible => None,
        }
    }
}

/// Counters collected during one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded.
    pub expanded: usize,

    /// Nodes pushed onto the frontier (the start node included).
    pub generated: usize,

    /// Successors equal to their parent.
    pub pruned_noop: usize,

    /// Regressions the action could not have produced.
    pub pruned_infeasible: usize,

    /// Successors dropped because their heuristic was unbounded.
    pub pruned_unreachable: usize,

    /// Successors or frontier entries whose state was already expanded.
    pub closed_hits: usize,

    /// Backward plans that failed to replay from the initial state.
    pub rejected_plans: usize,

    /// Wall-clock time spent planning in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a planning operation with additional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningResult {
    /// The search outcome.
    pub outcome: SearchOutcome,

    /// Search counters.
    pub stats: SearchStats,
}

/// Trait for planning engines.
pub trait Planner {
    /// Search for a plan solving `problem`.
    fn plan(&self, problem: &Problem) -> PlanningResult;

    /// Direction this planner searches in.
    fn direction(&self) -> SearchDirection;

    /// Get the planner configuration.
    fn config(&self) -> &PlannerConfig;

    /// Update the planner configuration.
    fn set_config(&mut self, config: PlannerConfig);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert!(config.discard_unreachable);
        assert!(config.use_closed_set);
        assert_eq!(config.regression_goal_test, RegressionGoalTest::Entailed);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config =
            PlannerConfig::from_json(r#"{"discard_unreachable": false, "regression_goal_test": "exact"}"#)
                .unwrap();

        assert!(!config.discard_unreachable);
        assert!(config.use_closed_set);
        assert_eq!(config.regression_goal_test, RegressionGoalTest::Exact);
    }

    #[test]
    fn test_config_from_invalid_json() {
        assert!(PlannerConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_plan_display() {
        let plan = Plan::new(vec!["Pick".to_string(), "Place".to_string()]);
        assert_eq!(plan.to_string(), "Pick -> Place");
        assert_eq!(Plan::default().to_string(), "<empty plan>");
    }

    #[test]
    fn test_outcome_accessors() {
        let found = SearchOutcome::Found(Plan::default());
        assert!(found.is_feasible());
        assert!(found.plan().unwrap().is_empty());
        assert!(!SearchOutcome::Infeasible.is_feasible());
        assert_eq!(SearchOutcome::Infeasible.into_plan(), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SearchOutcome::Found(Plan::new(vec!["Drive".into()]))).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["plan"][0], "Drive");

        let json = serde_json::to_value(SearchOutcome::Infeasible).unwrap();
        assert_eq!(json["status"], "infeasible");
    }
}
