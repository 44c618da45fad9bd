//! Planning problems.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{PlanningError, Result};
use crate::state::State;

/// A grounded planning problem: where we start, what must hold at the end,
/// and which actions may be used.
///
/// The order of `actions` is the expansion order of the searches and so
/// decides ties between equally scored nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Initial world state.
    pub initial: State,

    /// Goal condition, interpreted as a subset requirement.
    pub goal: State,

    /// Available actions.
    pub actions: Vec<Action>,
}

impl Problem {
    /// Create a validated problem.
    pub fn new(initial: State, goal: State, actions: Vec<Action>) -> Result<Self> {
        let problem = Self {
            initial,
            goal,
            actions,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Check that every action is well formed and action names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.actions.len());
        for action in &self.actions {
            action.validate()?;
            if !seen.insert(action.name.as_str()) {
                return Err(PlanningError::DuplicateAction {
                    name: action.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns true if the initial state already satisfies the goal.
    pub fn is_trivial(&self) -> bool {
        self.goal.is_subset(&self.initial)
    }

    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }
}
