//! Relaxed planning graphs.
//!
//! A planning graph is a sequence of proposition levels. Level 0 is the
//! anchor state and level `k + 1` holds level `k` plus everything any action
//! can add to it. Delete effects are ignored, so levels only ever grow.

use graphplan_core::{Action, State};
use tracing::trace;

/// Leveled, delete-relaxed reachability structure.
///
/// An empty graph means the goal it was built toward cannot be reached even
/// when delete effects are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanningGraph {
    levels: Vec<State>,
}

impl PlanningGraph {
    /// Expand from `anchor` until every goal proposition is present in one
    /// level, or until a level adds nothing new (returns an empty graph).
    ///
    /// If the anchor already satisfies the goal the graph is just `[anchor]`.
    pub fn build(anchor: &State, goal: &State, actions: &[Action]) -> Self {
        let mut levels = vec![anchor.clone()];
        if goal.is_subset(anchor) {
            return Self { levels };
        }

        let mut current = anchor.clone();
        loop {
            let next = expand(&current, actions);
            let grew = next.len() > current.len();
            let reached = goal.is_subset(&next);

            levels.push(next.clone());
            if reached {
                trace!(levels = levels.len(), "planning graph reached goal");
                return Self { levels };
            }
            if !grew {
                trace!(levels = levels.len(), "planning graph levelled off below goal");
                return Self::default();
            }
            current = next;
        }
    }

    /// Keep expanding a built graph until it stops growing.
    ///
    /// Lookups past the goal level then find propositions the goal did not
    /// need. An empty graph stays empty.
    pub fn saturate(&mut self, actions: &[Action]) {
        let Some(mut current) = self.levels.last().cloned() else {
            return;
        };
        loop {
            let next = expand(&current, actions);
            if next.len() == current.len() {
                return;
            }
            self.levels.push(next.clone());
            current = next;
        }
    }

    pub fn levels(&self) -> &[State] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&State> {
        self.levels.get(index)
    }

    /// Number of levels, the anchor included.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the last level, or `None` for an empty graph.
    pub fn depth(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    /// First level in which every proposition of `state` is present.
    pub fn first_level_containing(&self, state: &State) -> Option<usize> {
        self.levels.iter().position(|level| state.is_subset(level))
    }
}

/// One relaxed step: the union of `level` with every action applied to it.
fn expand(level: &State, actions: &[Action]) -> State {
    let mut next = level.clone();
    for action in actions.iter().filter(|a| a.is_applicable(level)) {
        next.insert_all(&action.apply(level));
    }
    next
}
