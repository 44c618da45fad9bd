//! Planning-graph heuristics.

use std::fmt;
use std::ops::Add;

use graphplan_core::{Action, State};
use serde::{Deserialize, Serialize};

use crate::graph::PlanningGraph;

/// A heuristic value. `Unbounded` sorts after every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimate {
    Finite(usize),
    Unbounded,
}

impl Estimate {
    pub fn is_finite(&self) -> bool {
        matches!(self, Estimate::Finite(_))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Estimate::Unbounded)
    }

    pub fn value(&self) -> Option<usize> {
        match self {
            Estimate::Finite(value) => Some(*value),
            Estimate::Unbounded => None,
        }
    }
}

impl From<Option<usize>> for Estimate {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Estimate::Unbounded, Estimate::Finite)
    }
}

impl Add<usize> for Estimate {
    type Output = Estimate;

    fn add(self, rhs: usize) -> Self::Output {
        match self {
            Estimate::Finite(value) => value
                .checked_add(rhs)
                .map_or(Estimate::Unbounded, Estimate::Finite),
            Estimate::Unbounded => Estimate::Unbounded,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Finite(value) => write!(f, "{}", value),
            Estimate::Unbounded => write!(f, "∞"),
        }
    }
}

/// Goal distance from `state`: the index of the last level of a planning
/// graph built from `state` toward `goal`.
///
/// Builds a fresh graph on every call.
pub fn forward_estimate(state: &State, goal: &State, actions: &[Action]) -> Estimate {
    PlanningGraph::build(state, goal, actions).depth().into()
}

/// First level of `graph` in which all of `state` co-occurs.
///
/// `Unbounded` if no level holds every proposition, including when the graph
/// is empty or `state` mentions propositions the graph never produces.
pub fn backward_estimate(state: &State, graph: &PlanningGraph) -> Estimate {
    graph.first_level_containing(state).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphplan_core::Proposition;

    fn p(name: &str) -> Proposition {
        Proposition::new(name, "")
    }

    fn chain() -> Vec<Action> {
        vec![
            Action::new("AtoB", [p("a")], [p("a")], [p("b")]),
            Action::new("BtoC", [p("b")], [p("b")], [p("c")]),
        ]
    }

    #[test]
    fn test_estimate_ordering() {
        assert!(Estimate::Finite(0) < Estimate::Finite(1));
        assert!(Estimate::Finite(usize::MAX) < Estimate::Unbounded);
    }

    #[test]
    fn test_estimate_add() {
        assert_eq!(Estimate::Finite(2) + 3, Estimate::Finite(5));
        assert_eq!(Estimate::Unbounded + 3, Estimate::Unbounded);
        assert_eq!(Estimate::Finite(usize::MAX) + 1, Estimate::Unbounded);
    }

    #[test]
    fn test_estimate_display() {
        assert_eq!(Estimate::Finite(4).to_string(), "4");
        assert_eq!(Estimate::Unbounded.to_string(), "∞");
    }

    #[test]
    fn test_forward_estimate() {
        let goal = State::from([p("c")]);

        assert_eq!(forward_estimate(&State::from([p("a")]), &goal, &chain()), Estimate::Finite(2));
        assert_eq!(forward_estimate(&State::from([p("b")]), &goal, &chain()), Estimate::Finite(1));
        assert_eq!(forward_estimate(&State::from([p("c")]), &goal, &chain()), Estimate::Finite(0));
        assert_eq!(forward_estimate(&State::new(), &goal, &chain()), Estimate::Unbounded);
    }

    #[test]
    fn test_backward_estimate() {
        let graph = PlanningGraph::build(&State::from([p("a")]), &State::from([p("c")]), &chain());

        assert_eq!(backward_estimate(&State::from([p("a")]), &graph), Estimate::Finite(0));
        assert_eq!(backward_estimate(&State::from([p("b")]), &graph), Estimate::Finite(1));
        assert_eq!(backward_estimate(&State::from([p("a"), p("c")]), &graph), Estimate::Finite(2));
        assert_eq!(backward_estimate(&State::from([p("x")]), &graph), Estimate::Unbounded);
    }

    #[test]
    fn test_backward_estimate_empty_graph() {
        let graph = PlanningGraph::default();
        assert_eq!(backward_estimate(&State::new(), &graph), Estimate::Unbounded);
    }
}
