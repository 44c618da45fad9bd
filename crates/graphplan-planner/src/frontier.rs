//! Search nodes and the open list shared by both search drivers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use graphplan_core::State;

use crate::heuristic::Estimate;

/// Parent-pointer history of the actions taken to reach a node.
///
/// Siblings share their common prefix; nothing is copied on expansion.
#[derive(Debug)]
struct Trail {
    /// Index into the problem's action list.
    action: usize,
    parent: Option<Rc<Trail>>,
}

/// Node in the A* search tree.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    /// State (or regressed goal description) at this node.
    pub state: Rc<State>,
    /// g(n): actions taken from the anchor.
    pub g: usize,
    /// h(n): heuristic estimate.
    pub h: Estimate,
    /// f(n) = g(n) + h(n).
    pub f: Estimate,
    trail: Option<Rc<Trail>>,
    /// Insertion sequence, breaks ties between equal `f`.
    seq: u64,
}

impl SearchNode {
    /// Action indices from the anchor to this node, in the order taken.
    pub fn actions_taken(&self) -> Vec<usize> {
        let mut taken = Vec::with_capacity(self.g);
        let mut link = self.trail.as_deref();
        while let Some(trail) = link {
            taken.push(trail.action);
            link = trail.parent.as_deref();
        }
        taken.reverse();
        taken
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lower f first, then older nodes first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open list ordered by ascending `f`, FIFO among equal `f`.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<SearchNode>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the anchor node.
    pub fn push_root(&mut self, state: State, h: Estimate) {
        let node = SearchNode {
            state: Rc::new(state),
            g: 0,
            h,
            f: h,
            trail: None,
            seq: self.bump(),
        };
        self.heap.push(node);
    }

    /// Queue a successor of `parent` reached through `action`.
    pub fn push_child(&mut self, parent: &SearchNode, state: State, action: usize, h: Estimate) {
        let g = parent.g + 1;
        let node = SearchNode {
            state: Rc::new(state),
            g,
            h,
            f: h + g,
            trail: Some(Rc::new(Trail {
                action,
                parent: parent.trail.clone(),
            })),
            seq: self.bump(),
        };
        self.heap.push(node);
    }

    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphplan_core::Proposition;

    fn state(name: &str) -> State {
        State::from([Proposition::new(name, "")])
    }

    #[test]
    fn test_pops_lowest_f_first() {
        let mut frontier = Frontier::new();
        frontier.push_root(state("far"), Estimate::Finite(5));
        frontier.push_root(state("near"), Estimate::Finite(1));
        frontier.push_root(state("lost"), Estimate::Unbounded);

        assert_eq!(*frontier.pop().unwrap().state, state("near"));
        assert_eq!(*frontier.pop().unwrap().state, state("far"));
        assert_eq!(*frontier.pop().unwrap().state, state("lost"));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut frontier = Frontier::new();
        for name in ["first", "second", "third"] {
            frontier.push_root(state(name), Estimate::Finite(2));
        }

        assert_eq!(*frontier.pop().unwrap().state, state("first"));
        assert_eq!(*frontier.pop().unwrap().state, state("second"));
        assert_eq!(*frontier.pop().unwrap().state, state("third"));
    }

    #[test]
    fn test_child_costs_and_trail() {
        let mut frontier = Frontier::new();
        frontier.push_root(state("root"), Estimate::Finite(3));
        let root = frontier.pop().unwrap();

        frontier.push_child(&root, state("a"), 4, Estimate::Finite(2));
        let a = frontier.pop().unwrap();
        assert_eq!(a.g, 1);
        assert_eq!(a.f, Estimate::Finite(3));

        frontier.push_child(&a, state("b"), 7, Estimate::Unbounded);
        frontier.push_child(&a, state("c"), 1, Estimate::Finite(0));
        let c = frontier.pop().unwrap();
        let b = frontier.pop().unwrap();

        assert_eq!(c.actions_taken(), vec![4, 1]);
        assert_eq!(b.actions_taken(), vec![4, 7]);
        assert_eq!(b.f, Estimate::Unbounded);
        assert!(root.actions_taken().is_empty());
        assert_eq!(frontier.len(), 0);
    }
}
