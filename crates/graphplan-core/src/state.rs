//! World states as sets of propositions.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::proposition::Proposition;

/// A set of propositions assumed true; anything absent is assumed false.
///
/// Backed by an ordered set, so a state never holds duplicates, equality is
/// set-equality and the rendering is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(BTreeSet<Proposition>);

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, proposition: &Proposition) -> bool {
        self.0.contains(proposition)
    }

    /// Returns true if every proposition of `self` is in `other`.
    pub fn is_subset(&self, other: &State) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Returns true if every proposition of `other` is in `self`.
    pub fn is_superset(&self, other: &State) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Returns true if any proposition of `self` is in `other`.
    pub fn intersects(&self, other: &State) -> bool {
        // Iterate the smaller side.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|p| large.contains(p))
    }

    /// Returns true if no proposition appears together with its complement.
    pub fn is_consistent(&self) -> bool {
        self.iter()
            .filter(|p| !p.negated)
            .all(|p| !self.contains(&p.complement()))
    }

    /// Insert a proposition, returning false if it was already present.
    pub fn insert(&mut self, proposition: Proposition) -> bool {
        self.0.insert(proposition)
    }

    /// Remove a proposition, returning false if it was absent.
    pub fn remove(&mut self, proposition: &Proposition) -> bool {
        self.0.remove(proposition)
    }

    /// Removes every proposition of `other` from `self`.
    pub fn remove_all(&mut self, other: &State) {
        for proposition in other.iter() {
            self.0.remove(proposition);
        }
    }

    /// Adds every proposition of `other` to `self`.
    pub fn insert_all(&mut self, other: &State) {
        self.0.extend(other.iter().cloned());
    }

    /// Returns a new state holding the propositions of both states.
    pub fn union(&self, other: &State) -> State {
        State(self.0.union(&other.0).cloned().collect())
    }

    /// Returns a new state holding the propositions of `self` not in `other`.
    pub fn difference(&self, other: &State) -> State {
        State(self.0.difference(&other.0).cloned().collect())
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Proposition> {
        self.0.iter()
    }
}

impl FromIterator<Proposition> for State {
    fn from_iter<I: IntoIterator<Item = Proposition>>(iter: I) -> Self {
        State(iter.into_iter().collect())
    }
}

impl Extend<Proposition> for State {
    fn extend<I: IntoIterator<Item = Proposition>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<const N: usize> From<[Proposition; N]> for State {
    fn from(propositions: [Proposition; N]) -> Self {
        propositions.into_iter().collect()
    }
}

impl From<Vec<Proposition>> for State {
    fn from(propositions: Vec<Proposition>) -> Self {
        propositions.into_iter().collect()
    }
}

impl IntoIterator for State {
    type Item = Proposition;
    type IntoIter = btree_set::IntoIter<Proposition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = &'a Proposition;
    type IntoIter = btree_set::Iter<'a, Proposition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, proposition) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", proposition)?;
        }
        write!(f, "}}")
    }
}
