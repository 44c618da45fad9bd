//! Grounded literals.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// An atomic, possibly negated fact about the world, e.g. `At(home)`.
///
/// Identity is purely structural: two propositions are the same fact iff
/// name, argument and polarity all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Proposition {
    /// Predicate name.
    pub name: String,

    /// Grounded argument (may be empty for nullary predicates).
    #[serde(default)]
    pub argument: String,

    /// True for the negated literal `¬name(argument)`.
    #[serde(default)]
    pub negated: bool,
}

impl Proposition {
    /// Create a positive literal.
    pub fn new(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::with_polarity(name, argument, false)
    }

    /// Create a negated literal.
    pub fn negative(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::with_polarity(name, argument, true)
    }

    /// Create a literal with an explicit polarity.
    pub fn with_polarity(
        name: impl Into<String>,
        argument: impl Into<String>,
        negated: bool,
    ) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
            negated,
        }
    }

    /// Returns the complementary literal. `self` is left untouched.
    pub fn complement(&self) -> Self {
        Self {
            name: self.name.clone(),
            argument: self.argument.clone(),
            negated: !self.negated,
        }
    }

    /// Returns true if `other` is this literal with the opposite polarity.
    pub fn is_complement_of(&self, other: &Proposition) -> bool {
        self.negated != other.negated && self.name == other.name && self.argument == other.argument
    }
}

impl Not for Proposition {
    type Output = Proposition;

    fn not(mut self) -> Self::Output {
        self.negated = !self.negated;
        self
    }
}

impl Not for &Proposition {
    type Output = Proposition;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "¬{}({})", self.name, self.argument)
        } else {
            write!(f, "{}({})", self.name, self.argument)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Proposition::new("At", "home"), Proposition::new("At", "home"));
        assert_ne!(Proposition::new("At", "home"), Proposition::new("At", "work"));
        assert_ne!(Proposition::new("At", "home"), Proposition::negative("At", "home"));
    }

    #[test]
    fn test_complement() {
        let p = Proposition::new("At", "home");
        let q = p.complement();

        assert!(q.negated);
        assert!(!p.negated);
        assert!(p.is_complement_of(&q));
        assert_eq!(q.complement(), p);
        assert_eq!(!&p, q);
        assert_eq!(!q, p);
    }

    #[test]
    fn test_display() {
        assert_eq!(Proposition::new("At", "home").to_string(), "At(home)");
        assert_eq!(Proposition::negative("At", "home").to_string(), "¬At(home)");
        assert_eq!(Proposition::new("HandEmpty", "").to_string(), "HandEmpty()");
    }

    #[test]
    fn test_deserialize_defaults() {
        let p: Proposition = serde_json::from_str(r#"{"name": "Clear"}"#).unwrap();
        assert_eq!(p, Proposition::new("Clear", ""));
    }
}
