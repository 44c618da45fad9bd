//! STRIPS actions with optional conditional effects.
//!
//! An [`Action`] is a read-only operator: [`Action::apply`] computes the
//! successor of a state and [`Action::regression`] computes a predecessor of
//! a (partial) state. Neither touches the action or the input state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};
use crate::proposition::Proposition;
use crate::state::State;

/// A conditional effect: when `condition` holds as the variant fires, `effect` and
/// `delete` replace the action's unconditional add/delete pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub condition: Proposition,
    #[serde(default)]
    pub effect: State,
    #[serde(default)]
    pub delete: State,
}

impl Variant {
    pub fn new(
        condition: Proposition,
        effect: impl IntoIterator<Item = Proposition>,
        delete: impl IntoIterator<Item = Proposition>,
    ) -> Self {
        Self {
            condition,
            effect: effect.into_iter().collect(),
            delete: delete.into_iter().collect(),
        }
    }
}

/// A grounded STRIPS operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Name reported in plans. Unique within a problem.
    pub name: String,

    /// Propositions that must all hold for the action to fire.
    #[serde(default)]
    pub preconditions: State,

    /// Propositions removed on firing.
    #[serde(default)]
    pub delete: State,

    /// Propositions added on firing.
    #[serde(default)]
    pub effect: State,

    /// Conditional effects, in application order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Action {
    /// Create a plain STRIPS action (no conditional effects).
    pub fn new(
        name: impl Into<String>,
        preconditions: impl IntoIterator<Item = Proposition>,
        delete: impl IntoIterator<Item = Proposition>,
        effect: impl IntoIterator<Item = Proposition>,
    ) -> Self {
        Self {
            name: name.into(),
            preconditions: preconditions.into_iter().collect(),
            delete: delete.into_iter().collect(),
            effect: effect.into_iter().collect(),
            variants: Vec::new(),
        }
    }

    /// Create a new ActionBuilder.
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    /// Attach conditional effects.
    pub fn with_variants(mut self, variants: impl IntoIterator<Item = Variant>) -> Self {
        self.variants = variants.into_iter().collect();
        self
    }

    /// Returns true if every precondition holds in `state`.
    pub fn is_applicable(&self, state: &State) -> bool {
        self.preconditions.is_subset(state)
    }

    /// Forward transition.
    ///
    /// Returns a fresh state. When the preconditions do not hold the result
    /// is an unchanged copy of `state`; callers detect that no-op by
    /// comparing the two states.
    ///
    /// Variants fire in order against the state being built, so a variant
    /// sees what earlier variants added or removed. Each one applies either
    /// its own delete/add pair, when its condition holds, or the
    /// unconditional pair.
    pub fn apply(&self, state: &State) -> State {
        let mut next = state.clone();
        if !self.is_applicable(state) {
            return next;
        }

        if self.variants.is_empty() {
            next.remove_all(&self.delete);
            next.insert_all(&self.effect);
            return next;
        }

        for variant in &self.variants {
            if !self.is_applicable(&next) {
                continue;
            }
            let (delete, effect) = if next.contains(&variant.condition) {
                (&variant.delete, &variant.effect)
            } else {
                (&self.delete, &self.effect)
            };
            next.remove_all(delete);
            next.insert_all(effect);
        }
        next
    }

    /// Backward transition.
    ///
    /// Given a (partial) state assumed to hold after this action fired,
    /// returns a predecessor such that `self.apply(&predecessor)` is a
    /// superset of `state`, or `None` if the action cannot have produced it.
    ///
    /// With variants the conditional branch is tried first, assuming every
    /// condition held. That branch is rejected if `state` still holds a
    /// proposition some variant deletes, or misses one some variant adds.
    /// The predecessor is `(state - each variant effect) + preconditions +
    /// each condition`. The unconditional pair never fires on this branch,
    /// so the unconditional effect is not required in `state`.
    ///
    /// Otherwise, and for plain actions, the unconditional pair must explain
    /// `state`: none of `delete` may be left in it and all of `effect` must
    /// be. The predecessor is `(state - effect) + preconditions`, and must
    /// hold none of the variant conditions.
    ///
    /// Delete propositions are never added to the predecessor; one is only
    /// required before firing if it is also a precondition.
    pub fn regression(&self, state: &State) -> Option<State> {
        self.regress_conditional(state)
            .or_else(|| self.regress_unconditional(state))
    }

    /// Regression through the conditional branch of every variant.
    fn regress_conditional(&self, state: &State) -> Option<State> {
        if self.variants.is_empty() {
            return None;
        }
        let consistent = self
            .variants
            .iter()
            .all(|v| !v.delete.intersects(state) && v.effect.is_subset(state));
        if !consistent {
            return None;
        }

        let mut predecessor = state.clone();
        for variant in &self.variants {
            predecessor.remove_all(&variant.effect);
        }
        predecessor.extend(self.variants.iter().map(|v| v.condition.clone()));
        predecessor.insert_all(&self.preconditions);
        Some(predecessor)
    }

    /// Regression through the unconditional delete/add pair.
    fn regress_unconditional(&self, state: &State) -> Option<State> {
        if self.delete.intersects(state) || !self.effect.is_subset(state) {
            return None;
        }

        let mut predecessor = state.difference(&self.effect);
        predecessor.insert_all(&self.preconditions);

        // Conditions are false before firing on this branch.
        if self
            .variants
            .iter()
            .any(|v| predecessor.contains(&v.condition))
        {
            return None;
        }
        Some(predecessor)
    }

    /// Validate the action definition.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanningError::InvalidAction {
                action: self.name.clone(),
                message: "Action name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Builder for creating Actions with a fluent API.
#[derive(Debug, Default)]
pub struct ActionBuilder {
    name: String,
    preconditions: State,
    delete: State,
    effect: State,
    variants: Vec<Variant>,
}

impl ActionBuilder {
    /// Create a new ActionBuilder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a precondition.
    pub fn precondition(mut self, proposition: Proposition) -> Self {
        self.preconditions.insert(proposition);
        self
    }

    /// Add a proposition removed on firing.
    pub fn delete(mut self, proposition: Proposition) -> Self {
        self.delete.insert(proposition);
        self
    }

    /// Add a proposition added on firing.
    pub fn effect(mut self, proposition: Proposition) -> Self {
        self.effect.insert(proposition);
        self
    }

    /// Add a conditional effect.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Add a conditional effect from its parts.
    pub fn when(
        self,
        condition: Proposition,
        effect: impl IntoIterator<Item = Proposition>,
        delete: impl IntoIterator<Item = Proposition>,
    ) -> Self {
        self.variant(Variant::new(condition, effect, delete))
    }

    /// Build the Action.
    pub fn build(self) -> Result<Action> {
        let action = Action {
            name: self.name,
            preconditions: self.preconditions,
            delete: self.delete,
            effect: self.effect,
            variants: self.variants,
        };
        action.validate()?;
        Ok(action)
    }
}
