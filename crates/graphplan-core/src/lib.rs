//! # GraphPlan Core
//!
//! Core primitives for the GraphPlan engine.
//!
//! This crate provides the fundamental building blocks:
//! - [`Proposition`] - Grounded, possibly negated literal
//! - [`State`] - Set of propositions assumed true
//! - [`Action`] - STRIPS operator with optional conditional effects
//! - [`Problem`] - Initial state, goal and action library
//! - [`PlanningError`] - Error types

pub mod action;
pub mod error;
pub mod problem;
pub mod proposition;
pub mod state;

// Re-exports for convenience
pub use action::{Action, ActionBuilder, Variant};
pub use error::{PlanningError, Result};
pub use problem::Problem;
pub use proposition::Proposition;
pub use state::State;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::action::{Action, ActionBuilder, Variant};
    pub use crate::error::{PlanningError, Result};
    pub use crate::problem::Problem;
    pub use crate::proposition::Proposition;
    pub use crate::state::State;
}
