//! Error types for the GraphPlan engine.

use thiserror::Error;

/// Main error type for GraphPlan operations.
///
/// Search exhaustion is not an error: it is reported as an explicit
/// infeasible outcome by the planners. These variants cover malformed
/// input and configuration only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// An action definition is malformed.
    #[error("Invalid action '{action}': {message}")]
    InvalidAction { action: String, message: String },

    /// Two actions in one problem share a name, so plans would be ambiguous.
    #[error("Duplicate action name: {name}")]
    DuplicateAction { name: String },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlanningError {
    /// Returns the offending action name, if the error concerns one.
    pub fn action_name(&self) -> Option<&str> {
        match self {
            PlanningError::InvalidAction { action, .. } => Some(action),
            PlanningError::DuplicateAction { name } => Some(name),
            _ => None,
        }
    }
}

/// Convenience Result type for GraphPlan operations.
pub type Result<T> = std::result::Result<T, PlanningError>;

impl From<serde_json::Error> for PlanningError {
    fn from(err: serde_json::Error) -> Self {
        PlanningError::Config(err.to_string())
    }
}
