//! Registry and dispatch errors.

use thiserror::Error;

/// Errors returned by registry mutation and event dispatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    /// A handle was issued by another context, or refers to nothing
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// No event with this name leaves the current state
    #[error("Cannot emit event '{event}' at current state '{state}'")]
    InvalidTransition { event: String, state: String },

    /// The entity is not registered in this context
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("State '{name}' is already registered")]
    DuplicateState { name: String },

    #[error("Event '{name}' already leaves state '{from}'")]
    DuplicateEvent { name: String, from: String },
}

impl FsmError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
