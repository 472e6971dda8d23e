//! Build errors for machine and event builders.

use crate::machine::FsmError;
use thiserror::Error;

/// Errors that can occur when building machines and events.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Event name not specified. Call .name(name)")]
    MissingEventName,

    #[error("Event source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Event target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Event '{event}' refers to unknown state '{state}'")]
    UnknownState { event: String, state: String },

    #[error(transparent)]
    Registry(#[from] FsmError),
}
