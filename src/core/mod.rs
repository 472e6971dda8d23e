//! Core machine types.
//!
//! This module contains the entities a machine is built from:
//! - States and events, each with optional lifecycle hooks
//! - Context-wide hooks
//! - Typed handles that tie events to the states they connect
//! - Bounded transition history

mod event;
mod history;
mod hooks;
mod id;
mod state;

pub use event::Event;
pub use history::{History, TransitionRecord};
pub use hooks::{EventHook, GlobalHooks, StateHook};
pub use id::{EventId, StateId};
pub use state::State;
