//! hookfsm: an embeddable finite state machine
//!
//! A machine is a [`Context`] holding named states and named events
//! between them. Driving the machine means emitting events by name; each
//! emit runs a fixed sequence of optional lifecycle hooks around the state
//! change.
//!
//! # Core Concepts
//!
//! - **State**: a named node with optional enter/leave hooks
//! - **Event**: a named edge between two states with optional before/after hooks
//! - **Context**: current state, owned states and events, context-wide hooks
//! - **Dispatch**: `emit` resolves the event leaving the current state and
//!   runs the hook sequence
//!
//! Everything is synchronous and single-threaded: hooks run inline on the
//! caller's thread, and a context must be externally serialized if shared.
//!
//! # Example
//!
//! ```rust
//! use hookfsm::{Context, Event, State};
//!
//! let mut ctx = Context::new(State::new("green"), ());
//! let green = ctx.current_id();
//! let yellow = ctx.add_state(State::new("yellow")).unwrap();
//! let red = ctx.add_state(State::new("red")).unwrap();
//!
//! ctx.add_event(Event::new("warn", green, yellow)).unwrap();
//! ctx.add_event(Event::new("stop", yellow, red)).unwrap();
//!
//! ctx.emit("warn").unwrap();
//! assert!(ctx.is("yellow"));
//! assert!(ctx.can("stop"));
//! assert!(ctx.emit("warn").is_err());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod export;
pub mod machine;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, EventBuilder, MachineBuilder};
pub use config::{DuplicatePolicy, MachineConfig};
pub use crate::core::{Event, EventId, History, State, StateId, TransitionRecord};
pub use machine::{Context, FsmError};
pub use registry::Registry;
