//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders that wire states and events
//! together by name, so a whole machine can be declared in one expression.

pub mod error;
pub mod event;
pub mod machine;

pub use error::BuildError;
pub use event::EventBuilder;
pub use machine::MachineBuilder;

/// Create an event builder from its name and endpoint state names.
///
/// # Example
///
/// ```
/// use hookfsm::builder::{event, MachineBuilder};
/// use hookfsm::core::State;
///
/// let mut ctx = MachineBuilder::<()>::new()
///     .initial(State::new("green"))
///     .state(State::new("yellow"))
///     .event(event("warn", "green", "yellow"))
///     .build()
///     .unwrap();
///
/// ctx.emit("warn").unwrap();
/// assert_eq!(ctx.current(), "yellow");
/// ```
pub fn event<T>(name: &str, from: &str, to: &str) -> EventBuilder<T> {
    EventBuilder::new().name(name).from(from).to(to)
}
