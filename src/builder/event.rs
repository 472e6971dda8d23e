//! Builder for events that refer to states by name.

use crate::builder::error::BuildError;
use crate::core::{Event, EventHook, StateId};
use crate::machine::Context;
use serde_json::Value;

/// Builder for constructing events with a fluent API.
///
/// Endpoints are given by state name and resolved against a context when
/// the event is built, using the same newest-first lookup as
/// [`Context::find_state`].
pub struct EventBuilder<T> {
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
    before: Option<EventHook<T>>,
    after: Option<EventHook<T>>,
    data: Option<Value>,
}

impl<T> EventBuilder<T> {
    /// Create a new event builder.
    pub fn new() -> Self {
        Self {
            name: None,
            from: None,
            to: None,
            before: None,
            after: None,
            data: None,
        }
    }

    /// Set the event name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the source state by name (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state by name (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Add a before hook (optional).
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Add an after hook (optional).
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    /// Attach opaque user data (optional).
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Build the event, resolving its endpoints in `ctx`.
    pub fn build(self, ctx: &Context<T>) -> Result<Event<T>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingEventName)?;
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        let from = resolve(ctx, &name, &from)?;
        let to = resolve(ctx, &name, &to)?;

        let mut event = Event::new(name, from, to).with_hooks(self.before, self.after);
        if let Some(data) = self.data {
            event = event.with_data(data);
        }
        Ok(event)
    }
}

impl<T> Default for EventBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve<T>(ctx: &Context<T>, event: &str, state: &str) -> Result<StateId, BuildError> {
    ctx.find_state(state).ok_or_else(|| BuildError::UnknownState {
        event: event.to_string(),
        state: state.to_string(),
    })
}
