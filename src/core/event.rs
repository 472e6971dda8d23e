//! Events: the named, directed edges between states.

use super::hooks::EventHook;
use super::id::StateId;
use crate::machine::Context;
use serde_json::Value;
use std::fmt;

/// A named transition from one state to another.
///
/// `from` and `to` are handles into the context that will own the event;
/// [`Context::add_event`](crate::machine::Context::add_event) rejects
/// handles issued by any other context.
pub struct Event<T> {
    name: String,
    from: StateId,
    to: StateId,
    before: Option<EventHook<T>>,
    after: Option<EventHook<T>>,
    data: Option<Value>,
}

impl<T> Event<T> {
    /// Create an event without hooks or data.
    pub fn new(name: impl Into<String>, from: StateId, to: StateId) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            before: None,
            after: None,
            data: None,
        }
    }

    /// Set the hook fired before the transition leaves `from`.
    pub fn on_before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Set the hook fired once the machine has entered `to`.
    pub fn on_after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    /// Attach opaque user data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> StateId {
        self.from
    }

    pub fn to(&self) -> StateId {
        self.to
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut Value> {
        self.data.as_mut()
    }

    pub(crate) fn replace_data(&mut self, data: Value) -> Option<Value> {
        self.data.replace(data)
    }

    pub fn has_before_hook(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after_hook(&self) -> bool {
        self.after.is_some()
    }

    pub(crate) fn with_hooks(
        mut self,
        before: Option<EventHook<T>>,
        after: Option<EventHook<T>>,
    ) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// True if this event is named `name` and leaves `from`.
    pub(crate) fn fires_from(&self, from: StateId, name: &str) -> bool {
        self.from == from && self.name == name
    }

    pub(crate) fn before_hook(&self) -> Option<&EventHook<T>> {
        self.before.as_ref()
    }

    pub(crate) fn after_hook(&self) -> Option<&EventHook<T>> {
        self.after.as_ref()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("data", &self.data)
            .finish()
    }
}
