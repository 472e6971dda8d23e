//! States: the named nodes of a machine.

use super::hooks::StateHook;
use crate::machine::Context;
use serde_json::Value;
use std::fmt;

/// A named state with optional enter and leave hooks.
///
/// States are moved into a context with
/// [`Context::add_state`](crate::machine::Context::add_state) and owned by
/// it from then on. Names are compared by exact, case-sensitive match.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::State;
///
/// let green: State<()> = State::new("green")
///     .on_enter(|_ctx, state| println!("entered {}", state.name()));
///
/// assert_eq!(green.name(), "green");
/// assert!(green.has_enter_hook());
/// assert!(!green.has_leave_hook());
/// ```
pub struct State<T> {
    name: String,
    enter: Option<StateHook<T>>,
    leave: Option<StateHook<T>>,
    data: Option<Value>,
}

impl<T> State<T> {
    /// Create a state without hooks or data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enter: None,
            leave: None,
            data: None,
        }
    }

    /// Set the hook fired after the machine enters this state.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.enter = Some(Box::new(hook));
        self
    }

    /// Set the hook fired before the machine leaves this state.
    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.leave = Some(Box::new(hook));
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

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut Value> {
        self.data.as_mut()
    }

    pub(crate) fn replace_data(&mut self, data: Value) -> Option<Value> {
        self.data.replace(data)
    }

    pub fn has_enter_hook(&self) -> bool {
        self.enter.is_some()
    }

    pub fn has_leave_hook(&self) -> bool {
        self.leave.is_some()
    }

    pub(crate) fn enter_hook(&self) -> Option<&StateHook<T>> {
        self.enter.as_ref()
    }

    pub(crate) fn leave_hook(&self) -> Option<&StateHook<T>> {
        self.leave.as_ref()
    }
}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .field("data", &self.data)
            .finish()
    }
}
