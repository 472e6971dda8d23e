//! Lifecycle hook types.
//!
//! Hooks are plain closures invoked synchronously during dispatch. They see
//! the context read-only: a leave hook observes the old state as current,
//! an enter hook observes the new one.

use super::event::Event;
use super::state::State;
use crate::machine::Context;

/// Hook fired when a state is entered or left.
pub type StateHook<T> = Box<dyn Fn(&Context<T>, &State<T>) + Send + Sync>;

/// Hook fired before or after an event is emitted.
pub type EventHook<T> = Box<dyn Fn(&Context<T>, &Event<T>) + Send + Sync>;

/// Context-wide hooks, fired for every transition ahead of the
/// corresponding per-state or per-event hook.
pub struct GlobalHooks<T> {
    pub(crate) before_event: Option<EventHook<T>>,
    pub(crate) leave_state: Option<StateHook<T>>,
    pub(crate) enter_state: Option<StateHook<T>>,
    pub(crate) after_event: Option<EventHook<T>>,
}

impl<T> GlobalHooks<T> {
    pub fn new() -> Self {
        Self {
            before_event: None,
            leave_state: None,
            enter_state: None,
            after_event: None,
        }
    }

    /// True when no global hook is installed.
    pub fn is_empty(&self) -> bool {
        self.before_event.is_none()
            && self.leave_state.is_none()
            && self.enter_state.is_none()
            && self.after_event.is_none()
    }
}

impl<T> Default for GlobalHooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for GlobalHooks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalHooks")
            .field("before_event", &self.before_event.is_some())
            .field("leave_state", &self.leave_state.is_some())
            .field("enter_state", &self.enter_state.is_some())
            .field("after_event", &self.after_event.is_some())
            .finish()
    }
}
