//! The machine instance: current state, owned registry, global hooks.

use crate::config::MachineConfig;
use crate::core::{Event, EventId, GlobalHooks, History, State, StateId};
use crate::machine::FsmError;
use crate::registry::Registry;
use serde_json::Value;

/// One finite state machine.
///
/// A context owns its states and events, holds the four context-wide hooks
/// and the user data `T`, and tracks the current state. The current state
/// only ever changes inside [`Context::emit`]. Dropping the context
/// releases everything it owns.
///
/// A context is not synchronized. Confine it to one thread or wrap it in a
/// lock; hooks run on the caller's thread during `emit`.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{Event, State};
/// use hookfsm::machine::Context;
///
/// let mut ctx = Context::new(State::new("green"), ());
/// let green = ctx.current_id();
/// let yellow = ctx.add_state(State::new("yellow")).unwrap();
/// ctx.add_event(Event::new("warn", green, yellow)).unwrap();
///
/// assert!(ctx.can("warn"));
/// ctx.emit("warn").unwrap();
/// assert_eq!(ctx.current(), "yellow");
/// ```
pub struct Context<T = ()> {
    pub(crate) current: StateId,
    pub(crate) registry: Registry<T>,
    pub(crate) hooks: GlobalHooks<T>,
    pub(crate) history: History,
    config: MachineConfig,
    data: T,
}

impl<T> Context<T> {
    /// Create a context in `initial` with the default configuration.
    ///
    /// `initial` is registered as the first state of the context.
    pub fn new(initial: State<T>, data: T) -> Self {
        Self::with_config(initial, data, MachineConfig::default())
    }

    pub fn with_config(initial: State<T>, data: T, config: MachineConfig) -> Self {
        let mut registry = Registry::new(config.duplicates);
        let current = registry.push_state(initial);
        Self {
            current,
            registry,
            hooks: GlobalHooks::new(),
            history: History::with_limit(config.history_limit),
            config,
            data,
        }
    }

    pub fn add_state(&mut self, state: State<T>) -> Result<StateId, FsmError> {
        self.registry.add_state(state)
    }

    pub fn add_event(&mut self, event: Event<T>) -> Result<EventId, FsmError> {
        self.registry.add_event(event)
    }

    /// Unlink an event and return it. The caller may drop it or add it back.
    pub fn remove_event(&mut self, id: EventId) -> Result<Event<T>, FsmError> {
        self.registry.remove_event(id)
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.registry.find_state(name)
    }

    pub fn find_event(&self, name: &str, from: StateId, to: StateId) -> Option<EventId> {
        self.registry.find_event(name, from, to)
    }

    pub fn state(&self, id: StateId) -> Option<&State<T>> {
        self.registry.state(id)
    }

    pub fn state_data_mut(&mut self, id: StateId) -> Option<&mut Value> {
        self.registry.state_data_mut(id)
    }

    pub fn set_state_data(
        &mut self,
        id: StateId,
        data: Value,
    ) -> Result<Option<Value>, FsmError> {
        self.registry.set_state_data(id, data)
    }

    pub fn event(&self, id: EventId) -> Option<&Event<T>> {
        self.registry.event(id)
    }

    pub fn event_data_mut(&mut self, id: EventId) -> Option<&mut Value> {
        self.registry.event_data_mut(id)
    }

    pub fn set_event_data(
        &mut self,
        id: EventId,
        data: Value,
    ) -> Result<Option<Value>, FsmError> {
        self.registry.set_event_data(id, data)
    }

    /// Name of the current state.
    pub fn current(&self) -> &str {
        self.current_state().name()
    }

    pub fn current_id(&self) -> StateId {
        self.current
    }

    pub fn current_state(&self) -> &State<T> {
        self.registry.state_at(self.current)
    }

    /// True if the current state is named exactly `name`.
    pub fn is(&self, name: &str) -> bool {
        self.current() == name
    }

    /// True if an event named `event_name` leaves the current state.
    pub fn can(&self, event_name: &str) -> bool {
        self.registry.resolve(self.current, event_name).is_some()
    }

    pub fn cannot(&self, event_name: &str) -> bool {
        !self.can(event_name)
    }

    /// Names of the events that can fire from the current state, newest
    /// first, each listed once.
    pub fn available_events(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, event) in self.registry.events().rev() {
            if event.from() == self.current && !names.contains(&event.name()) {
                names.push(event.name());
            }
        }
        names
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State<T>)> {
        self.registry.states()
    }

    pub fn events(&self) -> impl Iterator<Item = (EventId, &Event<T>)> {
        self.registry.events()
    }

    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn hooks(&self) -> &GlobalHooks<T> {
        &self.hooks
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Tear the context down, keeping only its user data.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Hook fired first on every emitted event.
    pub fn on_before_event<F>(&mut self, hook: F)
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.hooks.before_event = Some(Box::new(hook));
    }

    /// Hook fired whenever any state is left, ahead of the state's own hook.
    pub fn on_leave_state<F>(&mut self, hook: F)
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.hooks.leave_state = Some(Box::new(hook));
    }

    /// Hook fired whenever any state is entered, ahead of the state's own hook.
    pub fn on_enter_state<F>(&mut self, hook: F)
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.hooks.enter_state = Some(Box::new(hook));
    }

    /// Hook fired once a transition has completed, ahead of the event's own
    /// after hook.
    pub fn on_after_event<F>(&mut self, hook: F)
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.hooks.after_event = Some(Box::new(hook));
    }

    pub fn clear_hooks(&mut self) {
        self.hooks = GlobalHooks::new();
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("current", &self.current())
            .field("registry", &self.registry)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .field("data", &self.data)
            .finish()
    }
}
