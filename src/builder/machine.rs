//! Builder for constructing whole machines.

use crate::builder::error::BuildError;
use crate::builder::event::EventBuilder;
use crate::config::MachineConfig;
use crate::core::{Event, EventHook, GlobalHooks, State, StateHook};
use crate::machine::Context;

/// Builder for constructing contexts with a fluent API.
///
/// States are registered in the order given, the initial state first.
/// Events are registered after all states, so they may refer to any state
/// by name.
pub struct MachineBuilder<T> {
    initial: Option<State<T>>,
    states: Vec<State<T>>,
    events: Vec<EventBuilder<T>>,
    hooks: GlobalHooks<T>,
    config: MachineConfig,
}

impl<T> MachineBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            events: Vec::new(),
            hooks: GlobalHooks::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: State<T>) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a state.
    pub fn state(mut self, state: State<T>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<State<T>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add an event.
    pub fn event(mut self, event: EventBuilder<T>) -> Self {
        self.events.push(event);
        self
    }

    /// Add multiple events at once.
    pub fn events(mut self, events: Vec<EventBuilder<T>>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn before_event<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.hooks.before_event = Some(Box::new(hook) as EventHook<T>);
        self
    }

    pub fn leave_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.hooks.leave_state = Some(Box::new(hook) as StateHook<T>);
        self
    }

    pub fn enter_state<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &State<T>) + Send + Sync + 'static,
    {
        self.hooks.enter_state = Some(Box::new(hook) as StateHook<T>);
        self
    }

    pub fn after_event<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context<T>, &Event<T>) + Send + Sync + 'static,
    {
        self.hooks.after_event = Some(Box::new(hook) as EventHook<T>);
        self
    }

    /// Build the context with `data` as its user data.
    pub fn build_with(self, data: T) -> Result<Context<T>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut ctx = Context::with_config(initial, data, self.config);
        for state in self.states {
            ctx.add_state(state)?;
        }
        for builder in self.events {
            let event = builder.build(&ctx)?;
            ctx.add_event(event)?;
        }
        ctx.hooks = self.hooks;

        Ok(ctx)
    }
}

impl<T: Default> MachineBuilder<T> {
    /// Build the context with default user data.
    pub fn build(self) -> Result<Context<T>, BuildError> {
        self.build_with(T::default())
    }
}

impl<T> Default for MachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
