//! Event dispatch.
//!
//! Emitting an event runs a fixed sequence, each step only when its hook is
//! installed:
//!
//! 1. context before-event, then the event's before hook
//! 2. context leave-state, then the old state's leave hook
//! 3. commit: the event's target becomes the current state
//! 4. context enter-state, then the new state's enter hook
//! 5. context after-event, then the event's after hook
//!
//! Context-wide hooks always run ahead of the per-entity hook of the same
//! phase. Once the commit happens the transition is final.

use crate::core::{Event, StateId, TransitionRecord};
use crate::machine::{Context, FsmError};
use chrono::Utc;
use tracing::{debug, trace, warn};

impl<T> Context<T> {
    /// Emit `event_name` from the current state.
    ///
    /// Resolves the newest event with that name leaving the current state
    /// and runs the full hook sequence. Returns the new current state.
    ///
    /// Fails with [`FsmError::InvalidTransition`] when no such event exists;
    /// in that case nothing is mutated and no hook fires.
    pub fn emit(&mut self, event_name: &str) -> Result<StateId, FsmError> {
        let Some((event_id, event)) = self.registry.resolve(self.current, event_name) else {
            let state = self.current().to_string();
            warn!(
                event = event_name,
                state = %state,
                "cannot emit event at current state"
            );
            return Err(FsmError::InvalidTransition {
                event: event_name.to_string(),
                state,
            });
        };
        let (from, to) = (event.from(), event.to());

        self.leave_phase(event, from);

        // Commit. `event` borrows the registry only, so the cursor and
        // history can be written while it is held.
        self.current = to;
        let from_name = self.registry.state_at(from).name();
        let to_name = self.registry.state_at(to).name();
        debug!(
            event = event.name(),
            from = from_name,
            to = to_name,
            %event_id,
            "transition committed"
        );
        if self.history.limit() > 0 {
            self.history.push(TransitionRecord {
                event: event.name().to_string(),
                from: from_name.to_string(),
                to: to_name.to_string(),
                timestamp: Utc::now(),
            });
        }

        self.enter_phase(event, to);

        Ok(to)
    }

    fn leave_phase(&self, event: &Event<T>, from: StateId) {
        let state = self.registry.state_at(from);

        if let Some(hook) = &self.hooks.before_event {
            trace!(event = event.name(), "context before-event hook");
            hook(self, event);
        }
        if let Some(hook) = event.before_hook() {
            trace!(event = event.name(), "event before hook");
            hook(self, event);
        }
        if let Some(hook) = &self.hooks.leave_state {
            trace!(state = state.name(), "context leave-state hook");
            hook(self, state);
        }
        if let Some(hook) = state.leave_hook() {
            trace!(state = state.name(), "state leave hook");
            hook(self, state);
        }
    }

    fn enter_phase(&self, event: &Event<T>, to: StateId) {
        let state = self.registry.state_at(to);

        if let Some(hook) = &self.hooks.enter_state {
            trace!(state = state.name(), "context enter-state hook");
            hook(self, state);
        }
        if let Some(hook) = state.enter_hook() {
            trace!(state = state.name(), "state enter hook");
            hook(self, state);
        }
        if let Some(hook) = &self.hooks.after_event {
            trace!(event = event.name(), "context after-event hook");
            hook(self, event);
        }
        if let Some(hook) = event.after_hook() {
            trace!(event = event.name(), "event after hook");
            hook(self, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};
    use crate::machine::{Context, FsmError};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn push(log: &Log, entry: impl Into<String>) {
        log.lock().unwrap().push(entry.into());
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn emit_moves_to_target_state() {
        let mut ctx = Context::new(State::new("idle"), ());
        let idle = ctx.current_id();
        let busy = ctx.add_state(State::new("busy")).unwrap();
        ctx.add_event(Event::new("start", idle, busy)).unwrap();

        assert_eq!(ctx.emit("start"), Ok(busy));
        assert_eq!(ctx.current(), "busy");
    }

    #[test]
    fn emit_unknown_event_is_invalid_transition() {
        let mut ctx: Context<()> = Context::new(State::new("idle"), ());
        let err = ctx.emit("start").unwrap_err();
        assert_eq!(
            err,
            FsmError::InvalidTransition {
                event: "start".to_string(),
                state: "idle".to_string()
            }
        );
        assert_eq!(ctx.current(), "idle");
    }

    #[test]
    fn hooks_fire_in_fixed_order() {
        let log: Log = Arc::default();

        let (l1, l2) = (log.clone(), log.clone());
        let mut ctx = Context::new(
            State::new("idle").on_leave(move |_, s| push(&l1, format!("leave {}", s.name()))),
            (),
        );
        let idle = ctx.current_id();
        let busy = ctx
            .add_state(
                State::new("busy").on_enter(move |_, s| push(&l2, format!("enter {}", s.name()))),
            )
            .unwrap();

        let (l3, l4) = (log.clone(), log.clone());
        ctx.add_event(
            Event::new("start", idle, busy)
                .on_before(move |_, e| push(&l3, format!("before {}", e.name())))
                .on_after(move |_, e| push(&l4, format!("after {}", e.name()))),
        )
        .unwrap();

        let (g1, g2, g3, g4) = (log.clone(), log.clone(), log.clone(), log.clone());
        ctx.on_before_event(move |_, e| push(&g1, format!("any before {}", e.name())));
        ctx.on_leave_state(move |_, s| push(&g2, format!("any leave {}", s.name())));
        ctx.on_enter_state(move |_, s| push(&g3, format!("any enter {}", s.name())));
        ctx.on_after_event(move |_, e| push(&g4, format!("any after {}", e.name())));

        ctx.emit("start").unwrap();

        assert_eq!(
            entries(&log),
            vec![
                "any before start",
                "before start",
                "any leave idle",
                "leave idle",
                "any enter busy",
                "enter busy",
                "any after start",
                "after start",
            ]
        );
    }

    #[test]
    fn leave_sees_old_state_and_enter_sees_new_state() {
        let log: Log = Arc::default();
        let (l1, l2) = (log.clone(), log.clone());

        let mut ctx = Context::new(
            State::new("idle").on_leave(move |ctx, _| push(&l1, ctx.current())),
            (),
        );
        let idle = ctx.current_id();
        let busy = ctx
            .add_state(State::new("busy").on_enter(move |ctx, _| push(&l2, ctx.current())))
            .unwrap();
        ctx.add_event(Event::new("start", idle, busy)).unwrap();

        ctx.emit("start").unwrap();
        assert_eq!(entries(&log), vec!["idle", "busy"]);
    }

    #[test]
    fn rejected_emit_fires_no_hooks() {
        let log: Log = Arc::default();
        let mut ctx: Context<()> = Context::new(State::new("idle"), ());
        let l1 = log.clone();
        ctx.on_before_event(move |_, _| push(&l1, "before"));

        assert!(ctx.emit("start").is_err());
        assert!(entries(&log).is_empty());
        assert!(ctx.history().is_empty());
    }

    #[test]
    fn self_transition_leaves_and_reenters() {
        let log: Log = Arc::default();
        let (l1, l2) = (log.clone(), log.clone());
        let mut ctx = Context::new(
            State::new("idle")
                .on_leave(move |_, _| push(&l1, "leave"))
                .on_enter(move |_, _| push(&l2, "enter")),
            (),
        );
        let idle = ctx.current_id();
        ctx.add_event(Event::new("tick", idle, idle)).unwrap();

        ctx.emit("tick").unwrap();
        assert_eq!(entries(&log), vec!["leave", "enter"]);
        assert!(ctx.is("idle"));
    }

    #[test]
    fn committed_transitions_are_recorded() {
        let mut ctx = Context::new(State::new("idle"), ());
        let idle = ctx.current_id();
        let busy = ctx.add_state(State::new("busy")).unwrap();
        ctx.add_event(Event::new("start", idle, busy)).unwrap();
        ctx.add_event(Event::new("finish", busy, idle)).unwrap();

        ctx.emit("start").unwrap();
        ctx.emit("finish").unwrap();

        assert_eq!(ctx.history().path(), vec!["idle", "busy", "idle"]);
        let last = ctx.history().last().unwrap();
        assert_eq!(last.event, "finish");
    }

    #[test]
    fn after_hooks_fire_on_every_successful_emit() {
        let log: Log = Arc::default();
        let mut ctx = Context::new(State::new("idle"), ());
        let idle = ctx.current_id();
        let busy = ctx.add_state(State::new("busy")).unwrap();
        let (l1, l2) = (log.clone(), log.clone());
        ctx.add_event(Event::new("start", idle, busy).on_after(move |_, e| push(&l1, e.name())))
            .unwrap();
        ctx.add_event(Event::new("finish", busy, idle).on_after(move |_, e| push(&l2, e.name())))
            .unwrap();

        for _ in 0..3 {
            ctx.emit("start").unwrap();
            ctx.emit("finish").unwrap();
        }

        assert_eq!(entries(&log).len(), 6);
        assert_eq!(entries(&log)[..2], ["start", "finish"]);
    }

    #[test]
    fn hooks_can_read_user_data() {
        let log: Log = Arc::default();
        let l1 = log.clone();
        let mut ctx = Context::new(State::new("idle"), "light-7".to_string());
        let idle = ctx.current_id();
        let busy = ctx
            .add_state(State::new("busy").on_enter(move |ctx: &Context<String>, _| {
                push(&l1, ctx.data().clone())
            }))
            .unwrap();
        ctx.add_event(Event::new("start", idle, busy)).unwrap();

        ctx.emit("start").unwrap();
        assert_eq!(entries(&log), vec!["light-7"]);
    }
}
