//! Owning collections of states and events.
//!
//! The registry is an arena: adding an entity moves it in and hands back a
//! typed handle. States are never removed, so a [`StateId`] stays valid for
//! the life of the registry. Removing an event vacates its slot for the
//! next [`Registry::add_event`] and bumps the slot generation, so the old
//! [`EventId`] stops resolving while the other handles keep working.
//!
//! Registered entities are only reachable through shared references.
//! Names and endpoints are fixed once an entity is in; the data payload is
//! the one part that can change, through the `*_data` accessors.
//!
//! Every name-based lookup scans newest first. When duplicates are allowed,
//! the most recently added match wins.

use crate::config::DuplicatePolicy;
use crate::core::{Event, EventId, State, StateId};
use crate::machine::FsmError;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

struct Slot<T> {
    generation: u32,
    event: Option<Event<T>>,
}

/// Arena of the states and events belonging to one context.
pub struct Registry<T> {
    id: Uuid,
    duplicates: DuplicatePolicy,
    states: Vec<State<T>>,
    slots: Vec<Slot<T>>,
    vacant: Vec<usize>,
    // Occupied slot indices, oldest registration first
    order: Vec<usize>,
}

impl<T> Registry<T> {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            duplicates,
            states: Vec::new(),
            slots: Vec::new(),
            vacant: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Take ownership of `state`.
    ///
    /// Fails with [`FsmError::DuplicateState`] only under
    /// [`DuplicatePolicy::Reject`].
    pub fn add_state(&mut self, state: State<T>) -> Result<StateId, FsmError> {
        if self.duplicates == DuplicatePolicy::Reject && self.find_state(state.name()).is_some() {
            return Err(FsmError::DuplicateState {
                name: state.name().to_string(),
            });
        }
        Ok(self.push_state(state))
    }

    pub(crate) fn push_state(&mut self, state: State<T>) -> StateId {
        let id = StateId::new(self.id, self.states.len());
        debug!(state = state.name(), %id, "state registered");
        self.states.push(state);
        id
    }

    /// Take ownership of `event`.
    ///
    /// Both endpoints must be states of this registry, otherwise the call
    /// fails with [`FsmError::InvalidArgument`].
    pub fn add_event(&mut self, event: Event<T>) -> Result<EventId, FsmError> {
        self.check_state(event.from())?;
        self.check_state(event.to())?;

        if self.duplicates == DuplicatePolicy::Reject
            && self.resolve(event.from(), event.name()).is_some()
        {
            return Err(FsmError::DuplicateEvent {
                name: event.name().to_string(),
                from: self.state_at(event.from()).name().to_string(),
            });
        }

        let index = match self.vacant.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    event: None,
                });
                self.slots.len() - 1
            }
        };
        let id = EventId::new(self.id, index, self.slots[index].generation);
        debug!(
            event = event.name(),
            from = self.state_at(event.from()).name(),
            to = self.state_at(event.to()).name(),
            %id,
            "event registered"
        );
        self.slots[index].event = Some(event);
        self.order.push(index);
        Ok(id)
    }

    /// Unlink `id` and hand the event back to the caller.
    pub fn remove_event(&mut self, id: EventId) -> Result<Event<T>, FsmError> {
        let event = self
            .slot_mut(id)
            .and_then(|slot| {
                let event = slot.event.take()?;
                slot.generation = slot.generation.wrapping_add(1);
                Some(event)
            })
            .ok_or_else(|| FsmError::not_found(id.to_string()))?;
        self.order.retain(|&index| index != id.index);
        self.vacant.push(id.index);
        debug!(event = event.name(), %id, "event removed");
        Ok(event)
    }

    /// Newest state named exactly `name`.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .rposition(|s| s.name() == name)
            .map(|index| StateId::new(self.id, index))
    }

    /// Newest event matching the whole `(name, from, to)` triple.
    pub fn find_event(&self, name: &str, from: StateId, to: StateId) -> Option<EventId> {
        self.live_events()
            .rev()
            .find(|(_, e)| e.name() == name && e.from() == from && e.to() == to)
            .map(|(id, _)| id)
    }

    /// Newest event named `name` that leaves `from`.
    ///
    /// This is the dispatch lookup: the cursor advances on every
    /// iteration, match or not.
    pub fn resolve(&self, from: StateId, name: &str) -> Option<(EventId, &Event<T>)> {
        self.live_events().rev().find(|(_, e)| e.fires_from(from, name))
    }

    pub fn state(&self, id: StateId) -> Option<&State<T>> {
        if id.owner != self.id {
            return None;
        }
        self.states.get(id.index)
    }

    pub fn event(&self, id: EventId) -> Option<&Event<T>> {
        if id.owner != self.id {
            return None;
        }
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.event.as_ref())
    }

    /// Mutable access to a state's data payload, if it carries one.
    pub fn state_data_mut(&mut self, id: StateId) -> Option<&mut Value> {
        if id.owner != self.id {
            return None;
        }
        self.states.get_mut(id.index).and_then(State::data_mut)
    }

    /// Replace a state's data payload, returning the previous one.
    pub fn set_state_data(
        &mut self,
        id: StateId,
        data: Value,
    ) -> Result<Option<Value>, FsmError> {
        self.check_state(id)?;
        Ok(self.states[id.index].replace_data(data))
    }

    /// Mutable access to an event's data payload, if it carries one.
    pub fn event_data_mut(&mut self, id: EventId) -> Option<&mut Value> {
        self.slot_mut(id)
            .and_then(|slot| slot.event.as_mut())
            .and_then(Event::data_mut)
    }

    /// Replace an event's data payload, returning the previous one.
    pub fn set_event_data(
        &mut self,
        id: EventId,
        data: Value,
    ) -> Result<Option<Value>, FsmError> {
        self.slot_mut(id)
            .and_then(|slot| slot.event.as_mut())
            .map(|event| event.replace_data(data))
            .ok_or_else(|| FsmError::not_found(id.to_string()))
    }

    /// States in registration order.
    pub fn states(&self) -> impl DoubleEndedIterator<Item = (StateId, &State<T>)> {
        let owner = self.id;
        self.states
            .iter()
            .enumerate()
            .map(move |(index, s)| (StateId::new(owner, index), s))
    }

    /// Registered events in registration order, skipping removed ones.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = (EventId, &Event<T>)> {
        self.live_events()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn event_count(&self) -> usize {
        self.order.len()
    }

    /// Number of event slots allocated, occupied or vacant.
    pub fn event_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Resolve a handle known to be valid.
    ///
    /// Callers only pass handles that went through [`Self::check_state`]
    /// or came out of this registry; states are never removed.
    pub(crate) fn state_at(&self, id: StateId) -> &State<T> {
        &self.states[id.index]
    }

    pub(crate) fn check_state(&self, id: StateId) -> Result<(), FsmError> {
        if id.owner != self.id {
            return Err(FsmError::invalid_argument(format!(
                "{id} belongs to another context"
            )));
        }
        if id.index >= self.states.len() {
            return Err(FsmError::invalid_argument(format!(
                "{id} is not a registered state"
            )));
        }
        Ok(())
    }

    fn slot_mut(&mut self, id: EventId) -> Option<&mut Slot<T>> {
        if id.owner != self.id {
            return None;
        }
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    fn live_events(&self) -> impl DoubleEndedIterator<Item = (EventId, &Event<T>)> {
        let owner = self.id;
        self.order.iter().filter_map(move |&index| {
            let slot = self.slots.get(index)?;
            let event = slot.event.as_ref()?;
            Some((EventId::new(owner, index, slot.generation), event))
        })
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("duplicates", &self.duplicates)
            .field("states", &self.states)
            .field("events", &self.live_events().map(|(_, e)| e).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic() -> (Registry<()>, StateId, StateId, StateId) {
        let mut registry = Registry::new(DuplicatePolicy::Allow);
        let green = registry.add_state(State::new("green")).unwrap();
        let yellow = registry.add_state(State::new("yellow")).unwrap();
        let red = registry.add_state(State::new("red")).unwrap();
        (registry, green, yellow, red)
    }

    #[test]
    fn add_and_find_state() {
        let (registry, green, _, red) = traffic();
        assert_eq!(registry.find_state("green"), Some(green));
        assert_eq!(registry.find_state("red"), Some(red));
        assert_eq!(registry.find_state("blue"), None);
        assert_eq!(registry.find_state("Green"), None);
        assert_eq!(registry.state_count(), 3);
    }

    #[test]
    fn duplicate_state_name_resolves_to_newest() {
        let (mut registry, green, _, _) = traffic();
        let second = registry.add_state(State::new("green")).unwrap();
        assert_ne!(green, second);
        assert_eq!(registry.find_state("green"), Some(second));
    }

    #[test]
    fn reject_policy_refuses_duplicate_state() {
        let mut registry: Registry<()> = Registry::new(DuplicatePolicy::Reject);
        registry.add_state(State::new("green")).unwrap();
        let result = registry.add_state(State::new("green"));
        assert_eq!(
            result,
            Err(FsmError::DuplicateState {
                name: "green".to_string()
            })
        );
    }

    #[test]
    fn add_event_rejects_foreign_states() {
        let (mut registry, green, _, _) = traffic();
        let (_, foreign, _, _) = traffic();

        let result = registry.add_event(Event::new("warn", green, foreign));
        assert!(matches!(result, Err(FsmError::InvalidArgument { .. })));
        assert_eq!(registry.event_count(), 0);
    }

    #[test]
    fn add_event_rejects_out_of_range_state() {
        let (mut registry, green, _, _) = traffic();
        let bogus = StateId::new(registry.id, 42);

        let result = registry.add_event(Event::new("warn", green, bogus));
        assert!(matches!(result, Err(FsmError::InvalidArgument { .. })));
    }

    #[test]
    fn find_event_matches_whole_triple() {
        let (mut registry, green, yellow, red) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();

        assert_eq!(registry.find_event("warn", green, yellow), Some(warn));
        assert_eq!(registry.find_event("warn", green, red), None);
        assert_eq!(registry.find_event("warn", yellow, green), None);
        assert_eq!(registry.find_event("stop", green, yellow), None);
    }

    #[test]
    fn resolve_prefers_most_recent_event() {
        let (mut registry, green, yellow, red) = traffic();
        registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        let newer = registry.add_event(Event::new("warn", green, red)).unwrap();

        let (id, event) = registry.resolve(green, "warn").unwrap();
        assert_eq!(id, newer);
        assert_eq!(event.to(), red);
    }

    #[test]
    fn resolve_skips_events_from_other_states() {
        let (mut registry, green, yellow, red) = traffic();
        registry.add_event(Event::new("stop", yellow, red)).unwrap();
        registry.add_event(Event::new("go", yellow, green)).unwrap();

        assert!(registry.resolve(green, "stop").is_none());
        assert!(registry.resolve(yellow, "stop").is_some());
    }

    #[test]
    fn reject_policy_refuses_duplicate_event_from_same_state() {
        let mut registry: Registry<()> = Registry::new(DuplicatePolicy::Reject);
        let green = registry.add_state(State::new("green")).unwrap();
        let yellow = registry.add_state(State::new("yellow")).unwrap();
        let red = registry.add_state(State::new("red")).unwrap();

        registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        let result = registry.add_event(Event::new("warn", green, red));
        assert_eq!(
            result,
            Err(FsmError::DuplicateEvent {
                name: "warn".to_string(),
                from: "green".to_string()
            })
        );

        // Same name from a different state is fine
        assert!(registry.add_event(Event::new("warn", yellow, red)).is_ok());
    }

    #[test]
    fn remove_event_returns_ownership() {
        let (mut registry, green, yellow, red) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        let stop = registry.add_event(Event::new("stop", yellow, red)).unwrap();

        let removed = registry.remove_event(warn).unwrap();
        assert_eq!(removed.name(), "warn");
        assert_eq!(registry.event_count(), 1);
        assert!(registry.event(warn).is_none());
        assert_eq!(registry.event(stop).map(Event::name), Some("stop"));

        let again = registry.add_event(removed).unwrap();
        assert_ne!(again, warn);
        assert_eq!(registry.find_event("warn", green, yellow), Some(again));
    }

    #[test]
    fn reused_slot_rejects_stale_handle() {
        let (mut registry, green, yellow, red) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        registry.remove_event(warn).unwrap();

        let stop = registry.add_event(Event::new("stop", yellow, red)).unwrap();
        assert_eq!(stop.index(), warn.index());
        assert_ne!(stop, warn);

        assert!(registry.event(warn).is_none());
        assert!(registry.event_data_mut(warn).is_none());
        assert!(matches!(
            registry.remove_event(warn),
            Err(FsmError::NotFound { .. })
        ));
        assert_eq!(registry.event(stop).map(Event::name), Some("stop"));
    }

    #[test]
    fn remove_and_readd_cycles_keep_slots_bounded() {
        let (mut registry, green, yellow, red) = traffic();
        registry.add_event(Event::new("stop", yellow, red)).unwrap();
        let mut warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();

        for _ in 0..1_000 {
            let event = registry.remove_event(warn).unwrap();
            warn = registry.add_event(event).unwrap();
        }

        assert_eq!(registry.event_capacity(), 2);
        assert_eq!(registry.event_count(), 2);
        assert_eq!(warn.index(), 1);
        assert_eq!(warn.generation(), 1_000);
    }

    #[test]
    fn reused_slot_keeps_registration_order() {
        let (mut registry, green, yellow, red) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        registry.add_event(Event::new("stop", yellow, red)).unwrap();
        registry.remove_event(warn).unwrap();
        // Lands in slot 0 but is the newest registration
        let rerouted = registry.add_event(Event::new("warn", green, red)).unwrap();
        assert_eq!(rerouted.index(), 0);

        let events: Vec<_> = registry.events().map(|(_, e)| e.name()).collect();
        assert_eq!(events, vec!["stop", "warn"]);
        assert_eq!(registry.resolve(green, "warn").map(|(id, _)| id), Some(rerouted));
    }

    #[test]
    fn event_data_can_change_but_endpoints_cannot() {
        let (mut registry, green, yellow, red) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow).with_data(serde_json::json!(1)))
            .unwrap();

        if let Some(data) = registry.event_data_mut(warn) {
            *data = serde_json::json!(2);
        }
        let previous = registry.set_event_data(warn, serde_json::json!(3)).unwrap();
        assert_eq!(previous, Some(serde_json::json!(2)));

        let event = registry.event(warn).unwrap();
        assert_eq!(event.data(), Some(&serde_json::json!(3)));
        assert_eq!((event.from(), event.to()), (green, yellow));
        assert_eq!(registry.resolve(green, "warn").map(|(_, e)| e.to()), Some(yellow));
        assert_eq!(registry.find_event("warn", green, red), None);
    }

    #[test]
    fn state_data_setters_check_handles() {
        let (mut registry, _, yellow, _) = traffic();
        let (_, foreign, _, _) = traffic();

        assert!(registry.state_data_mut(yellow).is_none());
        assert_eq!(registry.set_state_data(yellow, serde_json::json!(5)), Ok(None));
        assert_eq!(
            registry.state(yellow).and_then(State::data),
            Some(&serde_json::json!(5))
        );

        assert!(registry.state_data_mut(foreign).is_none());
        assert!(matches!(
            registry.set_state_data(foreign, serde_json::json!(5)),
            Err(FsmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn remove_event_twice_is_not_found() {
        let (mut registry, green, yellow, _) = traffic();
        let warn = registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();

        registry.remove_event(warn).unwrap();
        assert!(matches!(
            registry.remove_event(warn),
            Err(FsmError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_foreign_event_is_not_found() {
        let (mut registry, _, _, _) = traffic();
        let (mut other, green, yellow, _) = traffic();
        let warn = other.add_event(Event::new("warn", green, yellow)).unwrap();

        assert!(matches!(
            registry.remove_event(warn),
            Err(FsmError::NotFound { .. })
        ));
        assert!(other.event(warn).is_some());
    }

    #[test]
    fn iteration_is_in_registration_order() {
        let (mut registry, green, yellow, red) = traffic();
        registry
            .add_event(Event::new("warn", green, yellow))
            .unwrap();
        registry.add_event(Event::new("stop", yellow, red)).unwrap();

        let states: Vec<_> = registry.states().map(|(_, s)| s.name()).collect();
        assert_eq!(states, vec!["green", "yellow", "red"]);

        let events: Vec<_> = registry.events().map(|(_, e)| e.name()).collect();
        assert_eq!(events, vec!["warn", "stop"]);
    }
}
