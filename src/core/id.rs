//! Typed handles into a [`Registry`](crate::registry::Registry).
//!
//! Handles replace raw cross references between events and states. Each
//! handle remembers which registry issued it, so a handle from one context
//! can never silently resolve inside another.

use std::fmt;
use uuid::Uuid;

/// Handle to a state registered in a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId {
    pub(crate) owner: Uuid,
    pub(crate) index: usize,
}

/// Handle to an event registered in a context.
///
/// Stays valid until the event is removed with
/// [`Registry::remove_event`](crate::registry::Registry::remove_event).
/// Vacated slots are reused; the generation tells a stale handle apart
/// from the event now occupying its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventId {
    pub(crate) owner: Uuid,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl StateId {
    pub(crate) fn new(owner: Uuid, index: usize) -> Self {
        Self { owner, index }
    }

    /// Position of the state in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl EventId {
    pub(crate) fn new(owner: Uuid, index: usize, generation: u32) -> Self {
        Self {
            owner,
            index,
            generation,
        }
    }

    /// Slot the event occupies. Slots are reused after removal.
    pub fn index(&self) -> usize {
        self.index
    }

    /// How many times the slot had been vacated when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.index)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.index)
    }
}
