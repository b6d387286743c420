//! Event-driven finite state machines
//!
//! States are small `Copy` enums; events are `u32` constants grouped in a
//! module next to the state type. A transition table is a single `match` on
//! `(state, event)` returning the next state, or `None` when the event does
//! not apply in the current state.

use std::hash::Hash;

/// Trait for state types that react to events
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}
