//! Execution context records handed to predicates, handlers and listeners.
//!
//! Each record is built fresh for one invocation and carries no behavior.

use super::action::Action;
use super::state::State;
use super::transition::Transition;

/// An action being invoked from a state.
///
/// Delivered to predicates and handlers.
#[derive(Clone, Debug)]
pub struct ActionExecution<P> {
    pub action: Action,
    pub from: State,
    pub payload: P,
}

/// A transition about to be taken, delivered before the state changes.
#[derive(Clone, Debug)]
pub struct TransitionIntent<P> {
    pub transition: Transition,
    pub action: Action,
    pub payload: P,
}

/// A transition being committed, delivered to exit and enter listeners.
#[derive(Clone, Debug)]
pub struct TransitionExecution<P> {
    pub action: Action,
    pub from: State,
    pub to: State,
    pub payload: P,
}
