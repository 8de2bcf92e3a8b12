//! Core graph types.
//!
//! This module contains the declarative shape of a machine and the
//! values that flow through it:
//! - States, transitions and actions (the graph)
//! - Execution context records handed to callbacks
//! - Guard predicates used by filtered subscriptions
//! - Immutable history of committed transitions
//!
//! Nothing here performs I/O or runs callbacks; that happens in
//! [`effects`](crate::effects).

mod action;
mod guard;
mod history;
mod records;
mod state;
mod transition;

pub use action::Action;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use records::{ActionExecution, TransitionExecution, TransitionIntent};
pub use state::{State, StateId};
pub use transition::Transition;
