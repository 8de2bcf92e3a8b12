//! The state machine runtime.
//!
//! This module is the "imperative shell" around the declarative graph in
//! [`core`](crate::core): it owns the current state, runs host callbacks and
//! applies transitions.
//!
//! # Invocation pipeline
//!
//! [`StateMachine::call_action`] runs these phases strictly in order; within
//! a phase every matching callback is started before any is awaited:
//!
//! 1. legality check against the current state's allowed actions
//! 2. predicates (any `false` ends the call as [`ActionOutcome::Vetoed`])
//! 3. handlers
//! 4. transition listeners (only for actions with a transition)
//! 5. re-check that no other invocation moved the machine meanwhile
//! 6. exit listeners
//! 7. state change, then state-changed listeners
//! 8. enter listeners

mod graph;
mod machine;
mod outcome;
mod subscriptions;

pub use machine::StateMachine;
pub use outcome::ActionOutcome;
