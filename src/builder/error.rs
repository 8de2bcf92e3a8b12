//! Build errors for declarative machine construction.

use thiserror::Error;

/// Problems detected while validating a [`StateMachineBuilder`](super::StateMachineBuilder).
///
/// The builder reports every problem at once rather than stopping at the
/// first one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state '{name}' is not declared")]
    UnknownInitialState { name: String },

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Transition '{name}' is declared more than once")]
    DuplicateTransition { name: String },

    #[error("Action '{name}' is declared more than once")]
    DuplicateAction { name: String },

    #[error("Transition '{transition}' targets undeclared state '{target}'")]
    UnknownTransitionTarget { transition: String, target: String },

    #[error("Action '{action}' uses undeclared transition '{transition}'")]
    UnknownTransition { action: String, transition: String },

    #[error("Action '{action}' is attached to undeclared state '{state}'")]
    UnknownSourceState { action: String, state: String },
}
