//! Error types for machine declaration and action invocation.

use crate::builder::BuildError;
use crate::core::{Action, State};
use thiserror::Error;

/// Failure raised by a host callback (predicate, handler or listener).
///
/// Any error type can be returned from a callback with `?` or `.into()`.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Misuse of the declaration or lifecycle API.
///
/// These are raised synchronously and never corrupt machine state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IllegalOperation {
    #[error("State '{name}' is already declared")]
    DuplicateState { name: String },

    #[error("Cannot add state '{name}' after the machine has started")]
    AddStateAfterStart { name: String },

    #[error("Transition '{transition}' targets state '{target}' which is not declared")]
    UnknownTransitionTarget { transition: String, target: String },

    #[error("State '{name}' is not declared in this machine")]
    UnknownState { name: String },

    #[error("Machine has not been started")]
    NotStarted,

    #[error("Machine has already been started")]
    AlreadyStarted,

    #[error("Machine has been disposed")]
    Disposed,
}

/// Errors surfaced by [`StateMachine`](crate::effects::StateMachine) operations.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Illegal operation: {0}")]
    IllegalOperation(#[from] IllegalOperation),

    #[error("Action '{action}' is not allowed from state '{state}'")]
    IllegalAction { state: State, action: Action },

    #[error("Callback failed: {0}")]
    Callback(#[from] CallbackError),

    #[error("Machine definition has {} error(s): {}", .0.len(), join_errors(.0))]
    Build(Vec<BuildError>),

    #[error("Invalid machine configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MachineError {
    /// True for construction-time misuse (including builder failures).
    pub fn is_illegal_operation(&self) -> bool {
        matches!(self, Self::IllegalOperation(_) | Self::Build(_))
    }

    /// True when an action was invoked from a state that does not allow it.
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, Self::IllegalAction { .. })
    }
}

fn join_errors(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
