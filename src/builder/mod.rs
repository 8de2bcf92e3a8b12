//! Builder API for declarative machine construction.
//!
//! This module provides a fluent builder that declares states, transitions
//! and actions by name and validates them together before producing a
//! started [`StateMachine`](crate::effects::StateMachine).

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
