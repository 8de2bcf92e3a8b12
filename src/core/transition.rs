//! Transitions: named edges into a target state.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// A named edge that moves the machine into its target state.
///
/// A transition never records a source state, so one transition may be
/// shared by any number of actions across any number of states.
/// Equality is identity: clones compare equal, separately constructed
/// transitions with the same name do not.
#[derive(Clone)]
pub struct Transition {
    inner: Arc<TransitionInner>,
}

struct TransitionInner {
    name: String,
    target: State,
}

impl Transition {
    pub fn new(name: impl Into<String>, target: &State) -> Self {
        Self {
            inner: Arc::new(TransitionInner {
                name: name.into(),
                target: target.clone(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The state the machine enters when this transition commits.
    pub fn target(&self) -> &State {
        &self.inner.target
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Transition {}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.inner.name)
            .field("target", &self.inner.target.name())
            .finish()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
