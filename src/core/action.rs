//! Actions: the invocable operations of a machine.

use super::transition::Transition;
use std::fmt;
use std::sync::Arc;

/// A named operation, optionally bound to a [`Transition`].
///
/// Actions without a transition are side-effect only: their predicates and
/// handlers run, but the machine never changes state. An action becomes
/// callable from a state once attached with
/// [`StateMachine::add_action`](crate::effects::StateMachine::add_action).
///
/// Legality checks use identity, so keep the handle returned here and pass
/// clones of it around. Two separately constructed actions are distinct
/// even if they share a name.
///
/// # Example
///
/// ```rust
/// use actuate::core::{Action, Transition};
/// use actuate::effects::StateMachine;
///
/// let machine: StateMachine = StateMachine::new();
/// let open = machine.add_state("open").unwrap();
///
/// let unlocking = Transition::new("unlocking", &open);
/// let open_with_key = Action::with_transition("open with key", &unlocking);
/// let knock = Action::new("knock");
///
/// assert_eq!(open_with_key.transition(), Some(&unlocking));
/// assert!(knock.transition().is_none());
/// assert_ne!(knock, Action::new("knock"));
/// ```
#[derive(Clone)]
pub struct Action {
    inner: Arc<ActionInner>,
}

struct ActionInner {
    name: String,
    transition: Option<Transition>,
}

impl Action {
    /// Create a side-effect only action.
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Create an action that moves the machine along `transition`.
    pub fn with_transition(name: impl Into<String>, transition: &Transition) -> Self {
        Self::build(name.into(), Some(transition.clone()))
    }

    fn build(name: String, transition: Option<Transition>) -> Self {
        Self {
            inner: Arc::new(ActionInner { name, transition }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.inner.transition.as_ref()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.inner.name)
            .field("transition", &self.inner.transition)
            .finish()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
