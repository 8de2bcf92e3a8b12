//! State transition history tracking.
//!
//! Provides immutable tracking of committed transitions over time.
//! Callers get snapshots; the machine appends to its own copy in place.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: State,
    /// The state being entered
    pub to: State,
    /// Name of the action that triggered the move
    pub action: String,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// History is immutable - [`record`](Self::record) returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use actuate::core::{Action, Transition};
/// use actuate::effects::StateMachine;
///
/// # futures::executor::block_on(async {
/// let machine: StateMachine = StateMachine::new();
/// let locked = machine.add_state("locked").unwrap();
/// let open = machine.add_state("open").unwrap();
/// let unlock = Action::with_transition("unlock", &Transition::new("unlocking", &open));
/// machine.add_action(&[locked.clone()], &unlock).unwrap();
/// machine.start(&locked).unwrap();
///
/// machine.call_action(&unlock, ()).await.unwrap();
///
/// let history = machine.history();
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.get_path(), vec![&locked, &open]);
/// # });
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut history = self.clone();
        history.push(transition, None);
        history
    }

    /// Keep only the most recent `limit` transitions, returning a new history.
    pub fn retain_last(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions.iter().skip(skip).cloned().collect(),
        }
    }

    /// Append in place, dropping the oldest entries beyond `limit`.
    pub(crate) fn push(&mut self, transition: StateTransition, limit: Option<usize>) {
        self.transitions.push_back(transition);
        if let Some(limit) = limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition, then the `to`
    /// state of each transition.
    pub fn get_path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Committed transitions, oldest first.
    pub fn transitions(
        &self,
    ) -> impl DoubleEndedIterator<Item = &StateTransition> + ExactSizeIterator {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
