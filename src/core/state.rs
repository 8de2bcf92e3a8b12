//! State handles.
//!
//! A [`State`] is a cheap, immutable handle onto a node in a machine's
//! state arena. States are only created by
//! [`StateMachine::add_state`](crate::effects::StateMachine::add_state);
//! the set of actions legal from a state lives in the machine, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable index of a state inside its owning machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named node of the state graph.
///
/// Two handles are equal when they name the same arena slot of the same
/// machine. Handles are `Clone` and may be freely held by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    machine: Uuid,
    id: StateId,
    name: String,
}

impl State {
    pub(crate) fn new(machine: Uuid, id: StateId, name: impl Into<String>) -> Self {
        Self {
            machine,
            id,
            name: name.into(),
        }
    }

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the arena handle of this state.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Id of the machine that declared this state.
    pub fn machine(&self) -> Uuid {
        self.machine
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
