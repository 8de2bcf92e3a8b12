//! Arena of declared states and the actions legal from each.

use crate::core::{Action, State, StateId};
use crate::error::IllegalOperation;
use std::collections::HashMap;
use uuid::Uuid;

struct StateNode {
    state: State,
    actions: Vec<Action>,
}

/// States addressed by [`StateId`], with a name index.
///
/// Transitions and actions hold state handles rather than references into
/// the arena, so validation is a membership check. Every handle carries the
/// owning machine's id, so a handle minted by another machine never matches.
pub(crate) struct StateGraph {
    machine: Uuid,
    nodes: Vec<StateNode>,
    index: HashMap<String, StateId>,
}

impl StateGraph {
    pub(crate) fn new(machine: Uuid) -> Self {
        Self {
            machine,
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str) -> Result<State, IllegalOperation> {
        if self.index.contains_key(name) {
            return Err(IllegalOperation::DuplicateState {
                name: name.to_string(),
            });
        }

        let id = StateId(self.nodes.len());
        let state = State::new(self.machine, id, name);
        self.index.insert(name.to_string(), id);
        self.nodes.push(StateNode {
            state: state.clone(),
            actions: Vec::new(),
        });
        Ok(state)
    }

    pub(crate) fn contains(&self, state: &State) -> bool {
        self.node(state).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|id| &self.nodes[id.0].state)
    }

    pub(crate) fn states(&self) -> Vec<State> {
        self.nodes.iter().map(|node| node.state.clone()).collect()
    }

    /// Add `action` to the legal set of `state`. Returns `false` when the
    /// state is not part of this graph.
    pub(crate) fn attach(&mut self, state: &State, action: &Action) -> bool {
        let Some(node) = self.node_mut(state) else {
            return false;
        };
        if !node.actions.contains(action) {
            node.actions.push(action.clone());
        }
        true
    }

    pub(crate) fn allows(&self, state: &State, action: &Action) -> bool {
        self.node(state)
            .is_some_and(|node| node.actions.contains(action))
    }

    pub(crate) fn allowed_actions(&self, state: &State) -> Vec<Action> {
        self.node(state)
            .map(|node| node.actions.clone())
            .unwrap_or_default()
    }

    /// First attached action with this name, scanning states in declaration order.
    pub(crate) fn find_action(&self, name: &str) -> Option<Action> {
        self.nodes
            .iter()
            .flat_map(|node| node.actions.iter())
            .find(|action| action.name() == name)
            .cloned()
    }

    fn node(&self, state: &State) -> Option<&StateNode> {
        self.nodes
            .get(state.id().index())
            .filter(|node| node.state == *state)
    }

    fn node_mut(&mut self, state: &State) -> Option<&mut StateNode> {
        self.nodes
            .get_mut(state.id().index())
            .filter(|node| node.state == *state)
    }
}
