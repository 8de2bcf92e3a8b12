//! State machine that runs the action invocation pipeline.

use crate::config::MachineConfig;
use crate::core::{
    Action, ActionExecution, State, StateHistory, StateTransition, TransitionExecution,
    TransitionIntent,
};
use crate::effects::graph::StateGraph;
use crate::effects::outcome::ActionOutcome;
use crate::error::{IllegalOperation, MachineError};
use crate::listener::ListenerRegistry;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
enum Lifecycle {
    Unstarted,
    Started(State),
    Disposed,
}

/// One registry per observable event category.
pub(crate) struct Listeners<P> {
    pub(crate) state_changed: ListenerRegistry<State>,
    pub(crate) enter: ListenerRegistry<TransitionExecution<P>>,
    pub(crate) exit: ListenerRegistry<TransitionExecution<P>>,
    pub(crate) predicates: ListenerRegistry<ActionExecution<P>, bool>,
    pub(crate) handlers: ListenerRegistry<ActionExecution<P>>,
    pub(crate) transitions: ListenerRegistry<TransitionIntent<P>>,
}

impl<P: Clone + Send + Sync + 'static> Listeners<P> {
    fn new() -> Self {
        Self {
            state_changed: ListenerRegistry::new(),
            enter: ListenerRegistry::new(),
            exit: ListenerRegistry::new(),
            predicates: ListenerRegistry::new(),
            handlers: ListenerRegistry::new(),
            transitions: ListenerRegistry::new(),
        }
    }

    fn dispose_all(&self) {
        self.state_changed.dispose_all();
        self.enter.dispose_all();
        self.exit.dispose_all();
        self.predicates.dispose_all();
        self.handlers.dispose_all();
        self.transitions.dispose_all();
    }
}

/// Finite state machine driven by action invocations.
///
/// The machine owns its state graph and the current-state pointer. It moves
/// through three lifecycle phases: unstarted (states may be declared),
/// started (actions may be called) and disposed (all listeners dropped,
/// every operation rejected).
///
/// `P` is the payload type carried by every invocation.
///
/// # Example
///
/// ```rust
/// use actuate::core::{Action, Transition};
/// use actuate::effects::{ActionOutcome, StateMachine};
///
/// # futures::executor::block_on(async {
/// let machine: StateMachine<u32> = StateMachine::new();
/// let locked = machine.add_state("locked").unwrap();
/// let open = machine.add_state("open").unwrap();
///
/// let unlock = Action::with_transition("open with key", &Transition::new("unlocking", &open));
/// machine.add_action(&[locked.clone()], &unlock).unwrap();
/// machine.add_predicate(|exec| async move { Ok(exec.payload == 1234) });
/// machine.start(&locked).unwrap();
///
/// let outcome = machine.call_action(&unlock, 1111).await.unwrap();
/// assert!(outcome.is_vetoed());
/// assert_eq!(machine.current_state().unwrap(), locked);
///
/// let outcome = machine.call_action(&unlock, 1234).await.unwrap();
/// assert_eq!(outcome, ActionOutcome::Transitioned { from: locked, to: open.clone() });
/// assert_eq!(machine.current_state().unwrap(), open);
/// # });
/// ```
pub struct StateMachine<P = ()> {
    id: Uuid,
    config: MachineConfig,
    graph: RwLock<StateGraph>,
    lifecycle: RwLock<Lifecycle>,
    history: RwLock<StateHistory>,
    pub(crate) listeners: Listeners<P>,
}

impl<P: Clone + Send + Sync + 'static> StateMachine<P> {
    /// Create an empty, unstarted machine with default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            config,
            graph: RwLock::new(StateGraph::new(id)),
            lifecycle: RwLock::new(Lifecycle::Unstarted),
            history: RwLock::new(StateHistory::new()),
            listeners: Listeners::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Declare a new state.
    ///
    /// Fails if the machine has started or been disposed, or if the name is
    /// already taken.
    pub fn add_state(&self, name: &str) -> Result<State, MachineError> {
        match &*self.lifecycle.read() {
            Lifecycle::Unstarted => {}
            Lifecycle::Started(_) => {
                return Err(IllegalOperation::AddStateAfterStart {
                    name: name.to_string(),
                }
                .into())
            }
            Lifecycle::Disposed => return Err(IllegalOperation::Disposed.into()),
        }

        let state = self.graph.write().insert(name)?;
        tracing::debug!(machine = %self.config.name, state = %state, "state declared");
        Ok(state)
    }

    /// Make `action` legal from each of `states`.
    ///
    /// Fails if the action's transition targets a state outside this
    /// machine; nothing is attached in that case. States that are not part of
    /// this machine are skipped without error, which allows blanket lists.
    pub fn add_action(&self, states: &[State], action: &Action) -> Result<(), MachineError> {
        self.ensure_not_disposed()?;

        let mut graph = self.graph.write();
        if let Some(transition) = action.transition() {
            if !graph.contains(transition.target()) {
                return Err(IllegalOperation::UnknownTransitionTarget {
                    transition: transition.name().to_string(),
                    target: transition.target().name().to_string(),
                }
                .into());
            }
        }

        for state in states {
            if !graph.attach(state, action) {
                tracing::debug!(
                    machine = %self.config.name,
                    action = %action,
                    state = %state,
                    "skipping unknown state"
                );
            }
        }
        Ok(())
    }

    /// Make `action` legal from every state declared so far.
    ///
    /// States declared afterwards do not pick it up.
    pub fn add_blanket_action(&self, action: &Action) -> Result<(), MachineError> {
        let states = self.states();
        self.add_action(&states, action)
    }

    /// Snapshot of the actions legal from `state`; empty for unknown states.
    pub fn allowed_actions(&self, state: &State) -> Vec<Action> {
        self.graph.read().allowed_actions(state)
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> Vec<State> {
        self.graph.read().states()
    }

    pub fn state_named(&self, name: &str) -> Option<State> {
        self.graph.read().get(name).cloned()
    }

    /// First attached action with the given name, scanning states in
    /// declaration order.
    pub fn action_named(&self, name: &str) -> Option<Action> {
        self.graph.read().find_action(name)
    }

    /// Enter `initial` and freeze the set of states.
    ///
    /// No enter or state-changed listeners fire for the initial state.
    pub fn start(&self, initial: &State) -> Result<(), MachineError> {
        let mut lifecycle = self.lifecycle.write();
        match &*lifecycle {
            Lifecycle::Unstarted => {}
            Lifecycle::Started(_) => return Err(IllegalOperation::AlreadyStarted.into()),
            Lifecycle::Disposed => return Err(IllegalOperation::Disposed.into()),
        }

        if !self.graph.read().contains(initial) {
            return Err(IllegalOperation::UnknownState {
                name: initial.name().to_string(),
            }
            .into());
        }

        *lifecycle = Lifecycle::Started(initial.clone());
        tracing::info!(machine = %self.config.name, initial = %initial, "machine started");
        Ok(())
    }

    /// Drop every listener and reject any further use of the machine.
    pub fn dispose(&self) {
        *self.lifecycle.write() = Lifecycle::Disposed;
        self.listeners.dispose_all();
        tracing::info!(machine = %self.config.name, "machine disposed");
    }

    pub fn is_started(&self) -> bool {
        matches!(*self.lifecycle.read(), Lifecycle::Started(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.lifecycle.read(), Lifecycle::Disposed)
    }

    /// The current state. Fails before `start` and after `dispose`.
    pub fn current_state(&self) -> Result<State, MachineError> {
        match &*self.lifecycle.read() {
            Lifecycle::Started(state) => Ok(state.clone()),
            Lifecycle::Unstarted => Err(IllegalOperation::NotStarted.into()),
            Lifecycle::Disposed => Err(IllegalOperation::Disposed.into()),
        }
    }

    /// Committed transitions, oldest first.
    pub fn history(&self) -> StateHistory {
        self.history.read().clone()
    }

    /// Invoke `action` from the current state.
    ///
    /// Runs predicates, then handlers, then (for actions with a transition)
    /// transition listeners, exit listeners, the state change, state-changed
    /// listeners and enter listeners. Each phase starts all of its callbacks
    /// together and waits for every one of them before the next phase.
    ///
    /// A predicate returning `false` ends the invocation with
    /// [`ActionOutcome::Vetoed`]. A callback error ends it immediately with
    /// [`MachineError::Callback`]; if that happens before the state change
    /// the current state is untouched.
    pub async fn call_action(
        &self,
        action: &Action,
        payload: P,
    ) -> Result<ActionOutcome, MachineError> {
        let from = self.current_state()?;
        if !self.is_allowed(&from, action) {
            tracing::debug!(
                machine = %self.config.name,
                action = %action,
                state = %from,
                "action not allowed"
            );
            return Err(MachineError::IllegalAction {
                state: from,
                action: action.clone(),
            });
        }

        let execution = ActionExecution {
            action: action.clone(),
            from: from.clone(),
            payload: payload.clone(),
        };

        let verdicts = self.listeners.predicates.notify(execution.clone()).await?;
        if verdicts.contains(&false) {
            tracing::debug!(machine = %self.config.name, action = %action, "action vetoed");
            return Ok(ActionOutcome::Vetoed { state: from });
        }

        self.listeners.handlers.notify(execution).await?;

        let Some(transition) = action.transition() else {
            return Ok(ActionOutcome::Completed { state: from });
        };

        let intent = TransitionIntent {
            transition: transition.clone(),
            action: action.clone(),
            payload: payload.clone(),
        };
        self.listeners.transitions.notify(intent).await?;

        let current = self.current_state()?;
        if current != from {
            tracing::debug!(
                machine = %self.config.name,
                action = %action,
                expected = %from,
                actual = %current,
                "state changed during invocation, abandoning"
            );
            return Ok(ActionOutcome::Superseded {
                expected: from,
                actual: current,
            });
        }

        let to = transition.target().clone();
        let execution = TransitionExecution {
            action: action.clone(),
            from: from.clone(),
            to: to.clone(),
            payload,
        };

        self.listeners.exit.notify(execution.clone()).await?;
        self.commit(&execution)?;
        self.listeners.state_changed.notify(to.clone()).await?;
        self.listeners.enter.notify(execution).await?;

        Ok(ActionOutcome::Transitioned { from, to })
    }

    /// Invoke `action` with a default payload.
    pub async fn call(&self, action: &Action) -> Result<ActionOutcome, MachineError>
    where
        P: Default,
    {
        self.call_action(action, P::default()).await
    }

    fn commit(&self, execution: &TransitionExecution<P>) -> Result<(), MachineError> {
        {
            let mut lifecycle = self.lifecycle.write();
            if let Lifecycle::Disposed = *lifecycle {
                return Err(IllegalOperation::Disposed.into());
            }
            *lifecycle = Lifecycle::Started(execution.to.clone());
        }

        self.history.write().push(
            StateTransition {
                from: execution.from.clone(),
                to: execution.to.clone(),
                action: execution.action.name().to_string(),
                timestamp: Utc::now(),
            },
            self.config.history_limit,
        );

        tracing::debug!(
            machine = %self.config.name,
            action = %execution.action,
            from = %execution.from,
            to = %execution.to,
            "transition committed"
        );
        Ok(())
    }

    fn is_allowed(&self, state: &State, action: &Action) -> bool {
        self.graph.read().allows(state, action)
    }

    fn ensure_not_disposed(&self) -> Result<(), MachineError> {
        if self.is_disposed() {
            return Err(IllegalOperation::Disposed.into());
        }
        Ok(())
    }
}

impl<P: Clone + Send + Sync + 'static> Default for StateMachine<P> {
    fn default() -> Self {
        Self::new()
    }
}
