//! Builder for declaring a whole state machine by name.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Action, Transition};
use crate::effects::StateMachine;
use crate::error::MachineError;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

enum Sources {
    States(Vec<String>),
    Blanket,
}

struct ActionDecl {
    name: String,
    transition: Option<String>,
    sources: Sources,
}

/// Builder for constructing state machines with a fluent API.
///
/// Everything is referred to by name. [`build`](Self::build) validates the
/// whole declaration, reporting every problem found, and returns a started
/// machine. Unlike [`StateMachine::add_action`], attaching an action to an
/// undeclared state is an error here.
///
/// # Example
///
/// ```rust
/// use actuate::builder::StateMachineBuilder;
///
/// let machine = StateMachineBuilder::<()>::new()
///     .states(["locked", "open"])
///     .transition("unlocking", "open")
///     .transition("locking", "locked")
///     .action("open with key", Some("unlocking"), ["locked"])
///     .action("lock with key", Some("locking"), ["open"])
///     .action("look inside", None, ["open"])
///     .initial("locked")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state().unwrap().name(), "locked");
/// assert!(machine.action_named("look inside").is_some());
/// ```
pub struct StateMachineBuilder<P = ()> {
    config: MachineConfig,
    initial: Option<String>,
    states: Vec<String>,
    transitions: Vec<(String, String)>,
    actions: Vec<ActionDecl>,
    _phantom: PhantomData<P>,
}

impl<P: Clone + Send + Sync + 'static> StateMachineBuilder<P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
            actions: Vec::new(),
            _phantom: PhantomData,
        }
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a state.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    /// Declare several states at once.
    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a transition into `target`.
    pub fn transition(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.transitions.push((name.into(), target.into()));
        self
    }

    /// Declare an action legal from each of `from`, optionally bound to a
    /// named transition.
    pub fn action<I, S>(mut self, name: impl Into<String>, transition: Option<&str>, from: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.push(ActionDecl {
            name: name.into(),
            transition: transition.map(str::to_string),
            sources: Sources::States(from.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// Declare an action legal from every declared state.
    pub fn blanket_action(mut self, name: impl Into<String>, transition: Option<&str>) -> Self {
        self.actions.push(ActionDecl {
            name: name.into(),
            transition: transition.map(str::to_string),
            sources: Sources::Blanket,
        });
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Validate every declaration, accumulating all problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Check> = Vec::new();

        let mut states = HashSet::new();
        for name in &self.states {
            checks.push(check(states.insert(name.as_str()), || {
                BuildError::DuplicateState { name: name.clone() }
            }));
        }

        let mut transitions = HashSet::new();
        for (name, target) in &self.transitions {
            checks.push(check(transitions.insert(name.as_str()), || {
                BuildError::DuplicateTransition { name: name.clone() }
            }));
            checks.push(check(states.contains(target.as_str()), || {
                BuildError::UnknownTransitionTarget {
                    transition: name.clone(),
                    target: target.clone(),
                }
            }));
        }

        let mut actions = HashSet::new();
        for action in &self.actions {
            checks.push(check(actions.insert(action.name.as_str()), || {
                BuildError::DuplicateAction {
                    name: action.name.clone(),
                }
            }));
            if let Some(transition) = &action.transition {
                checks.push(check(transitions.contains(transition.as_str()), || {
                    BuildError::UnknownTransition {
                        action: action.name.clone(),
                        transition: transition.clone(),
                    }
                }));
            }
            if let Sources::States(sources) = &action.sources {
                for state in sources {
                    checks.push(check(states.contains(state.as_str()), || {
                        BuildError::UnknownSourceState {
                            action: action.name.clone(),
                            state: state.clone(),
                        }
                    }));
                }
            }
        }

        checks.push(match &self.initial {
            None => Validation::fail(BuildError::MissingInitialState),
            Some(name) => check(states.contains(name.as_str()), || {
                BuildError::UnknownInitialState { name: name.clone() }
            }),
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build and start the state machine.
    /// Returns every validation problem if the declaration is inconsistent.
    pub fn build(self) -> Result<StateMachine<P>, MachineError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(MachineError::Build(errors.iter().cloned().collect()));
        }

        let machine = StateMachine::with_config(self.config);
        for name in &self.states {
            machine.add_state(name)?;
        }

        let mut transitions = HashMap::new();
        for (name, target) in &self.transitions {
            if let Some(target) = machine.state_named(target) {
                transitions.insert(name.as_str(), Transition::new(name.as_str(), &target));
            }
        }

        for decl in &self.actions {
            let action = match decl.transition.as_deref().and_then(|t| transitions.get(t)) {
                Some(transition) => Action::with_transition(decl.name.as_str(), transition),
                None => Action::new(decl.name.as_str()),
            };
            match &decl.sources {
                Sources::States(names) => {
                    let sources = names
                        .iter()
                        .filter_map(|name| machine.state_named(name))
                        .collect::<Vec<_>>();
                    machine.add_action(&sources, &action)?;
                }
                Sources::Blanket => machine.add_blanket_action(&action)?,
            }
        }

        if let Some(initial) = self.initial.as_deref().and_then(|name| machine.state_named(name)) {
            machine.start(&initial)?;
        }
        Ok(machine)
    }
}

impl<P: Clone + Send + Sync + 'static> Default for StateMachineBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn check(ok: bool, error: impl FnOnce() -> BuildError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}
