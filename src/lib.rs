//! Actuate: an action-driven finite state machine engine
//!
//! A host declares states, the actions legal in each state and the
//! transitions those actions take, then drives the machine by calling
//! actions and observing what happens through asynchronous listeners.
//!
//! # Core Concepts
//!
//! - **State**: a named node; handles are returned by
//!   [`StateMachine::add_state`](effects::StateMachine::add_state)
//! - **Transition**: a named edge into a target state, shareable between actions
//! - **Action**: a named operation, optionally bound to a transition
//! - **Predicates**: callbacks that may veto an action before anything runs
//! - **Handlers**: side-effecting callbacks run once the predicates pass
//! - **Listeners**: transition, exit, state-changed and enter notifications
//!
//! All callbacks are async. Within one pipeline phase they run concurrently;
//! the phases themselves are strictly sequential.
//!
//! # Example
//!
//! ```rust
//! use actuate::core::{Action, Transition};
//! use actuate::effects::StateMachine;
//!
//! # futures::executor::block_on(async {
//! let machine: StateMachine = StateMachine::new();
//! let locked = machine.add_state("locked").unwrap();
//! let open = machine.add_state("open").unwrap();
//!
//! let unlocking = Transition::new("unlocking", &open);
//! let locking = Transition::new("locking", &locked);
//! let open_with_key = Action::with_transition("open with key", &unlocking);
//! let lock_with_key = Action::with_transition("lock with key", &locking);
//! let look_inside = Action::new("look inside");
//!
//! machine.add_action(&[locked.clone()], &open_with_key).unwrap();
//! machine.add_action(&[open.clone()], &lock_with_key).unwrap();
//! machine.add_action(&[open.clone()], &look_inside).unwrap();
//! machine.on_enter_state(&open, |exec| async move {
//!     println!("entered {} via {}", exec.to, exec.action);
//!     Ok(())
//! });
//!
//! machine.start(&locked).unwrap();
//! machine.call(&open_with_key).await.unwrap();
//! assert_eq!(machine.current_state().unwrap(), open);
//!
//! machine.call(&lock_with_key).await.unwrap();
//! let err = machine.call(&look_inside).await.unwrap_err();
//! assert!(err.is_illegal_action());
//! # });
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod listener;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use core::{
    Action, ActionExecution, Guard, State, StateHistory, StateTransition, Transition,
    TransitionExecution, TransitionIntent,
};
pub use effects::{ActionOutcome, StateMachine};
pub use error::{CallbackError, IllegalOperation, MachineError};
pub use listener::{ListenerRegistry, SubscriptionId};
