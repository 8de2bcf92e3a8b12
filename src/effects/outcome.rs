//! Result of a completed action invocation.

use crate::core::State;

/// How a successful [`call_action`](crate::effects::StateMachine::call_action)
/// ended.
///
/// Failures (illegal action, callback errors) are reported through
/// `Err` instead; every variant here leaves the machine consistent.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// Handlers ran and the machine moved along the action's transition
    Transitioned { from: State, to: State },

    /// Handlers ran; the action has no transition, so the state is unchanged
    Completed { state: State },

    /// A predicate returned `false`; nothing else ran
    Vetoed { state: State },

    /// Another invocation moved the machine while transition listeners were
    /// running; this one was abandoned before leaving `expected`
    Superseded { expected: State, actual: State },
}

impl ActionOutcome {
    /// True when the current state changed as a result of this invocation.
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    pub fn is_vetoed(&self) -> bool {
        matches!(self, Self::Vetoed { .. })
    }

    /// True when handlers ran (with or without a transition).
    pub fn handlers_ran(&self) -> bool {
        !self.is_vetoed()
    }
}
