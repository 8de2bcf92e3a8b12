//! Subscription surface of [`StateMachine`].
//!
//! Every event category has an unconditional form and a form filtered by
//! the name of a state, action or transition. All forms return a
//! [`SubscriptionId`]; [`StateMachine::unsubscribe`] removes it from
//! whichever category it was registered under.

use super::machine::StateMachine;
use crate::core::{
    Action, ActionExecution, State, Transition, TransitionExecution, TransitionIntent,
};
use crate::error::CallbackError;
use crate::listener::SubscriptionId;
use std::future::Future;

impl<P: Clone + Send + Sync + 'static> StateMachine<P> {
    /// Listen for every change of the current state. Receives the new state.
    pub fn on_state_changed<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.listeners.state_changed.subscribe(callback)
    }

    /// Listen for the machine becoming `state`.
    pub fn on_state_changed_to<F, Fut>(&self, state: &State, callback: F) -> SubscriptionId
    where
        F: Fn(State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let name = state.name().to_string();
        self.listeners
            .state_changed
            .subscribe_if(callback, move |current| current.name() == name)
    }

    /// Listen for every state being entered, after the state has changed.
    pub fn on_enter<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.listeners.enter.subscribe(callback)
    }

    pub fn on_enter_state<F, Fut>(&self, state: &State, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let name = state.name().to_string();
        self.listeners
            .enter
            .subscribe_if(callback, move |execution| execution.to.name() == name)
    }

    /// Listen for every state being left, before the state has changed.
    pub fn on_exit<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.listeners.exit.subscribe(callback)
    }

    pub fn on_exit_state<F, Fut>(&self, state: &State, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let name = state.name().to_string();
        self.listeners
            .exit
            .subscribe_if(callback, move |execution| execution.from.name() == name)
    }

    /// Gate every action. Returning `Ok(false)` silently cancels the
    /// invocation before any handler runs.
    ///
    /// Predicates run concurrently with one another and should not have side
    /// effects: a single `false` discards every other verdict.
    pub fn add_predicate<F, Fut>(&self, predicate: F) -> SubscriptionId
    where
        F: Fn(ActionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, CallbackError>> + Send + 'static,
    {
        self.listeners.predicates.subscribe(predicate)
    }

    /// Gate only invocations of actions named like `action`.
    pub fn add_predicate_for<F, Fut>(&self, action: &Action, predicate: F) -> SubscriptionId
    where
        F: Fn(ActionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, CallbackError>> + Send + 'static,
    {
        let name = action.name().to_string();
        self.listeners
            .predicates
            .subscribe_if(predicate, move |execution| execution.action.name() == name)
    }

    /// Run on every action that passes its predicates.
    pub fn add_handler<F, Fut>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(ActionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.listeners.handlers.subscribe(handler)
    }

    pub fn add_handler_for<F, Fut>(&self, action: &Action, handler: F) -> SubscriptionId
    where
        F: Fn(ActionExecution<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let name = action.name().to_string();
        self.listeners
            .handlers
            .subscribe_if(handler, move |execution| execution.action.name() == name)
    }

    /// Listen for every transition about to be taken, before exit listeners
    /// run and before the state changes.
    pub fn on_transition<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionIntent<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.listeners.transitions.subscribe(callback)
    }

    pub fn on_transition_for<F, Fut>(&self, transition: &Transition, callback: F) -> SubscriptionId
    where
        F: Fn(TransitionIntent<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        let name = transition.name().to_string();
        self.listeners
            .transitions
            .subscribe_if(callback, move |intent| intent.transition.name() == name)
    }

    /// Remove a subscription from whichever category holds it.
    ///
    /// Returns `false` if the id is unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let listeners = &self.listeners;
        listeners.state_changed.unsubscribe(id)
            || listeners.enter.unsubscribe(id)
            || listeners.exit.unsubscribe(id)
            || listeners.predicates.unsubscribe(id)
            || listeners.handlers.unsubscribe(id)
            || listeners.transitions.unsubscribe(id)
    }
}
