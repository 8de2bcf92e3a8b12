//! Ordered callback registry for a single event category.

use super::{listener, Listener, SubscriptionId};
use crate::core::Guard;
use crate::error::CallbackError;
use futures::future::join_all;
use parking_lot::RwLock;
use std::future::Future;

struct Entry<T, R> {
    id: SubscriptionId,
    callback: Listener<T, R>,
    guard: Option<Guard<T>>,
}

/// Ordered collection of callbacks for one event category.
///
/// The registry is shared behind `&self`; callbacks may subscribe or
/// unsubscribe while a notification is in flight; such changes apply to the
/// next notification.
///
/// # Example
///
/// ```rust
/// use actuate::listener::ListenerRegistry;
///
/// # futures::executor::block_on(async {
/// let registry: ListenerRegistry<u32, String> = ListenerRegistry::new();
/// registry.subscribe(|n| async move { Ok(format!("all {n}")) });
/// registry.subscribe_if(|n| async move { Ok(format!("big {n}")) }, |n| *n > 10);
///
/// assert_eq!(registry.notify(3).await.unwrap(), vec!["all 3"]);
/// assert_eq!(registry.notify(30).await.unwrap(), vec!["all 30", "big 30"]);
/// # });
/// ```
pub struct ListenerRegistry<T, R = ()> {
    entries: RwLock<Vec<Entry<T, R>>>,
}

impl<T, R> ListenerRegistry<T, R>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an unconditional callback.
    pub fn subscribe<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, CallbackError>> + Send + 'static,
    {
        self.subscribe_listener(listener(callback), None)
    }

    /// Append a callback that only fires when `predicate` holds for the
    /// delivered value. The predicate runs without the registry locked.
    pub fn subscribe_if<F, Fut, G>(&self, callback: F, predicate: G) -> SubscriptionId
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, CallbackError>> + Send + 'static,
        G: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.subscribe_listener(listener(callback), Some(Guard::new(predicate)))
    }

    /// Append an already boxed callback, optionally guarded.
    pub fn subscribe_listener(
        &self,
        callback: Listener<T, R>,
        guard: Option<Guard<T>>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.entries.write().push(Entry {
            id,
            callback,
            guard,
        });
        id
    }

    /// Remove a subscription, conditional or not. Returns `false` if the id
    /// is not registered here.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.read().iter().any(|entry| entry.id == id)
    }

    /// Deliver `value` to every matching callback.
    ///
    /// All matching callbacks are started in registration order and awaited
    /// together. Results come back in registration order; guarded callbacks
    /// whose guard rejected the value contribute nothing. If any callback
    /// fails, the first failure in registration order is returned once every
    /// callback has settled.
    pub async fn notify(&self, value: T) -> Result<Vec<R>, CallbackError> {
        let callbacks = self.matching(&value);
        if callbacks.is_empty() {
            return Ok(Vec::new());
        }

        tracing::trace!(listeners = callbacks.len(), "notifying listeners");
        let pending = callbacks
            .iter()
            .map(|callback| callback(value.clone()))
            .collect::<Vec<_>>();

        join_all(pending).await.into_iter().collect()
    }

    /// Guards run after the lock is released, so they may touch the registry.
    fn matching(&self, value: &T) -> Vec<Listener<T, R>> {
        let snapshot = self
            .entries
            .read()
            .iter()
            .map(|entry| (entry.callback.clone(), entry.guard.clone()))
            .collect::<Vec<_>>();

        snapshot
            .into_iter()
            .filter(|(_, guard)| guard.as_ref().is_none_or(|g| g.check(value)))
            .map(|(callback, _)| callback)
            .collect()
    }

    /// Remove every subscription. The registry stays usable.
    pub fn dispose_all(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T, R> Default for ListenerRegistry<T, R>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
