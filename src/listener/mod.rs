//! Generic listener registry.
//!
//! A [`ListenerRegistry`] holds the ordered callbacks for one event
//! category. Callbacks are asynchronous: [`notify`](ListenerRegistry::notify)
//! starts every matching callback in registration order, then waits for all
//! of them before returning their results, again in registration order.
//! Completion order between sibling callbacks is unspecified.
//!
//! Conditional subscriptions pair a callback with a [`Guard`]; the callback
//! only runs, and only contributes a result, when the guard holds for the
//! value being delivered. Either kind of subscription is removed through the
//! [`SubscriptionId`] returned when it was registered.

mod registry;

pub use registry::ListenerRegistry;

use crate::error::CallbackError;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// Boxed asynchronous callback receiving a `T` and producing an `R`.
pub type Listener<T, R = ()> =
    Arc<dyn Fn(T) -> BoxFuture<'static, Result<R, CallbackError>> + Send + Sync>;

/// Box an async closure into a [`Listener`].
pub fn listener<T, R, F, Fut>(callback: F) -> Listener<T, R>
where
    T: 'static,
    R: 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, CallbackError>> + Send + 'static,
{
    Arc::new(move |value: T| callback(value).boxed())
}

/// Handle identifying one subscription.
///
/// Returned by every subscribe call and accepted by every unsubscribe call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
