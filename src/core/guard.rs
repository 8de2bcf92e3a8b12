//! Guard predicates for filtering notifications.
//!
//! Guards are pure boolean functions over the value being delivered.
//! Filtered subscriptions wrap their callback with one, so the callback only
//! runs (and only contributes a result) when the guard holds.

use std::sync::Arc;

/// Pure predicate over a notification value.
///
/// # Example
///
/// ```rust
/// use actuate::core::Guard;
///
/// let even = Guard::new(|n: &u32| n % 2 == 0);
///
/// assert!(even.check(&4));
/// assert!(!even.check(&7));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and side-effect free; it is
    /// evaluated synchronously while a notification is being fanned out.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}
