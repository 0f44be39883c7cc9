//! In-process change notification bus.
//!
//! The browser storefront kept its header badge, drawer, and cart page in
//! sync by dispatching a custom event on the window after every write. The
//! equivalent here is an explicit publish/subscribe channel owned by the
//! store object itself: observers register a callback and hold a
//! [`Subscription`] guard; dropping the guard unsubscribes, so there are no
//! leaks from forgotten listeners.
//!
//! Delivery is synchronous and best-effort: subscribers run on the writing
//! thread, in registration order, and a panicking subscriber is isolated
//! from the rest.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// A publish/subscribe channel broadcasting the full collection after each
/// write.
pub struct ChangeBus<T> {
    inner: Mutex<BusInner<T>>,
}

struct BusInner<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

impl<T> Default for ChangeBus<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BusInner {
                next_id: 0,
                subscribers: Vec::new(),
            }),
        }
    }
}

impl<T> ChangeBus<T> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. The returned guard unsubscribes on drop.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> Subscription<T>
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        Subscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Deliver `items` to every current subscriber, synchronously.
    ///
    /// Callbacks run outside the bus lock, so a subscriber may re-enter the
    /// store. A panicking subscriber does not affect the others.
    pub fn publish(&self, items: &[T]) {
        let callbacks: Vec<Callback<T>> = self
            .lock()
            .subscribers
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in callbacks {
            if std::panic::catch_unwind(AssertUnwindSafe(|| callback(items))).is_err() {
                tracing::warn!("Store change subscriber panicked");
            }
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BusInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII guard for a bus subscription; dropping it unsubscribes.
pub struct Subscription<T> {
    bus: Weak<ChangeBus<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_all_subscribers_receive_payload() {
        let bus: Arc<ChangeBus<u32>> = Arc::new(ChangeBus::new());
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let first_seen = Arc::clone(&first);
        let _sub_a = bus.subscribe(move |items| {
            first_seen.lock().expect("lock").push(items.to_vec());
        });
        let second_seen = Arc::clone(&second);
        let _sub_b = bus.subscribe(move |items| {
            second_seen.lock().expect("lock").push(items.to_vec());
        });

        bus.publish(&[1, 2, 3]);

        // Delivery completes before publish returns
        assert_eq!(*first.lock().expect("lock"), vec![vec![1, 2, 3]]);
        assert_eq!(*second.lock().expect("lock"), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let bus: Arc<ChangeBus<u32>> = Arc::new(ChangeBus::new());
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let sub = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&[1]);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(&[2]);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let bus: Arc<ChangeBus<u32>> = Arc::new(ChangeBus::new());
        let count = Arc::new(AtomicUsize::new(0));

        let _panicky = bus.subscribe(|_| panic!("subscriber failure"));
        let counter = Arc::clone(&count);
        let _healthy = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&[1]);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publishes_are_observed_in_order() {
        let bus: Arc<ChangeBus<u32>> = Arc::new(ChangeBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _sub = bus.subscribe(move |items| {
            sink.lock().expect("lock").extend_from_slice(items);
        });

        bus.publish(&[1]);
        bus.publish(&[2]);
        bus.publish(&[3]);

        assert_eq!(*seen.lock().expect("lock"), vec![1, 2, 3]);
    }
}
