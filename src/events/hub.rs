//! In-process event hub.
//!
//! Named channels fan payloads out to subscriber callbacks. A subscription
//! stays live until its [`Subscription`] is disposed or dropped; after that
//! the callback is never invoked again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

struct Listener {
    id: u64,
    alive: Arc<AtomicBool>,
    callback: Callback,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    channels: HashMap<String, Vec<Listener>>,
}

/// Fan-out of named event streams. Clones share the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every payload published on `channel`.
    pub fn subscribe<F>(&self, channel: &str, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));
        let id = {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = inner.next_id;
            inner
                .channels
                .entry(channel.to_string())
                .or_default()
                .push(Listener {
                    id,
                    alive: alive.clone(),
                    callback: Arc::new(callback),
                });
            id
        };
        debug!(channel, id, "subscribed");

        Subscription {
            hub: Arc::downgrade(&self.inner),
            channel: channel.to_string(),
            id,
            alive,
            disposed: false,
        }
    }

    /// Register a callback that receives payloads decoded as `T`.
    ///
    /// Payloads that do not decode are logged and skipped.
    pub fn subscribe_typed<T, F>(&self, channel: &str, callback: F) -> Subscription
    where
        T: DeserializeOwned,
        F: Fn(T) + Send + Sync + 'static,
    {
        let name = channel.to_string();
        self.subscribe(channel, move |payload| {
            match T::deserialize(payload) {
                Ok(event) => callback(event),
                Err(e) => warn!(channel = %name, error = %e, "dropping undecodable payload"),
            }
        })
    }

    /// Deliver `payload` to every live subscriber of `channel`, in
    /// subscription order. Returns the number of callbacks invoked.
    pub fn publish(&self, channel: &str, payload: &Value) -> usize {
        // Snapshot the listeners so callbacks may subscribe or dispose
        // without deadlocking on the registry.
        let listeners: Vec<(Arc<AtomicBool>, Callback)> = {
            let inner = self.lock();
            match inner.channels.get(channel) {
                Some(list) => list
                    .iter()
                    .map(|l| (l.alive.clone(), l.callback.clone()))
                    .collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;
        for (alive, callback) in listeners {
            if alive.load(Ordering::SeqCst) {
                callback(payload);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of live subscribers on `channel`.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.lock().channels.get(channel).map_or(0, Vec::len)
    }

    /// Total live subscribers across all channels.
    pub fn total_subscribers(&self) -> usize {
        self.lock().channels.values().map(Vec::len).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HubInner> {
        // A panicking callback never holds the lock, so poisoning only means
        // a panic elsewhere; the registry itself is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.total_subscribers())
            .finish()
    }
}

/// Disposer for one subscription.
///
/// [`dispose`](Subscription::dispose) consumes the handle, so it can run
/// only once. Dropping an undisposed handle disposes it.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    channel: String,
    id: u64,
    alive: Arc<AtomicBool>,
    disposed: bool,
}

impl Subscription {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Unsubscribe.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.alive.store(false, Ordering::SeqCst);

        // Hub already gone: nothing left to unregister from.
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut inner = hub.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(list) = inner.channels.get_mut(&self.channel) {
            list.retain(|l| l.id != self.id);
            if list.is_empty() {
                inner.channels.remove(&self.channel);
            }
        }
        debug!(channel = %self.channel, id = self.id, "unsubscribed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}

/// Subscriptions owned by one mounted screen.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Dispose every subscription in the set.
    pub fn dispose_all(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Value) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move |_: &Value| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_publish_reaches_only_matching_channel() {
        let hub = EventHub::new();
        let (a_count, a) = counter();
        let (b_count, b) = counter();
        let _sa = hub.subscribe("a", a);
        let _sb = hub.subscribe("b", b);

        assert_eq!(hub.publish("a", &json!(1)), 1);
        assert_eq!(a_count.load(Ordering::SeqCst), 1);
        assert_eq!(b_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let hub = EventHub::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let l1 = log.clone();
        let l2 = log.clone();
        let _s1 = hub.subscribe("c", move |_| l1.lock().unwrap().push(1));
        let _s2 = hub.subscribe("c", move |_| l2.lock().unwrap().push(2));

        hub.publish("c", &json!(null));
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_dispose_stops_delivery() {
        let hub = EventHub::new();
        let (count, cb) = counter();
        let sub = hub.subscribe("perf", cb);
        hub.publish("perf", &json!({}));
        sub.dispose();

        assert_eq!(hub.publish("perf", &json!({})), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.subscriber_count("perf"), 0);
    }

    #[test]
    fn test_drop_disposes() {
        let hub = EventHub::new();
        let (count, cb) = counter();
        {
            let _sub = hub.subscribe("perf", cb);
            assert_eq!(hub.subscriber_count("perf"), 1);
        }
        hub.publish("perf", &json!({}));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(hub.total_subscribers(), 0);
    }

    #[test]
    fn test_dispose_after_hub_dropped_is_harmless() {
        let hub = EventHub::new();
        let (_count, cb) = counter();
        let sub = hub.subscribe("x", cb);
        drop(hub);
        sub.dispose();
    }

    #[test]
    fn test_dispose_one_keeps_others() {
        let hub = EventHub::new();
        let (c1, cb1) = counter();
        let (c2, cb2) = counter();
        let s1 = hub.subscribe("x", cb1);
        let _s2 = hub.subscribe("x", cb2);
        s1.dispose();

        hub.publish("x", &json!(0));
        assert_eq!(c1.load(Ordering::SeqCst), 0);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_subscribe_during_publish() {
        let hub = EventHub::new();
        let inner_hub = hub.clone();
        let held = Arc::new(Mutex::new(Vec::new()));
        let held_in = held.clone();
        let _s = hub.subscribe("x", move |_| {
            let sub = inner_hub.subscribe("y", |_| {});
            held_in.lock().unwrap().push(sub);
        });
        hub.publish("x", &json!(0));
        assert_eq!(hub.subscriber_count("y"), 1);
    }

    #[test]
    fn test_subscribe_typed_skips_bad_payloads() {
        #[derive(serde::Deserialize)]
        struct P {
            n: u32,
        }
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let _sub = hub.subscribe_typed("t", move |p: P| s.lock().unwrap().push(p.n));

        hub.publish("t", &json!({"n": 3}));
        hub.publish("t", &json!({"wrong": true}));
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_subscription_set_dispose_all() {
        let hub = EventHub::new();
        let mut set = SubscriptionSet::new();
        set.push(hub.subscribe("a", |_| {}));
        set.push(hub.subscribe("b", |_| {}));
        assert_eq!(set.len(), 2);

        set.dispose_all();
        assert!(set.is_empty());
        assert_eq!(hub.total_subscribers(), 0);
    }
}
