use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use super::client::EventV1;

type SubscriberMap = Arc<RwLock<HashMap<u64, UnboundedSender<EventV1>>>>;

/// In-process broadcast channel pushing events to connected viewers
///
/// Subscribers only ever receive events published while they are connected;
/// there is no backlog or replay.
#[derive(Clone, Default)]
pub struct Fanout {
    subscribers: SubscriberMap,
    counter: Arc<AtomicU64>,
}

/// Handle to a live subscription
///
/// Dropping the handle unsubscribes.
pub struct Subscription {
    id: u64,
    subscribers: SubscriberMap,

    /// Stream of events published while this subscription is alive,
    /// in publish order
    pub rx: UnboundedReceiver<EventV1>,
}

impl Fanout {
    /// Register a new subscriber
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = unbounded();
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().unwrap().insert(id, tx);

        Subscription {
            id,
            subscribers: Arc::clone(&self.subscribers),
            rx,
        }
    }

    /// Deliver an event to every subscriber connected right now
    ///
    /// The subscriber set is snapshotted before delivery, so connects and
    /// disconnects never race an in-flight publish. Delivery itself is
    /// fire-and-forget: a dead subscriber is logged and skipped without
    /// affecting the others or the caller.
    pub fn publish(&self, event: EventV1) {
        let targets: Vec<(u64, UnboundedSender<EventV1>)> = {
            let subscribers = self.subscribers.read().unwrap();
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        for (id, tx) in targets {
            if tx.unbounded_send(event.clone()).is_err() {
                debug!("Failed to deliver event to subscriber {id}.");
            }
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap().len()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.subscribers.write().unwrap().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::client::Ping;

    fn event(n: usize) -> EventV1 {
        EventV1::Pong {
            data: Ping::Number(n),
        }
    }

    fn next_number(subscription: &mut Subscription) -> Option<usize> {
        match subscription.rx.try_next() {
            Ok(Some(EventV1::Pong {
                data: Ping::Number(n),
            })) => Some(n),
            _ => None,
        }
    }

    #[test]
    fn delivery_is_fifo_per_subscriber() {
        let fanout = Fanout::default();
        let mut subscription = fanout.subscribe();

        for n in 0..10 {
            fanout.publish(event(n));
        }

        for n in 0..10 {
            assert_eq!(next_number(&mut subscription), Some(n));
        }
        assert!(next_number(&mut subscription).is_none());
    }

    #[test]
    fn late_subscriber_misses_earlier_events() {
        let fanout = Fanout::default();

        let mut first = fanout.subscribe();
        fanout.publish(event(1));

        let mut second = fanout.subscribe();
        fanout.publish(event(2));

        assert_eq!(next_number(&mut first), Some(1));
        assert_eq!(next_number(&mut first), Some(2));
        assert!(next_number(&mut first).is_none());

        assert_eq!(next_number(&mut second), Some(2));
        assert!(next_number(&mut second).is_none());
    }

    #[test]
    fn dead_subscriber_does_not_affect_others() {
        let fanout = Fanout::default();

        let mut dead = fanout.subscribe();
        let mut live = fanout.subscribe();

        // Simulate a dead connection whose handle has not been cleaned up yet.
        dead.rx.close();

        fanout.publish(event(7));

        assert_eq!(next_number(&mut live), Some(7));
        assert!(next_number(&mut dead).is_none());
    }

    #[test]
    fn dropping_the_handle_unsubscribes() {
        let fanout = Fanout::default();

        let first = fanout.subscribe();
        let second = fanout.subscribe();
        assert_eq!(fanout.subscriber_count(), 2);

        drop(first);
        assert_eq!(fanout.subscriber_count(), 1);

        drop(second);
        assert_eq!(fanout.subscriber_count(), 0);
    }
}
