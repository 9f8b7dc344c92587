use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, Weak};

use super::types::MediaEvent;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Sender<MediaEvent>)>,
}

/// Fan-out point for media events. Cloning shares the same subscriber list.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener. It stays registered until the returned
    /// `Subscription` is dropped.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = match self.registry.lock() {
            Ok(mut reg) => {
                let id = reg.next_id;
                reg.next_id += 1;
                reg.subscribers.push((id, tx));
                id
            }
            Err(_) => u64::MAX,
        };

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&self, event: MediaEvent) {
        if let Ok(mut reg) = self.registry.lock() {
            reg.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .map(|reg| reg.subscribers.len())
            .unwrap_or(0)
    }
}

/// A registered listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    rx: Receiver<MediaEvent>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Drain the events received so far without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = MediaEvent> + '_ {
        self.rx.try_iter()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut reg) = registry.lock() {
                let id = self.id;
                reg.subscribers.retain(|(sid, _)| *sid != id);
            }
        }
    }
}
