//! In-process messaging bridge between the scan host and the view.
//!
//! Listeners register on a named channel and get back a [`Subscription`]. The
//! subscription is released explicitly with [`Subscription::unsubscribe`];
//! dropping it leaves the listener registered.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Channel carrying one human-readable progress message per delivery.
pub const LOG_CHANNEL: &str = "log-message";
/// Name of the one-shot scan command.
pub const SCAN_COMMAND: &str = "scan_gacha_url";

type Listener = Arc<dyn Fn(&str) + Send + Sync>;
type ListenerId = u64;

struct Registration {
    id: ListenerId,
    channel: String,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: Vec<Registration>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &lock(&self.registry).listeners.len())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every payload emitted on `channel`.
    pub fn listen<F>(&self, channel: &str, listener: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.listeners.push(Registration {
            id,
            channel: channel.to_string(),
            listener: Arc::new(listener),
        });
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Delivers `payload` to the listeners of `channel` in registration order
    /// and returns how many received it.
    ///
    /// Listeners run outside the registry lock, so they may subscribe or
    /// unsubscribe while handling a payload.
    pub fn emit(&self, channel: &str, payload: &str) -> usize {
        let targets: Vec<Listener> = lock(&self.registry)
            .listeners
            .iter()
            .filter(|registration| registration.channel == channel)
            .map(|registration| Arc::clone(&registration.listener))
            .collect();
        for listener in &targets {
            listener(payload);
        }
        targets.len()
    }

    pub fn listener_count(&self, channel: &str) -> usize {
        lock(&self.registry)
            .listeners
            .iter()
            .filter(|registration| registration.channel == channel)
            .count()
    }
}

/// Handle for one listener registration.
#[derive(Debug, Default)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: Option<ListenerId>,
}

impl Subscription {
    /// A handle that was never registered. Unsubscribing it does nothing.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Removes the listener. Only the first call has an effect; later calls,
    /// or calls after the hub is gone, are no-ops.
    pub fn unsubscribe(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry)
                .listeners
                .retain(|registration| registration.id != id);
        }
    }
}

/// Destination for progress messages produced while a scan runs.
pub trait LogSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Publishes progress messages on [`LOG_CHANNEL`].
#[derive(Debug, Clone)]
pub struct HubLogSink {
    hub: EventHub,
}

impl HubLogSink {
    pub fn new(hub: EventHub) -> Self {
        Self { hub }
    }
}

impl LogSink for HubLogSink {
    fn emit(&self, message: &str) {
        self.hub.emit(LOG_CHANNEL, message);
    }
}
