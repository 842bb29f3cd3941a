use std::sync::mpsc;

use gacha_core::Msg;
use gacha_engine::{EventHub, Subscription, LOG_CHANNEL};
use scan_logging::scan_debug;

/// Standing subscription to the log channel for the lifetime of the window.
///
/// Every payload is forwarded as [`Msg::LogReceived`], whatever the scan
/// phase; the controller decides nothing here.
pub struct LogStreamSubscriber {
    subscription: Subscription,
}

impl LogStreamSubscriber {
    pub fn mount(hub: &EventHub, msg_tx: mpsc::Sender<Msg>) -> Self {
        let subscription = hub.listen(LOG_CHANNEL, move |payload| {
            let _ = msg_tx.send(Msg::LogReceived(payload.to_string()));
        });
        scan_debug!("Subscribed to {}", LOG_CHANNEL);
        Self { subscription }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    /// Releases the subscription. Safe to call again.
    pub fn unmount(&mut self) {
        if self.subscription.is_active() {
            scan_debug!("Unsubscribing from {}", LOG_CHANNEL);
        }
        self.subscription.unsubscribe();
    }
}
