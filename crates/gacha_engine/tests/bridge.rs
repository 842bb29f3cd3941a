use std::sync::{Arc, Mutex};

use gacha_engine::{EventHub, HubLogSink, LogSink, Subscription, LOG_CHANNEL};

fn recording_listener(
    hub: &EventHub,
    channel: &str,
) -> (Subscription, Arc<Mutex<Vec<String>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let subscription = hub.listen(channel, move |payload| {
        sink.lock().unwrap().push(payload.to_string());
    });
    (subscription, received)
}

#[test]
fn payloads_arrive_in_emission_order() {
    let hub = EventHub::new();
    let (_subscription, received) = recording_listener(&hub, LOG_CHANNEL);

    for message in ["初始化...", "扫描中...", "初始化..."] {
        hub.emit(LOG_CHANNEL, message);
    }

    assert_eq!(
        *received.lock().unwrap(),
        vec!["初始化...", "扫描中...", "初始化..."]
    );
}

#[test]
fn channels_are_isolated() {
    let hub = EventHub::new();
    let (_subscription, received) = recording_listener(&hub, LOG_CHANNEL);

    let delivered = hub.emit("other-channel", "ignored");

    assert_eq!(delivered, 0);
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn unsubscribe_stops_delivery() {
    let hub = EventHub::new();
    let (mut subscription, received) = recording_listener(&hub, LOG_CHANNEL);
    hub.emit(LOG_CHANNEL, "one");

    subscription.unsubscribe();
    hub.emit(LOG_CHANNEL, "two");

    assert_eq!(*received.lock().unwrap(), vec!["one"]);
    assert_eq!(hub.listener_count(LOG_CHANNEL), 0);
    assert!(!subscription.is_active());
}

#[test]
fn unsubscribing_twice_is_harmless() {
    let hub = EventHub::new();
    let (mut first, _) = recording_listener(&hub, LOG_CHANNEL);
    let (_second, received) = recording_listener(&hub, LOG_CHANNEL);

    first.unsubscribe();
    first.unsubscribe();

    assert_eq!(hub.listener_count(LOG_CHANNEL), 1);
    hub.emit(LOG_CHANNEL, "still here");
    assert_eq!(*received.lock().unwrap(), vec!["still here"]);
}

#[test]
fn detached_subscription_can_be_released() {
    let mut subscription = Subscription::detached();
    assert!(!subscription.is_active());
    subscription.unsubscribe();
    subscription.unsubscribe();
}

#[test]
fn unsubscribe_after_hub_dropped_is_harmless() {
    let hub = EventHub::new();
    let (mut subscription, _) = recording_listener(&hub, LOG_CHANNEL);
    drop(hub);

    subscription.unsubscribe();
    assert!(!subscription.is_active());
}

#[test]
fn listener_may_unsubscribe_itself_while_handling() {
    let hub = EventHub::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let inner = Arc::clone(&slot);
    let subscription = hub.listen(LOG_CHANNEL, move |_| {
        if let Some(subscription) = inner.lock().unwrap().as_mut() {
            subscription.unsubscribe();
        }
    });
    *slot.lock().unwrap() = Some(subscription);

    assert_eq!(hub.emit(LOG_CHANNEL, "first"), 1);
    assert_eq!(hub.emit(LOG_CHANNEL, "second"), 0);
}

#[test]
fn hub_sink_publishes_on_log_channel() {
    let hub = EventHub::new();
    let (_subscription, received) = recording_listener(&hub, LOG_CHANNEL);

    HubLogSink::new(hub.clone()).emit("🔎 发现潜在游戏目录: D:/Games");

    assert_eq!(
        *received.lock().unwrap(),
        vec!["🔎 发现潜在游戏目录: D:/Games"]
    );
}
