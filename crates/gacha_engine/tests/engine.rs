use std::sync::{Arc, Mutex};
use std::time::Duration;

use gacha_engine::{
    EngineEvent, EngineHandle, EventHub, LogSink, ScanError, ScanResponse, UrlScanner,
    LOG_CHANNEL,
};

const WAIT: Duration = Duration::from_secs(5);

struct ScriptedScanner {
    messages: Vec<&'static str>,
    response: ScanResponse,
}

#[async_trait::async_trait]
impl UrlScanner for ScriptedScanner {
    async fn scan(&self, sink: &dyn LogSink) -> ScanResponse {
        for message in &self.messages {
            sink.emit(message);
        }
        self.response.clone()
    }
}

struct PanickingScanner;

#[async_trait::async_trait]
impl UrlScanner for PanickingScanner {
    async fn scan(&self, _sink: &dyn LogSink) -> ScanResponse {
        panic!("registry exploded");
    }
}

#[test]
fn scan_streams_logs_then_reports_result() {
    let hub = EventHub::new();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let mut subscription = hub.listen(LOG_CHANNEL, move |payload| {
        sink.lock().unwrap().push(payload.to_string());
    });

    let scanner = ScriptedScanner {
        messages: vec!["初始化...", "扫描中..."],
        response: Ok(Some("https://example.com/gacha?x=1".to_string())),
    };
    let engine = EngineHandle::new(Arc::new(scanner), hub.clone());
    engine.request_scan(7);

    let event = engine.recv_timeout(WAIT).expect("scan finished");
    assert_eq!(
        event,
        EngineEvent::ScanFinished {
            scan_id: 7,
            result: Ok(Some("https://example.com/gacha?x=1".to_string())),
        }
    );
    assert_eq!(*received.lock().unwrap(), vec!["初始化...", "扫描中..."]);

    subscription.unsubscribe();
}

#[test]
fn empty_result_is_reported_as_none() {
    let scanner = ScriptedScanner {
        messages: Vec::new(),
        response: Ok(None),
    };
    let engine = EngineHandle::new(Arc::new(scanner), EventHub::new());
    engine.request_scan(1);

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ScanFinished {
            scan_id: 1,
            result: Ok(None),
        })
    );
}

#[test]
fn panicking_scanner_is_reported_as_aborted() {
    let engine = EngineHandle::new(Arc::new(PanickingScanner), EventHub::new());
    engine.request_scan(3);

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::ScanFinished {
            scan_id: 3,
            result: Err(ScanError::Aborted(message)),
        }) => assert!(message.contains("registry exploded")),
        other => panic!("unexpected event {other:?}"),
    }

    // The worker survives a panicking scan.
    engine.request_scan(4);
    assert!(matches!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ScanFinished { scan_id: 4, .. })
    ));
}

#[test]
fn try_recv_is_empty_before_any_request() {
    let scanner = ScriptedScanner {
        messages: Vec::new(),
        response: Ok(None),
    };
    let engine = EngineHandle::new(Arc::new(scanner), EventHub::new());
    assert_eq!(engine.try_recv(), None);
}
