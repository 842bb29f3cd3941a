use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gacha_core::{Effect, Msg, ScanOutcome};
use gacha_engine::{EngineEvent, EngineHandle};
use scan_logging::{redact_url, scan_info, scan_warn};

const ENGINE_POLL: Duration = Duration::from_millis(50);

/// Close flag for the current window. Closing more than once is harmless.
#[derive(Debug, Clone, Default)]
pub struct WindowControl {
    closed: Arc<AtomicBool>,
}

impl WindowControl {
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            scan_info!("Window close requested");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    window: WindowControl,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, window: WindowControl, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine, window };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestScan { scan_id } => {
                    scan_info!("RequestScan scan_id={}", scan_id);
                    self.engine.request_scan(scan_id);
                }
                Effect::CloseWindow => self.window.close(),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        let window = self.window.clone();
        thread::spawn(move || {
            while !window.is_closed() {
                let Some(EngineEvent::ScanFinished { scan_id, result }) =
                    engine.recv_timeout(ENGINE_POLL)
                else {
                    continue;
                };
                let outcome = ScanOutcome::from_response(result);
                match &outcome {
                    ScanOutcome::Found(url) => {
                        scan_info!("Scan {} found {}", scan_id, redact_url(url))
                    }
                    ScanOutcome::NotFound => scan_info!("Scan {} found nothing", scan_id),
                    ScanOutcome::Failed(reason) => {
                        scan_warn!("Scan {} failed: {}", scan_id, reason)
                    }
                }
                if msg_tx.send(Msg::ScanResolved { scan_id, outcome }).is_err() {
                    break;
                }
            }
        });
    }
}
