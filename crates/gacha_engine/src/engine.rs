use std::any::Any;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use scan_logging::{scan_error, scan_info, scan_warn};

use crate::bridge::HubLogSink;
use crate::{EngineEvent, EventHub, ScanError, ScanId, ScanResponse, UrlScanner, SCAN_COMMAND};

enum EngineCommand {
    Scan { scan_id: ScanId },
}

/// Runs scan commands on a dedicated thread and reports their results.
///
/// Progress messages go out on the hub's log channel while a scan runs; the
/// final answer for each request arrives as one [`EngineEvent::ScanFinished`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(scanner: Arc<dyn UrlScanner>, hub: EventHub) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker_tx = event_tx.clone();

        let spawned = thread::Builder::new()
            .name("scan-engine".to_string())
            .spawn(move || run_worker(scanner, hub, cmd_rx, worker_tx));
        if let Err(err) = spawned {
            // The command receiver is gone with the closure; requests report HostUnavailable.
            scan_error!("Failed to start scan engine thread: {}", err);
        }

        Self {
            cmd_tx,
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Issues the scan command. Never blocks on the scan itself.
    pub fn request_scan(&self, scan_id: ScanId) {
        if self.cmd_tx.send(EngineCommand::Scan { scan_id }).is_err() {
            scan_warn!("Scan engine is gone; failing scan {}", scan_id);
            let _ = self.event_tx.send(EngineEvent::ScanFinished {
                scan_id,
                result: Err(ScanError::HostUnavailable),
            });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout)
            .ok()
    }
}

fn run_worker(
    scanner: Arc<dyn UrlScanner>,
    hub: EventHub,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            scan_error!("Failed to build scan runtime: {}", err);
            let reason = err.to_string();
            while let Ok(EngineCommand::Scan { scan_id }) = cmd_rx.recv() {
                let _ = event_tx.send(EngineEvent::ScanFinished {
                    scan_id,
                    result: Err(ScanError::Runtime(reason.clone())),
                });
            }
            return;
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        let scanner = Arc::clone(&scanner);
        let sink = HubLogSink::new(hub.clone());
        let event_tx = event_tx.clone();
        runtime.spawn(async move {
            handle_command(scanner, sink, command, event_tx).await;
        });
    }
}

async fn handle_command(
    scanner: Arc<dyn UrlScanner>,
    sink: HubLogSink,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Scan { scan_id } => {
            scan_info!("Running {} for scan {}", SCAN_COMMAND, scan_id);
            let task = tokio::spawn(async move { scanner.scan(&sink).await });
            let result: ScanResponse = match task.await {
                Ok(result) => result,
                Err(err) if err.is_panic() => Err(ScanError::Aborted(panic_message(
                    err.into_panic().as_ref(),
                ))),
                Err(err) => Err(ScanError::Aborted(err.to_string())),
            };
            if let Err(err) = &result {
                scan_warn!("Scan {} failed: {}", scan_id, err);
            }
            let _ = event_tx.send(EngineEvent::ScanFinished { scan_id, result });
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "scan task panicked".to_string())
}
