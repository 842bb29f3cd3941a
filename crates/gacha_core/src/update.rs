use scan_logging::{scan_debug, scan_info};

use crate::{AppState, Effect, Msg, ScanState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScanClicked => {
            // Restarting mid-scan is allowed here; the view disables the start
            // control while scanning so it cannot happen from the UI.
            let scan_id = state.start_scan();
            scan_info!("Scan {} started", scan_id);
            vec![Effect::RequestScan { scan_id }]
        }
        Msg::LogReceived(message) => {
            state.append_log(message);
            Vec::new()
        }
        Msg::ScanResolved { scan_id, outcome } => {
            if state.resolve_scan(scan_id, outcome) {
                scan_info!("Scan {} finished: {}", scan_id, kind_of(state.scan_state()));
            } else {
                scan_debug!(
                    "Ignoring resolution for scan {} (active: {:?})",
                    scan_id,
                    state.active_scan()
                );
            }
            Vec::new()
        }
        Msg::CloseClicked => vec![Effect::CloseWindow],
    };

    (state, effects)
}

fn kind_of(scan: &ScanState) -> &'static str {
    match scan {
        ScanState::Idle => "idle",
        ScanState::Scanning => "scanning",
        ScanState::Succeeded { .. } => "succeeded",
        ScanState::Failed => "failed",
    }
}
