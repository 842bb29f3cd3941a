use crate::outcome::{request_failed_message, NOT_FOUND_GUIDANCE};
use crate::view_model::AppViewModel;
use crate::{LogBuffer, LogEntry, ScanOutcome};

pub type ScanId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
    Succeeded {
        url: String,
    },
    Failed,
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Succeeded { .. } | ScanState::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    scan: ScanState,
    logs: LogBuffer,
    active_scan: Option<ScanId>,
    last_scan_id: ScanId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(&self.scan, &self.logs, self.dirty)
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.scan
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn active_scan(&self) -> Option<ScanId> {
        self.active_scan
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Resets logs and result, then enters `Scanning` under a fresh id.
    pub(crate) fn start_scan(&mut self) -> ScanId {
        self.logs.clear();
        self.last_scan_id += 1;
        let scan_id = self.last_scan_id;
        self.active_scan = Some(scan_id);
        self.scan = ScanState::Scanning;
        self.mark_dirty();
        scan_id
    }

    pub(crate) fn append_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
        self.mark_dirty();
    }

    /// Applies a resolution for `scan_id`. Returns `false` when the id is not
    /// the scan currently in flight.
    pub(crate) fn resolve_scan(&mut self, scan_id: ScanId, outcome: ScanOutcome) -> bool {
        if self.active_scan != Some(scan_id) || self.scan != ScanState::Scanning {
            return false;
        }
        self.active_scan = None;
        self.scan = match outcome {
            ScanOutcome::Found(url) if !url.trim().is_empty() => ScanState::Succeeded { url },
            ScanOutcome::Found(_) | ScanOutcome::NotFound => {
                self.logs.push(LogEntry::new(NOT_FOUND_GUIDANCE));
                ScanState::Failed
            }
            ScanOutcome::Failed(description) => {
                self.logs
                    .push(LogEntry::new(request_failed_message(&description)));
                ScanState::Failed
            }
        };
        self.mark_dirty();
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
