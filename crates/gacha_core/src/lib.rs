//! Gacha helper core: pure scan state machine and view-model helpers.
mod effect;
mod log_entry;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use log_entry::{
    LogBuffer, LogEntry, LogLevel, ERROR_MARKER, SUCCESS_MARKER, WARNING_MARKER,
};
pub use msg::Msg;
pub use outcome::{request_failed_message, ScanOutcome, NOT_FOUND_GUIDANCE};
pub use state::{AppState, ScanId, ScanState};
pub use update::update;
pub use view_model::{
    AppViewModel, LogLineView, StatusTone, StatusView, EMPTY_LOG_PLACEHOLDER, START_LABEL,
    START_LABEL_BUSY,
};
