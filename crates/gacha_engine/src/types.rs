use thiserror::Error;

pub type ScanId = u64;

/// What the scan command answers: a link, no link, or a failure.
pub type ScanResponse = Result<Option<String>, ScanError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Exactly one per requested scan.
    ScanFinished { scan_id: ScanId, result: ScanResponse },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scan host is not running")]
    HostUnavailable,
    #[error("scan aborted: {0}")]
    Aborted(String),
    #[error("scan runtime unavailable: {0}")]
    Runtime(String),
    #[error("invalid scan settings: {0}")]
    InvalidSettings(String),
}
