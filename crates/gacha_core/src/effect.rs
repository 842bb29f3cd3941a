use crate::ScanId;

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the host's scan command; the answer comes back as
    /// [`crate::Msg::ScanResolved`] carrying the same id.
    RequestScan { scan_id: ScanId },
    /// Close the current window. Safe to execute more than once.
    CloseWindow,
}
