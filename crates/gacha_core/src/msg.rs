#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed the start control.
    ScanClicked,
    /// A payload arrived on the log channel.
    LogReceived(String),
    /// The scan command answered.
    ScanResolved {
        scan_id: crate::ScanId,
        outcome: crate::ScanOutcome,
    },
    /// User asked to close the window.
    CloseClicked,
}
