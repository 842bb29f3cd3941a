use crate::{LogSink, ScanResponse};

/// The background operation behind the scan command.
///
/// Implementations report progress through `sink` while they run and resolve
/// once with the discovered link, `None`, or an error.
#[async_trait::async_trait]
pub trait UrlScanner: Send + Sync {
    async fn scan(&self, sink: &dyn LogSink) -> ScanResponse;
}
