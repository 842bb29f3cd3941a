/// Marker glyph the scanner puts in success messages.
pub const SUCCESS_MARKER: &str = "✅";
/// Marker glyph for errors.
pub const ERROR_MARKER: &str = "❌";
/// Marker glyph for warnings (with the emoji variation selector).
pub const WARNING_MARKER: &str = "⚠️";

/// Presentation class of a log line. Never consulted by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Classifies a raw message by its marker glyph.
    ///
    /// Success wins over error, and error over warning, when a message carries
    /// more than one marker.
    pub fn classify(message: &str) -> Self {
        if message.contains(SUCCESS_MARKER) {
            LogLevel::Success
        } else if message.contains(ERROR_MARKER) {
            LogLevel::Error
        } else if message.contains(WARNING_MARKER) {
            LogLevel::Warning
        } else {
            LogLevel::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    level: LogLevel,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let level = LogLevel::classify(&text);
        Self { text, level }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Append-only sequence of log entries.
///
/// Entries cannot be edited or removed individually; the whole buffer is reset
/// when a new scan starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(LogEntry::text).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
