use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self(err.to_string())
    }
}

/// Where a found link is copied for the user.
pub trait LinkClipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened for each copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl LinkClipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
