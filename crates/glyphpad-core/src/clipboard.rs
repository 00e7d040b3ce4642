//! Clipboard transport.
//!
//! The editor only talks to a [`Clipboard`] on explicit copy, cut and paste.
//! Tests and headless hosts use [`MemoryClipboard`]; desktop hosts can
//! enable the `system-clipboard` feature for [`SystemClipboard`].

/// Clipboard errors.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard access failed: {0}")]
    Access(String),
}

/// Where copied text goes and pasted text comes from.
pub trait Clipboard {
    /// Returns the clipboard text, or `None` if it holds no text.
    fn read(&mut self) -> Result<Option<String>, ClipboardError>;

    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A process-local clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard already holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<Option<String>, ClipboardError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The operating system clipboard.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<Option<String>, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::Access(e.to_string())),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read().unwrap(), None);

        clipboard.write("hello").unwrap();
        assert_eq!(clipboard.read().unwrap().as_deref(), Some("hello"));
        assert_eq!(clipboard.contents(), Some("hello"));
    }
}
