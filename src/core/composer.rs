//! # Composer
//!
//! Draft text and pending attachments for the active thread, held until send.

use std::path::PathBuf;

/// A file picked for attachment but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    /// Declared MIME type, as reported by the picker.
    pub mime: String,
    pub path: PathBuf,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
    attachments: Vec<PendingFile>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachments(&self) -> &[PendingFile] {
        &self.attachments
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    pub fn add_attachment(&mut self, file: PendingFile) {
        self.attachments.push(file);
    }

    /// Remove the attachment at `index`, returning it. Out of range is a no-op.
    pub fn remove_attachment(&mut self, index: usize) -> Option<PendingFile> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.attachments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attachments.is_empty()
    }

    /// Whether there is anything worth sending (whitespace doesn't count).
    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty() || !self.attachments.is_empty()
    }
}
