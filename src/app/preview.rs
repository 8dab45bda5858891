//! Actions offered on a generated document.

use crate::app::clipboard::ClipboardWriter;
use crate::app::editor::{EditorForm, EditorLauncher};
use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::warn;

/// How long the "Copied" acknowledgment stays up.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// A generated document with its copy and open-in-editor actions.
#[derive(Debug, Clone)]
pub struct LatexPreview {
    latex: String,
    copied_at: Option<Instant>,
}

impl LatexPreview {
    pub fn new(latex: impl Into<String>) -> Self {
        Self {
            latex: latex.into(),
            copied_at: None,
        }
    }

    pub fn latex(&self) -> &str {
        &self.latex
    }

    /// Copy the document to the clipboard.
    ///
    /// Returns whether the copy succeeded. A clipboard failure is logged and otherwise
    /// ignored.
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardWriter) -> bool {
        self.copy_at(clipboard, Instant::now())
    }

    pub fn copy_at(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> bool {
        match clipboard.write_text(&self.latex) {
            Ok(()) => {
                self.copied_at = Some(now);
                true
            }
            Err(e) => {
                warn!("Failed to copy text: {}", e);
                false
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }

    /// Whether the acknowledgment is still showing at `now`.
    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPIED_FEEDBACK)
    }

    pub fn copy_label_at(&self, now: Instant) -> &'static str {
        if self.is_copied_at(now) {
            "Copied"
        } else {
            "Copy Code"
        }
    }

    /// Submit the document to Overleaf through `launcher`.
    pub fn open_in_editor(&self, launcher: &dyn EditorLauncher) -> Result<()> {
        launcher.launch(&EditorForm::overleaf(), &self.latex)
    }
}
