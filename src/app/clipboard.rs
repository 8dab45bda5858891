use crate::error::{LatexGeniusError, Result};

/// Destination for the copy action.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard.
///
/// The handle is opened on first use and kept, since on some platforms the copied text
/// is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot @ None => slot.insert(
                arboard::Clipboard::new()
                    .map_err(|e| LatexGeniusError::ClipboardError(e.to_string()))?,
            ),
        };

        clipboard
            .set_text(text.to_string())
            .map_err(|e| LatexGeniusError::ClipboardError(e.to_string()))
    }
}
