//! Hand-off of a generated document to an online LaTeX editor.
//!
//! The document travels as an ordinary HTML form POST, exactly as if the user had
//! submitted a form in their browser. A small self-submitting page is written to disk
//! and opened with the platform's browser launcher; no response is read back. The pages
//! live until the launcher that wrote them is dropped.

use crate::error::{LatexGeniusError, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const OVERLEAF_DOCS_URL: &str = "https://www.overleaf.com/docs";
pub const SNIPPET_FIELD: &str = "snip";

/// A form-submission target that accepts a document in a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub action: String,
    pub field: String,
}

impl EditorForm {
    /// Overleaf's "open a snippet" endpoint.
    pub fn overleaf() -> Self {
        Self {
            action: OVERLEAF_DOCS_URL.to_string(),
            field: SNIPPET_FIELD.to_string(),
        }
    }

    /// Render a page that POSTs `text` to the editor as soon as it loads.
    pub fn render_html(&self, text: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Opening in editor...</title></head>
<body onload="document.forms[0].submit()">
<form action="{action}" method="post">
<textarea name="{field}" hidden>{text}</textarea>
<noscript><button type="submit">Open in editor</button></noscript>
</form>
</body>
</html>
"#,
            action = escape_html(&self.action),
            field = escape_html(&self.field),
            text = escape_html(text),
        )
    }
}

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Opens a document in an external editor.
pub trait EditorLauncher {
    fn launch(&self, form: &EditorForm, text: &str) -> Result<()>;
}

/// Writes the submission page to a directory and opens it in the default browser.
///
/// Every page written is deleted by [`BrowserLauncher::cleanup`], which also runs on drop.
pub struct BrowserLauncher {
    dir: PathBuf,
    written: RefCell<Vec<PathBuf>>,
}

impl Default for BrowserLauncher {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl BrowserLauncher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: RefCell::new(Vec::new()),
        }
    }

    /// Write the submission page and return its path.
    pub fn write_form(&self, form: &EditorForm, text: &str) -> Result<PathBuf> {
        let path = self.dir.join(format!("latexgenius-{}.html", Uuid::new_v4()));
        std::fs::write(&path, form.render_html(text))?;
        debug!("Wrote editor form to {}", path.display());
        self.written.borrow_mut().push(path.clone());
        Ok(path)
    }

    /// Delete the pages written so far.
    pub fn cleanup(&self) {
        for path in self.written.borrow_mut().drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Removed editor form {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for BrowserLauncher {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl EditorLauncher for BrowserLauncher {
    fn launch(&self, form: &EditorForm, text: &str) -> Result<()> {
        let path = self.write_form(form, text)?;
        info!("Opening {} in the browser", form.action);

        let status = browser_command(&path).status().map_err(|e| {
            LatexGeniusError::EditorError(format!("could not start the browser: {}", e))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(LatexGeniusError::EditorError(format!("browser launcher exited with {}", status)))
        }
    }
}

#[cfg(target_os = "macos")]
fn browser_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn browser_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
