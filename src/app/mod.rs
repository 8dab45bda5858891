pub mod clipboard;
pub mod controller;
pub mod editor;
pub mod preview;
pub mod state;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use controller::{AppController, GenerationOutcome, PendingGeneration};
pub use editor::{BrowserLauncher, EditorForm, EditorLauncher};
pub use preview::LatexPreview;
pub use state::{GenerationState, GenerationStatus};
