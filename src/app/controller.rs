//! The front end's state machine.
//!
//! [`AppController`] owns the input buffer, the rendered [`GenerationState`] and the chat
//! session. Submitting hands back a [`PendingGeneration`] that performs the remote call
//! without borrowing the controller, so the front end stays responsive (and can start a
//! new document) while a request is in flight. Results come back through
//! [`AppController::complete`], which drops outcomes belonging to a session that has
//! since been reset.

use crate::app::preview::LatexPreview;
use crate::app::state::{GenerationState, GenerationStatus};
use crate::error::Result;
use crate::latex::generator::{failure_message, LatexGenerator};
use crate::llm::ChatSession;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const NEW_DOCUMENT_HINT: &str =
    "E.g., A resume for a software engineer, a set of 5 calculus problems, or a formal business letter...";
const REFINE_HINT: &str =
    "Refine your document (e.g., 'Make the title bigger' or 'Add a new section')...";

/// A request that has been dispatched but not yet sent.
pub struct PendingGeneration {
    generation: u64,
    session: Arc<Mutex<ChatSession>>,
    generator: LatexGenerator,
    message: String,
}

impl PendingGeneration {
    /// Session lifetime this request belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Send the request and wait for the reply.
    pub async fn run(self) -> GenerationOutcome {
        let PendingGeneration {
            generation,
            session,
            generator,
            message,
        } = self;

        let mut guard = session.lock().await;
        let result = generator.send(&mut guard, &message).await;

        GenerationOutcome { generation, result }
    }
}

/// The result of a [`PendingGeneration`], tagged with the session lifetime it was sent in.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub generation: u64,
    pub result: Result<String>,
}

impl GenerationOutcome {
    pub fn new(generation: u64, result: Result<String>) -> Self {
        Self { generation, result }
    }
}

pub struct AppController {
    generator: LatexGenerator,
    session: Arc<Mutex<ChatSession>>,
    generation: u64,
    state: GenerationState,
    input: String,
    preview: Option<LatexPreview>,
}

impl AppController {
    pub fn new(generator: LatexGenerator) -> Self {
        let session = Arc::new(Mutex::new(generator.create_session()));
        Self {
            generator,
            session,
            generation: 0,
            state: GenerationState::default(),
            input: String::new(),
            preview: None,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn append_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle of the current chat session.
    pub fn session(&self) -> Arc<Mutex<ChatSession>> {
        Arc::clone(&self.session)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && !self.input.trim().is_empty()
    }

    /// Start a generation from the current input.
    ///
    /// Returns `None` without touching any state when the input is blank or a request is
    /// already in flight.
    pub fn submit(&mut self) -> Option<PendingGeneration> {
        if !self.can_submit() {
            debug!(status = ?self.state.status, "Ignoring submit");
            return None;
        }

        self.state.status = GenerationStatus::Loading;
        self.state.error = None;

        Some(PendingGeneration {
            generation: self.generation,
            session: Arc::clone(&self.session),
            generator: self.generator.clone(),
            message: self.input.clone(),
        })
    }

    /// Enter in the input box. A plain Enter submits; a modified Enter adds a line break.
    pub fn on_enter(&mut self, modified: bool) -> Option<PendingGeneration> {
        if modified {
            self.input.push('\n');
            None
        } else {
            self.submit()
        }
    }

    /// Apply a finished request.
    ///
    /// Returns `false` when the outcome was discarded because the session it was sent in
    /// has been reset.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> bool {
        if outcome.generation != self.generation || !self.state.is_loading() {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                "Discarding stale generation outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(latex) => {
                self.preview = Some(LatexPreview::new(latex.clone()));
                self.state = GenerationState {
                    status: GenerationStatus::Success,
                    latex: Some(latex),
                    error: None,
                };
            }
            Err(e) => {
                self.state.status = GenerationStatus::Error;
                self.state.error = Some(failure_message(&e));
            }
        }

        true
    }

    /// Submit, send and apply in one step.
    ///
    /// Returns `false` if nothing was submitted.
    pub async fn generate(&mut self) -> bool {
        match self.submit() {
            Some(pending) => {
                let outcome = pending.run().await;
                self.complete(outcome)
            }
            None => false,
        }
    }

    /// Start a new document: fresh session, empty input, no result.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.session = Arc::new(Mutex::new(self.generator.create_session()));
        self.input.clear();
        self.state = GenerationState::default();
        self.preview = None;
        info!(generation = self.generation, "Started a new document");
    }

    /// The result panel, shown only after a successful generation.
    pub fn preview(&self) -> Option<&LatexPreview> {
        if self.visible_preview() {
            self.preview.as_ref()
        } else {
            None
        }
    }

    pub fn preview_mut(&mut self) -> Option<&mut LatexPreview> {
        if self.visible_preview() {
            self.preview.as_mut()
        } else {
            None
        }
    }

    fn visible_preview(&self) -> bool {
        self.state.status == GenerationStatus::Success
    }

    /// Placeholder text for the input box.
    pub fn prompt_hint(&self) -> &'static str {
        if self.state.latex.is_some() {
            REFINE_HINT
        } else {
            NEW_DOCUMENT_HINT
        }
    }

    /// Label for the submit control.
    pub fn action_label(&self) -> &'static str {
        match (self.state.is_loading(), self.state.latex.is_some()) {
            (true, true) => "Updating...",
            (true, false) => "Generating...",
            (false, true) => "Update PDF",
            (false, false) => "Generate PDF",
        }
    }
}
