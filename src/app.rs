//! Conversation controller — the UI-facing owner of history and report.
//!
//! # Architecture
//!
//! [`Conversation`] holds three things:
//!
//! * the ordered, role-tagged chat history sent with every backend call,
//! * the [`ReportSession`] both renderers and the exporter read from,
//! * the current [`ConversationPhase`] shown by the front-end.
//!
//! # Phase transitions
//!
//! ```text
//! Idle ──user turn──▶ AwaitingReply ──reply──▶ Idle
//!      ──/report───▶ GeneratingReport ──report──▶ ReportReady
//! ReportReady ──user turn──▶ AwaitingReply   (report cleared)
//! any busy phase ──transport error──▶ Error
//! Error ──next turn──▶ AwaitingReply / GeneratingReport
//! ```
//!
//! Transport failures never propagate as `Err`: they become a display-only
//! assistant-style message.  Neither the apology nor the unanswered user
//! turn enters the history sent to the backend, and the report session is
//! left as it was.

use std::path::Path;
use std::sync::Arc;

use crate::export::{DocumentExporter, ExportError};
use crate::report::{paginate, RenderedReport, ReportSession};
use crate::speech::{SpeechCapture, SpeechError, SpeechPlayback};
use crate::transport::{ChatMessage, ChatTransport};

// ---------------------------------------------------------------------------
// ConversationPhase
// ---------------------------------------------------------------------------

/// What the conversation is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationPhase {
    /// Waiting for the user.
    #[default]
    Idle,
    /// A chat turn is in flight.
    AwaitingReply,
    /// Report generation is in flight.
    GeneratingReport,
    /// A report is held in the session and can be shown / exported.
    ReportReady,
    /// The last backend call failed.
    Error,
}

impl ConversationPhase {
    /// Returns `true` while a backend call is in flight.
    ///
    /// ```
    /// use clinical_prep::app::ConversationPhase;
    ///
    /// assert!(!ConversationPhase::Idle.is_busy());
    /// assert!(ConversationPhase::AwaitingReply.is_busy());
    /// assert!(ConversationPhase::GeneratingReport.is_busy());
    /// assert!(!ConversationPhase::ReportReady.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ConversationPhase::AwaitingReply | ConversationPhase::GeneratingReport
        )
    }

    /// Short status label for the front-end.
    pub fn label(&self) -> &'static str {
        match self {
            ConversationPhase::Idle => "Idle",
            ConversationPhase::AwaitingReply => "Thinking",
            ConversationPhase::GeneratingReport => "Generating report",
            ConversationPhase::ReportReady => "Report ready",
            ConversationPhase::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// TurnOutcome
// ---------------------------------------------------------------------------

/// Result of one user-initiated action, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant replied (possibly with an error apology).
    Reply(String),
    /// A new report arrived and was rendered.
    Report(RenderedReport),
    /// Nothing to do (blank input).
    Ignored,
    /// The action failed before reaching the backend.
    Failed(String),
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Owns the chat history and report session for one patient interview.
pub struct Conversation {
    transport: Arc<dyn ChatTransport>,
    history: Vec<ChatMessage>,
    report: ReportSession,
    phase: ConversationPhase,
}

impl Conversation {
    /// Start a conversation whose history opens with `greeting`.
    pub fn new(transport: Arc<dyn ChatTransport>, greeting: impl Into<String>) -> Self {
        Self {
            transport,
            history: vec![ChatMessage::assistant(greeting)],
            report: ReportSession::new(),
            phase: ConversationPhase::Idle,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn report(&self) -> &ReportSession {
        &self.report
    }

    // -----------------------------------------------------------------------
    // Turns
    // -----------------------------------------------------------------------

    /// Send one user message and record the assistant's reply.
    ///
    /// Clears any previously received report.  Blank input is ignored.
    pub async fn submit_user_turn(&mut self, text: &str) -> TurnOutcome {
        let text = text.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }

        self.report.clear();
        self.history.push(ChatMessage::user(text));
        self.phase = ConversationPhase::AwaitingReply;

        match self.transport.send_chat(&self.history).await {
            Ok(reply) => {
                self.phase = ConversationPhase::Idle;
                self.history.push(ChatMessage::assistant(reply.clone()));
                TurnOutcome::Reply(reply)
            }
            Err(e) => {
                // History must end on the backend's last question.
                log::warn!("Chat request failed: {e}");
                self.history.pop();
                self.phase = ConversationPhase::Error;
                TurnOutcome::Reply(format!(
                    "Sorry, I couldn't reach the server. Please try again. ({e})"
                ))
            }
        }
    }

    /// Capture one spoken turn and submit its transcript.
    pub async fn submit_voice_turn(&mut self, capture: &dyn SpeechCapture) -> TurnOutcome {
        match capture.capture() {
            Ok(transcript) => self.submit_user_turn(&transcript).await,
            Err(SpeechError::NoSpeech) => TurnOutcome::Ignored,
            Err(e) => {
                log::warn!("Speech capture failed: {e}");
                TurnOutcome::Failed(e.to_string())
            }
        }
    }

    /// Ask the backend for the report and store it in the session.
    ///
    /// A failure leaves whatever report was held before untouched.
    pub async fn request_report(&mut self) -> TurnOutcome {
        let previous = self.phase;
        self.phase = ConversationPhase::GeneratingReport;

        match self.transport.generate_report(&self.history).await {
            Ok(text) => {
                log::info!("Report received ({} bytes)", text.len());
                let rendered = RenderedReport::from_text(&text);
                self.report.set_report(text);
                self.phase = ConversationPhase::ReportReady;
                TurnOutcome::Report(rendered)
            }
            Err(e) => {
                log::warn!("Report generation failed: {e}");
                self.phase = if self.report.has_report() {
                    previous
                } else {
                    ConversationPhase::Error
                };
                TurnOutcome::Reply(format!(
                    "Sorry, the report could not be generated. Please try again. ({e})"
                ))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Report outputs
    // -----------------------------------------------------------------------

    /// Re-render the held report for display, if any.
    pub fn rendered_report(&self) -> Option<RenderedReport> {
        self.report.current_text().map(RenderedReport::from_text)
    }

    /// Read the held report aloud.  Returns `Ok(false)` when there is none.
    pub fn speak_report(&self, playback: &dyn SpeechPlayback) -> Result<bool, SpeechError> {
        match self.rendered_report() {
            Some(rendered) => {
                playback.speak(&rendered.speech_text)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Paginate the held report and hand it to `exporter`.
    ///
    /// Returns the number of pages written.
    pub fn export_report(
        &self,
        exporter: &dyn DocumentExporter,
        path: &Path,
    ) -> Result<usize, ExportError> {
        let text = self.report.current_text().ok_or(ExportError::NoReport)?;
        let pages = paginate(text, &exporter.geometry(), exporter.wrapper());
        exporter.export(&pages, path)?;
        Ok(pages.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
