//! Speech collaborators.
//!
//! Capture and playback are platform services; the assistant only needs a
//! transcript in and a string out.  [`SpeechCapture`] and [`SpeechPlayback`]
//! are the seams, both object-safe and `Send + Sync`.
//!
//! [`LogPlayback`] is the headless playback backend: it routes the text to
//! the log instead of an audio device.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors from speech capture or playback.
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    /// No speech service is available on this host.
    #[error("speech service unavailable: {0}")]
    Unavailable(String),

    /// Capture finished without recognising any speech.
    #[error("no speech detected")]
    NoSpeech,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Speech-to-text: one capture produces one transcript.
pub trait SpeechCapture: Send + Sync {
    fn capture(&self) -> Result<String, SpeechError>;
}

/// Text-to-speech playback.
pub trait SpeechPlayback: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

// Compile-time assertion: both traits must be usable as trait objects.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechCapture>, _: Box<dyn SpeechPlayback>) {}
};

// ---------------------------------------------------------------------------
// LogPlayback
// ---------------------------------------------------------------------------

/// Playback that writes the text to the log at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPlayback;

impl SpeechPlayback for LogPlayback {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        log::info!("[speech] {text}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_playback_never_fails() {
        assert!(LogPlayback.speak("Summary\nNormal line").is_ok());
        assert!(LogPlayback.speak("").is_ok());
    }

    #[test]
    fn errors_have_readable_messages() {
        assert_eq!(SpeechError::NoSpeech.to_string(), "no speech detected");
        assert_eq!(
            SpeechError::Unavailable("no microphone".into()).to_string(),
            "speech service unavailable: no microphone"
        );
    }
}
