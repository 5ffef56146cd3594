use crate::traits::{SpeechCapture, SpeechSynth, ToneOutput};
use async_trait::async_trait;
use std::time::Duration;

// Literal message shown instead of the recording controls when capture is
// unavailable.
pub const CAPTURE_UNSUPPORTED_MESSAGE: &str = "Microphone access is required for recording.";

/// Silent tone output for headless hosts and tests.
#[derive(Debug, Default)]
pub struct NullTone;

#[async_trait]
impl ToneOutput for NullTone {
    async fn beep(&self, _frequency_hz: u32, _duration: Duration) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Speech synthesis that swallows every utterance.
#[derive(Debug, Default)]
pub struct NullSpeech;

#[async_trait]
impl SpeechSynth for NullSpeech {
    async fn speak(&self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn cancel(&self) {}
}

/// Capture backend for hosts without a microphone or speech recognition.
/// Recording controls must be hidden/disabled when `is_supported` is false;
/// starting anyway is an error, not a crash.
#[derive(Debug, Default)]
pub struct UnsupportedCapture;

#[async_trait]
impl SpeechCapture for UnsupportedCapture {
    fn is_supported(&self) -> bool {
        false
    }

    async fn start(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!(CAPTURE_UNSUPPORTED_MESSAGE))
    }

    async fn stop(&self) -> anyhow::Result<String> {
        Err(anyhow::anyhow!(CAPTURE_UNSUPPORTED_MESSAGE))
    }
}
