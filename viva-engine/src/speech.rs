use crate::traits::SpeechCapture;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("speech capture is not supported on this platform")]
    Unsupported,
    #[error(transparent)]
    Capture(#[from] anyhow::Error),
}

#[derive(Default)]
struct RecorderInner {
    recording: bool,
    // Bumped on every start and stop; the countdown task only auto-stops the
    // recording it was armed for.
    generation: u64,
    started_at: Option<Instant>,
    last_transcript: Option<String>,
}

/// Bridges answer capture to the platform's speech-to-text capability. The
/// only retained state is "currently recording" plus the countdown that
/// force-stops capture when the time limit runs out.
#[derive(Clone)]
pub struct AnswerRecorder {
    capture: Arc<dyn SpeechCapture>,
    limit: Duration,
    inner: Arc<Mutex<RecorderInner>>,
}

impl AnswerRecorder {
    pub fn new(capture: Arc<dyn SpeechCapture>, limit: Duration) -> Self {
        Self {
            capture,
            limit,
            inner: Arc::new(Mutex::new(RecorderInner::default())),
        }
    }

    /// False means the host has no microphone/recognition; controls should
    /// be hidden and a literal message shown instead.
    pub fn is_supported(&self) -> bool {
        self.capture.is_supported()
    }

    pub async fn is_recording(&self) -> bool {
        self.inner.lock().await.recording
    }

    /// Seconds left before the countdown force-stops capture; `None` while
    /// not recording.
    pub async fn seconds_remaining(&self) -> Option<u64> {
        let inner = self.inner.lock().await;
        if !inner.recording {
            return None;
        }
        let elapsed = inner.started_at.map(|t| t.elapsed()).unwrap_or_default();
        Some(self.limit.saturating_sub(elapsed).as_secs())
    }

    pub async fn start(&self) -> Result<(), RecorderError> {
        if !self.capture.is_supported() {
            return Err(RecorderError::Unsupported);
        }

        let generation = {
            let mut inner = self.inner.lock().await;
            if inner.recording {
                return Ok(());
            }
            inner.recording = true;
            inner.generation += 1;
            inner.started_at = Some(Instant::now());
            inner.generation
        };

        if let Err(e) = self.capture.start().await {
            let mut inner = self.inner.lock().await;
            inner.recording = false;
            inner.started_at = None;
            return Err(RecorderError::Capture(e));
        }

        // Countdown: capture auto-stops at zero. A manual stop bumps the
        // generation first, so a stale countdown wakes up and does nothing.
        let recorder = self.clone();
        let limit = self.limit;
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            if let Err(e) = recorder.stop_generation(generation).await {
                log::warn!("auto-stop of recording failed: {e}");
            }
        });

        Ok(())
    }

    /// Stops capture and returns the transcript. `None` when nothing was
    /// being recorded.
    pub async fn stop(&self) -> Result<Option<String>, RecorderError> {
        let generation = self.inner.lock().await.generation;
        self.stop_generation(generation).await
    }

    /// The transcript of the most recent completed recording, consumed once.
    /// This is where an auto-stopped recording's text ends up.
    pub async fn take_transcript(&self) -> Option<String> {
        self.inner.lock().await.last_transcript.take()
    }

    async fn stop_generation(&self, generation: u64) -> Result<Option<String>, RecorderError> {
        {
            let mut inner = self.inner.lock().await;
            if !inner.recording || inner.generation != generation {
                return Ok(None);
            }
            inner.recording = false;
            inner.generation += 1;
            inner.started_at = None;
        }

        let transcript = self.capture.stop().await?;
        {
            let mut inner = self.inner.lock().await;
            inner.last_transcript = Some(transcript.clone());
        }
        Ok(Some(transcript))
    }
}
