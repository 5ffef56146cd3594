use async_trait::async_trait;
use std::time::Duration;
use viva_core::types::{HostEvent, ProctorSessionId, QaPair};

/// One status observation as reported by the proctoring service, before any
/// reconciliation. The coordinator tags it with its source and feeds it to
/// the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProctorStatusReport {
    pub warnings: u32,
    pub reason: String,
    pub stopped: bool,
}

#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Starts an interview for the given job title and returns the first
    /// question.
    async fn start(&self, job_title: &str) -> anyhow::Result<String>;

    async fn next_question(
        &self,
        job_title: &str,
        history: &[QaPair],
        qnum: u32,
    ) -> anyhow::Result<String>;

    /// Returns the final free-text assessment for a completed history.
    async fn evaluate(&self, job_title: &str, history: &[QaPair]) -> anyhow::Result<String>;
}

#[async_trait]
pub trait ProctorApi: Send + Sync {
    async fn start(&self) -> anyhow::Result<ProctorSessionId>;

    async fn status(&self, session: &ProctorSessionId) -> anyhow::Result<ProctorStatusReport>;

    async fn log_event(&self, session: &ProctorSessionId, event: HostEvent)
    -> anyhow::Result<()>;

    /// Fetches the most recent camera frame. `seq` is a cache-busting
    /// sequence number; the bytes are for display only.
    async fn latest_frame(
        &self,
        session: &ProctorSessionId,
        seq: u64,
    ) -> anyhow::Result<Vec<u8>>;
}

#[async_trait]
pub trait ToneOutput: Send + Sync {
    async fn beep(&self, frequency_hz: u32, duration: Duration) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SpeechSynth: Send + Sync {
    async fn speak(&self, text: &str) -> anyhow::Result<()>;

    /// Cancels any in-progress utterance. Must be safe to call when nothing
    /// is being spoken.
    async fn cancel(&self);
}

#[async_trait]
pub trait SpeechCapture: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn start(&self) -> anyhow::Result<()>;

    /// Stops capture and returns the transcript so far.
    async fn stop(&self) -> anyhow::Result<String>;
}
