use crate::coordinator::InterviewCoordinator;
use crate::traits::{SpeechSynth, ToneOutput};
use std::sync::Arc;
use std::time::Duration;

const BEEP_FREQUENCY_HZ: u32 = 1_000;
const BEEP_DURATION: Duration = Duration::from_millis(200);

/// Fans a new warning out to three independent channels: a short tone, a
/// spoken line, and the visual banner with its dwell timer. The channels
/// must not block each other, and audio failure must stay invisible to the
/// candidate.
#[derive(Clone)]
pub(crate) struct AlertDriver {
    tone: Arc<dyn ToneOutput>,
    speech: Arc<dyn SpeechSynth>,
    dwell: Duration,
}

impl AlertDriver {
    pub(crate) fn new(
        tone: Arc<dyn ToneOutput>,
        speech: Arc<dyn SpeechSynth>,
        dwell: Duration,
    ) -> Self {
        Self { tone, speech, dwell }
    }

    /// The caller has already set `visual_alert` and bumped the alert
    /// generation under its lock; this only schedules the side effects.
    pub(crate) fn raise(
        &self,
        coordinator: InterviewCoordinator,
        epoch: u64,
        generation: u64,
        reason: String,
    ) {
        {
            let tone = self.tone.clone();
            tokio::spawn(async move {
                if let Err(e) = tone.beep(BEEP_FREQUENCY_HZ, BEEP_DURATION).await {
                    log::warn!("warning tone failed: {e}");
                }
            });
        }

        {
            let speech = self.speech.clone();
            let line = format!("Warning: {reason}");
            tokio::spawn(async move {
                if let Err(e) = speech.speak(&line).await {
                    log::warn!("warning speech failed: {e}");
                }
            });
        }

        // The banner clears only if no newer warning has taken over the
        // generation in the meantime; a newer one restarts the full dwell.
        let dwell = self.dwell;
        tokio::spawn(async move {
            tokio::time::sleep(dwell).await;
            coordinator.clear_alert_if_current(epoch, generation).await;
        });
    }
}
