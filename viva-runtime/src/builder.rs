use std::sync::Arc;
use std::time::Duration;

use viva_core::config::AppConfig;
use viva_engine::coordinator::{CoordinatorConfig, InterviewCoordinator};
use viva_engine::speech::AnswerRecorder;
use viva_engine::traits::{SpeechCapture, SpeechSynth, ToneOutput};

use crate::remote::{RemoteInterviewApi, RemoteProctorApi};

/// Build a runnable coordinator from config + host capabilities.
///
/// This keeps host shells thin: they only supply the audio/speech backends
/// they actually have (or the fallbacks from `viva_engine::fallback`).
pub fn build_coordinator_from_config(
    cfg: &AppConfig,
    tone: Arc<dyn ToneOutput>,
    speech: Arc<dyn SpeechSynth>,
) -> anyhow::Result<InterviewCoordinator> {
    cfg.validate()?;

    let interview = Arc::new(RemoteInterviewApi::new(cfg.interview_base_url.clone()));
    let proctor = Arc::new(RemoteProctorApi::new(cfg.proctor_base_url.clone()));

    Ok(InterviewCoordinator::new(
        CoordinatorConfig::from_app_config(cfg),
        interview,
        proctor,
        tone,
        speech,
    ))
}

pub fn build_recorder(cfg: &AppConfig, capture: Arc<dyn SpeechCapture>) -> AnswerRecorder {
    AnswerRecorder::new(capture, Duration::from_secs(cfg.recording_limit_secs))
}
