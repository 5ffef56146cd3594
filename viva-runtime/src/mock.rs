use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use viva_core::types::{HostEvent, ProctorSessionId, QaPair};
use viva_engine::traits::{
    InterviewApi, ProctorApi, ProctorStatusReport, SpeechCapture,
};

/// Question service that answers from a fixed script. Used by tests and the
/// CLI's offline demo mode.
#[derive(Debug, Clone)]
pub struct MockInterviewApi {
    pub first_question: String,
    pub followups: Vec<String>,
    pub assessment: String,
}

impl Default for MockInterviewApi {
    fn default() -> Self {
        Self {
            first_question: "Tell me about yourself".into(),
            followups: vec![
                "What are your strengths?".into(),
                "Describe a project you are proud of.".into(),
                "How do you handle feedback?".into(),
                "Why do you want this role?".into(),
            ],
            assessment: "Score: 82/100\n\nKey Strengths:\n* Clear communication\n\nAreas for Improvement:\n* More concrete examples\n\nDecision: PASS"
                .into(),
        }
    }
}

#[async_trait]
impl InterviewApi for MockInterviewApi {
    async fn start(&self, _job_title: &str) -> anyhow::Result<String> {
        Ok(self.first_question.clone())
    }

    async fn next_question(
        &self,
        _job_title: &str,
        _history: &[QaPair],
        qnum: u32,
    ) -> anyhow::Result<String> {
        // qnum is 2-based for follow-ups.
        let idx = qnum.saturating_sub(2) as usize;
        self.followups
            .get(idx)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no scripted question for qnum {qnum}"))
    }

    async fn evaluate(&self, _job_title: &str, history: &[QaPair]) -> anyhow::Result<String> {
        if history.len() != 5 {
            return Err(anyhow::anyhow!(
                "evaluate called with {} answers, expected 5",
                history.len()
            ));
        }
        Ok(self.assessment.clone())
    }
}

/// Proctoring service that replays a scripted sequence of status reports and
/// records every logged event.
#[derive(Debug, Default)]
pub struct MockProctorApi {
    script: Mutex<VecDeque<ProctorStatusReport>>,
    pub events: Mutex<Vec<HostEvent>>,
}

impl MockProctorApi {
    pub fn with_script(script: Vec<ProctorStatusReport>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProctorApi for MockProctorApi {
    async fn start(&self) -> anyhow::Result<ProctorSessionId> {
        Ok(ProctorSessionId::new("mock-proctor"))
    }

    async fn status(&self, _session: &ProctorSessionId) -> anyhow::Result<ProctorStatusReport> {
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or(ProctorStatusReport {
            warnings: 0,
            reason: String::new(),
            stopped: false,
        }))
    }

    async fn log_event(
        &self,
        _session: &ProctorSessionId,
        event: HostEvent,
    ) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn latest_frame(
        &self,
        _session: &ProctorSessionId,
        _seq: u64,
    ) -> anyhow::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Capture that "hears" a fixed phrase; for tests and demos.
#[derive(Debug, Clone)]
pub struct MockCapture {
    pub transcript: String,
}

#[async_trait]
impl SpeechCapture for MockCapture {
    fn is_supported(&self) -> bool {
        true
    }

    async fn start(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<String> {
        Ok(self.transcript.clone())
    }
}
