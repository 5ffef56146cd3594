use serde::Serialize;
use viva_core::proctor::ProctorStatus;
use viva_core::types::{AttemptId, QaPair};

/// Read-only view of the coordinator's state. Consumers render from this and
/// send intents back; they never mutate session state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewSnapshot {
    pub attempt_id: Option<AttemptId>,
    pub job_title: String,
    pub history: Vec<QaPair>,
    pub current_question: String,
    pub current_question_number: u32,
    pub assessment: Option<String>,
    pub interview_complete: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub proctor: ProctorStatus,
    /// Set when the proctoring session itself could not be started.
    /// Proctoring is mandatory; the shell decides how bluntly to recover.
    pub proctor_failed: bool,
    pub visual_alert: Option<String>,
}

impl InterviewSnapshot {
    pub fn can_submit(&self) -> bool {
        !self.is_loading
            && !self.proctor.stopped
            && !self.interview_complete
            && !self.current_question.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Role selection; the interview screen is meaningless without a title.
    Selection,
    Interview,
    /// Full-screen blocking state after the proctor stopped the session.
    Stopped,
    /// Only meaningful once the assessment exists.
    Results,
}

/// Redirect guard: the screen a consumer must show for the given state,
/// rather than rendering partial state.
pub fn screen_for(snapshot: &InterviewSnapshot) -> Screen {
    if snapshot.job_title.is_empty() {
        return Screen::Selection;
    }
    if snapshot.interview_complete && snapshot.assessment.is_some() {
        return Screen::Results;
    }
    if snapshot.proctor.stopped {
        return Screen::Stopped;
    }
    Screen::Interview
}
