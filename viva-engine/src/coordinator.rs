use crate::alert::AlertDriver;
use crate::monitor::{self, MonitorTasks};
use crate::session::InterviewSnapshot;
use crate::traits::{InterviewApi, ProctorApi, SpeechSynth, ToneOutput};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use viva_core::alert::WarningTracker;
use viva_core::config::AppConfig;
use viva_core::proctor::{ProctorSignal, ProctorStatus, SignalSource};
use viva_core::types::{AttemptId, HostEvent, ProctorSessionId, QaPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub poll_interval: Duration,
    pub frame_refresh: Duration,
    pub alert_dwell: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            frame_refresh: Duration::from_millis(500),
            alert_dwell: Duration::from_millis(3_000),
        }
    }
}

impl CoordinatorConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(cfg.poll_interval_ms),
            frame_refresh: Duration::from_millis(cfg.frame_refresh_ms),
            alert_dwell: Duration::from_millis(cfg.alert_dwell_ms),
        }
    }
}

#[derive(Default)]
struct Inner {
    // Bumped on every start/reset. Background tasks and late responses carry
    // the epoch they were created under; a stale epoch means a superseded
    // session and the result is discarded.
    epoch: u64,
    attempt_id: Option<AttemptId>,

    job_title: String,
    history: Vec<QaPair>,
    current_question: String,
    current_question_number: u32,
    assessment: Option<String>,
    interview_complete: bool,
    is_loading: bool,
    error: Option<String>,

    proctor_session: Option<ProctorSessionId>,
    proctor_status: ProctorStatus,
    proctor_failed: bool,
    tracker: WarningTracker,

    visual_alert: Option<String>,
    alert_gen: u64,

    latest_frame: Option<Vec<u8>>,
    tasks: Option<MonitorTasks>,
}

/// Owns one interview attempt end to end: the five-question cycle against
/// the question service, the proctoring session with its background polling,
/// and the alert state both feed. Consumers call intents and read
/// `snapshot()`; all mutation happens here.
#[derive(Clone)]
pub struct InterviewCoordinator {
    cfg: CoordinatorConfig,
    interview: Arc<dyn InterviewApi>,
    proctor: Arc<dyn ProctorApi>,
    speech: Arc<dyn SpeechSynth>,
    alerts: AlertDriver,
    inner: Arc<Mutex<Inner>>,
}

impl InterviewCoordinator {
    pub fn new(
        cfg: CoordinatorConfig,
        interview: Arc<dyn InterviewApi>,
        proctor: Arc<dyn ProctorApi>,
        tone: Arc<dyn ToneOutput>,
        speech: Arc<dyn SpeechSynth>,
    ) -> Self {
        Self {
            cfg,
            interview,
            proctor,
            speech: speech.clone(),
            alerts: AlertDriver::new(tone, speech, cfg.alert_dwell),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub async fn snapshot(&self) -> InterviewSnapshot {
        let inner = self.inner.lock().await;
        InterviewSnapshot {
            attempt_id: inner.attempt_id.clone(),
            job_title: inner.job_title.clone(),
            history: inner.history.clone(),
            current_question: inner.current_question.clone(),
            current_question_number: inner.current_question_number,
            assessment: inner.assessment.clone(),
            interview_complete: inner.interview_complete,
            is_loading: inner.is_loading,
            error: inner.error.clone(),
            proctor: inner.proctor_status.clone(),
            proctor_failed: inner.proctor_failed,
            visual_alert: inner.visual_alert.clone(),
        }
    }

    /// The most recent proctor camera frame, for display only.
    pub async fn latest_frame(&self) -> Option<Vec<u8>> {
        self.inner.lock().await.latest_frame.clone()
    }

    /// Starts a fresh attempt. Any previous attempt's timers are cancelled
    /// before the first request goes out; a failure leaves the reset fields
    /// standing and the message in `error`.
    pub async fn start_interview(&self, title: impl Into<String>) {
        let title = title.into();

        let epoch = {
            let mut inner = self.inner.lock().await;
            inner.epoch += 1;
            inner.attempt_id = Some(AttemptId::new());
            inner.job_title = title.clone();
            inner.history.clear();
            inner.current_question.clear();
            inner.current_question_number = 1;
            inner.assessment = None;
            inner.interview_complete = false;
            inner.is_loading = true;
            inner.error = None;
            inner.proctor_session = None;
            inner.proctor_status = ProctorStatus::default();
            inner.proctor_failed = false;
            inner.tracker = WarningTracker::new();
            inner.visual_alert = None;
            inner.alert_gen += 1;
            inner.latest_frame = None;
            // Dropping the handles aborts the previous session's timers.
            inner.tasks = None;
            inner.epoch
        };

        let question = match self.interview.start(&title).await {
            Ok(question) => question,
            Err(e) => {
                let mut inner = self.inner.lock().await;
                if inner.epoch == epoch {
                    inner.error = Some(e.to_string());
                    inner.is_loading = false;
                }
                return;
            }
        };

        {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            inner.current_question = question.clone();
        }

        // Proctoring starts only after the first question arrived; the poll
        // loop needs the session token.
        let proctor_res = self.proctor.start().await;
        {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            match proctor_res {
                Ok(session) => {
                    inner.proctor_session = Some(session.clone());
                    inner.tasks = Some(monitor::spawn(
                        self.clone(),
                        self.proctor.clone(),
                        session,
                        epoch,
                        self.cfg,
                    ));
                }
                Err(e) => {
                    // Proctoring is mandatory for a valid session; flag it so
                    // the shell can run its recovery.
                    log::error!("failed to start proctoring: {e}");
                    inner.error = Some(format!("Failed to start proctoring: {e}"));
                    inner.proctor_failed = true;
                }
            }
            inner.is_loading = false;
        }

        self.announce_question(question);
    }

    /// Submits the answer to the pending question. No-op for blank input,
    /// while a previous submission is in flight, or once the session is
    /// stopped or complete.
    pub async fn submit_answer(&self, text: &str) {
        let answer = text.trim();
        if answer.is_empty() {
            return;
        }

        let (epoch, job_title, history, qnum) = {
            let mut inner = self.inner.lock().await;
            if inner.is_loading
                || inner.interview_complete
                || inner.proctor_status.stopped
                || inner.current_question.is_empty()
            {
                return;
            }
            let question = inner.current_question.clone();
            inner.history.push(QaPair::new(question, answer));
            inner.is_loading = true;
            inner.error = None;
            (
                inner.epoch,
                inner.job_title.clone(),
                inner.history.clone(),
                inner.current_question_number,
            )
        };

        if qnum >= 5 {
            // Final answer: evaluate the full transcript.
            let res = self.interview.evaluate(&job_title, &history).await;
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            match res {
                Ok(assessment) => {
                    // Assessment presence and the completion flag are the same
                    // signal; they must change together.
                    inner.assessment = Some(assessment);
                    inner.interview_complete = true;
                    inner.current_question.clear();
                }
                Err(e) => inner.error = Some(e.to_string()),
            }
            inner.is_loading = false;
            return;
        }

        let res = self
            .interview
            .next_question(&job_title, &history, qnum + 1)
            .await;
        let next = {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }
            let next = match res {
                Ok(question) => {
                    inner.current_question = question.clone();
                    inner.current_question_number += 1;
                    Some(question)
                }
                Err(e) => {
                    inner.error = Some(e.to_string());
                    None
                }
            };
            inner.is_loading = false;
            next
        };

        if let Some(question) = next {
            self.announce_question(question);
        }
    }

    /// Host focus/visibility signal. Both events are logged to the service;
    /// a visibility loss additionally forces an immediate status fetch so
    /// the warning shows without waiting for the next poll tick.
    pub async fn report_host_event(&self, event: HostEvent) {
        let (session, epoch) = {
            let inner = self.inner.lock().await;
            match &inner.proctor_session {
                Some(session) => (session.clone(), inner.epoch),
                None => return,
            }
        };

        if let Err(e) = self.proctor.log_event(&session, event).await {
            log::warn!("proctor event log failed: {e}");
        }

        if event == HostEvent::VisibilityHidden {
            match self.proctor.status(&session).await {
                Ok(report) => {
                    self.apply_proctor_signal(
                        epoch,
                        ProctorSignal {
                            source: SignalSource::HostEvent,
                            warnings: report.warnings,
                            reason: report.reason,
                            stopped: report.stopped,
                        },
                    )
                    .await;
                }
                Err(e) => log::warn!("proctor status fetch after visibility event failed: {e}"),
            }
        }
    }

    /// Dismisses the visual alert ahead of its dwell timer.
    pub async fn acknowledge_alert(&self) {
        let mut inner = self.inner.lock().await;
        inner.alert_gen += 1;
        inner.visual_alert = None;
    }

    /// Speaks the pending question again (the "read aloud" intent).
    pub async fn read_current_question_aloud(&self) {
        let question = {
            let inner = self.inner.lock().await;
            if inner.is_loading || inner.current_question.is_empty() {
                return;
            }
            inner.current_question.clone()
        };
        self.announce_question(question);
    }

    /// Back to role selection: tears down timers and forgets the attempt.
    pub async fn reset(&self) {
        {
            let mut inner = self.inner.lock().await;
            let epoch = inner.epoch + 1;
            let alert_gen = inner.alert_gen + 1;
            // Replacing the state drops the old MonitorTasks, which aborts
            // every timer the attempt owned.
            *inner = Inner {
                epoch,
                alert_gen,
                ..Inner::default()
            };
        }
        self.speech.cancel().await;
    }

    pub(crate) async fn apply_proctor_signal(&self, epoch: u64, signal: ProctorSignal) {
        let raised = {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }

            let before = inner.proctor_status.warnings;
            let applied = inner.proctor_status.apply(&signal);
            if applied.anomalous_decrease {
                log::warn!(
                    "proctor reported a warnings decrease ({} -> {}); keeping the higher count",
                    before,
                    signal.warnings
                );
            }
            if applied.newly_stopped {
                log::info!(
                    "proctoring stopped the session: {}",
                    inner.proctor_status.last_reason
                );
            }

            let count = inner.proctor_status.warnings;
            if inner.tracker.observe(count) {
                inner.alert_gen += 1;
                let reason = inner.proctor_status.last_reason.clone();
                inner.visual_alert = Some(reason.clone());
                Some((inner.alert_gen, reason))
            } else {
                None
            }
        };

        if let Some((generation, reason)) = raised {
            self.alerts.raise(self.clone(), epoch, generation, reason);
        }
    }

    pub(crate) async fn clear_alert_if_current(&self, epoch: u64, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.epoch == epoch && inner.alert_gen == generation {
            inner.visual_alert = None;
        }
    }

    pub(crate) async fn store_frame(&self, epoch: u64, bytes: Vec<u8>) {
        let mut inner = self.inner.lock().await;
        if inner.epoch == epoch {
            inner.latest_frame = Some(bytes);
        }
    }

    fn announce_question(&self, question: String) {
        // At most one utterance audible at a time: cancel, then speak.
        let speech = self.speech.clone();
        tokio::spawn(async move {
            speech.cancel().await;
            if let Err(e) = speech.speak(&question).await {
                log::warn!("question playback failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{NullSpeech, NullTone};
    use crate::session::{Screen, screen_for};
    use crate::traits::ProctorStatusReport;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Notify;

    struct GatedInterview {
        next_calls: AtomicU32,
        release: Notify,
    }

    impl GatedInterview {
        fn new() -> Self {
            Self {
                next_calls: AtomicU32::new(0),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl InterviewApi for GatedInterview {
        async fn start(&self, _job_title: &str) -> anyhow::Result<String> {
            Ok("Tell me about yourself".into())
        }

        async fn next_question(
            &self,
            _job_title: &str,
            _history: &[QaPair],
            _qnum: u32,
        ) -> anyhow::Result<String> {
            self.next_calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok("What are your strengths?".into())
        }

        async fn evaluate(
            &self,
            _job_title: &str,
            _history: &[QaPair],
        ) -> anyhow::Result<String> {
            Ok("Score: 82/100 Decision: PASS".into())
        }
    }

    #[derive(Default)]
    struct ScriptedProctor {
        statuses: std::sync::Mutex<VecDeque<ProctorStatusReport>>,
        events: std::sync::Mutex<Vec<HostEvent>>,
        status_calls: AtomicU32,
        fail_start: bool,
    }

    impl ScriptedProctor {
        fn with_statuses(statuses: Vec<ProctorStatusReport>) -> Self {
            Self {
                statuses: std::sync::Mutex::new(statuses.into()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ProctorApi for ScriptedProctor {
        async fn start(&self) -> anyhow::Result<ProctorSessionId> {
            if self.fail_start {
                return Err(anyhow::anyhow!("camera offline"));
            }
            Ok(ProctorSessionId::new("test-session"))
        }

        async fn status(
            &self,
            _session: &ProctorSessionId,
        ) -> anyhow::Result<ProctorStatusReport> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let next = self.statuses.lock().unwrap().pop_front();
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
            Ok(vec![0xFF, 0xD8])
        }
    }

    fn coordinator_with(
        interview: Arc<dyn InterviewApi>,
        proctor: Arc<dyn ProctorApi>,
    ) -> InterviewCoordinator {
        // Long cadences keep the background monitor quiet; these tests drive
        // signals by hand.
        let cfg = CoordinatorConfig {
            poll_interval: Duration::from_secs(60),
            frame_refresh: Duration::from_secs(60),
            alert_dwell: Duration::from_millis(3_000),
        };
        InterviewCoordinator::new(
            cfg,
            interview,
            proctor,
            Arc::new(NullTone),
            Arc::new(NullSpeech),
        )
    }

    #[tokio::test]
    async fn overlapping_submissions_do_not_double_append() {
        let interview = Arc::new(GatedInterview::new());
        let coordinator = coordinator_with(
            interview.clone(),
            Arc::new(ScriptedProctor::default()),
        );

        coordinator
            .start_interview("Frontend Developer Basic Fresher")
            .await;

        let racing = coordinator.clone();
        let first = tokio::spawn(async move { racing.submit_answer("I am a developer").await });

        // Let the first submission take the loading guard and block on the
        // network call before the second one arrives.
        tokio::task::yield_now().await;
        coordinator.submit_answer("a racing duplicate").await;

        interview.release.notify_one();
        first.await.unwrap();

        let snapshot = coordinator.snapshot().await;
        assert_eq!(interview.next_calls.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].answer, "I am a developer");
        assert_eq!(snapshot.current_question_number, 2);
    }

    #[tokio::test]
    async fn stopped_is_retained_even_if_a_later_poll_clears_it() {
        let coordinator = coordinator_with(
            Arc::new(GatedInterview::new()),
            Arc::new(ScriptedProctor::default()),
        );
        coordinator.start_interview("Data Analyst Basic Fresher").await;
        let epoch = coordinator.inner.lock().await.epoch;

        let stop = ProctorSignal {
            source: SignalSource::Poll,
            warnings: 5,
            reason: "Too many warnings".into(),
            stopped: true,
        };
        coordinator.apply_proctor_signal(epoch, stop.clone()).await;
        coordinator
            .apply_proctor_signal(epoch, ProctorSignal { stopped: false, ..stop })
            .await;

        let snapshot = coordinator.snapshot().await;
        assert!(snapshot.proctor.stopped);
        assert!(!snapshot.can_submit());
        assert_eq!(screen_for(&snapshot), Screen::Stopped);

        // A submission against a stopped session must not even hit the wire.
        coordinator.submit_answer("still here").await;
        assert_eq!(coordinator.snapshot().await.history.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn alert_dwell_restarts_on_new_warning() {
        let coordinator = coordinator_with(
            Arc::new(GatedInterview::new()),
            Arc::new(ScriptedProctor::default()),
        );
        coordinator.start_interview("UI Designer Basic Fresher").await;
        let epoch = coordinator.inner.lock().await.epoch;

        coordinator
            .apply_proctor_signal(
                epoch,
                ProctorSignal {
                    source: SignalSource::Poll,
                    warnings: 1,
                    reason: "Tab switched".into(),
                    stopped: false,
                },
            )
            .await;
        // Let the dwell task arm its timer before time moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(1)).await;
        coordinator
            .apply_proctor_signal(
                epoch,
                ProctorSignal {
                    source: SignalSource::Poll,
                    warnings: 2,
                    reason: "Face not visible".into(),
                    stopped: false,
                },
            )
            .await;
        tokio::task::yield_now().await;

        // 3s after the first warning the banner must still be up: the second
        // warning restarted the dwell.
        tokio::time::advance(Duration::from_millis(2_500)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            coordinator.snapshot().await.visual_alert.as_deref(),
            Some("Face not visible")
        );

        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(coordinator.snapshot().await.visual_alert, None);
    }

    #[tokio::test]
    async fn visibility_event_logs_and_applies_fallback_reason() {
        let proctor = Arc::new(ScriptedProctor::with_statuses(vec![ProctorStatusReport {
            warnings: 1,
            reason: String::new(),
            stopped: false,
        }]));
        let coordinator = coordinator_with(Arc::new(GatedInterview::new()), proctor.clone());
        coordinator.start_interview("UI Designer Basic Fresher").await;

        coordinator.report_host_event(HostEvent::VisibilityHidden).await;

        let snapshot = coordinator.snapshot().await;
        assert_eq!(snapshot.proctor.warnings, 1);
        assert_eq!(snapshot.proctor.last_reason, "Tab switched");
        assert_eq!(snapshot.visual_alert.as_deref(), Some("Tab switched"));
        assert_eq!(
            *proctor.events.lock().unwrap(),
            vec![HostEvent::VisibilityHidden]
        );
        assert_eq!(proctor.status_calls.load(Ordering::SeqCst), 1);

        // Blur is logged but does not force a bonus status fetch.
        coordinator.report_host_event(HostEvent::Blur).await;
        assert_eq!(
            *proctor.events.lock().unwrap(),
            vec![HostEvent::VisibilityHidden, HostEvent::Blur]
        );
        assert_eq!(proctor.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn proctor_start_failure_is_flagged_but_keeps_the_question() {
        let proctor = Arc::new(ScriptedProctor {
            fail_start: true,
            ..ScriptedProctor::default()
        });
        let coordinator = coordinator_with(Arc::new(GatedInterview::new()), proctor);
        coordinator.start_interview("Product Manager Basic Fresher").await;

        let snapshot = coordinator.snapshot().await;
        assert!(snapshot.proctor_failed);
        assert!(snapshot.error.as_deref().unwrap_or("").contains("proctoring"));
        assert_eq!(snapshot.current_question, "Tell me about yourself");
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn blank_answers_are_ignored() {
        let interview = Arc::new(GatedInterview::new());
        let coordinator =
            coordinator_with(interview.clone(), Arc::new(ScriptedProctor::default()));
        coordinator.start_interview("UI Designer Basic Fresher").await;

        coordinator.submit_answer("   \n\t").await;
        assert_eq!(interview.next_calls.load(Ordering::SeqCst), 0);
        assert_eq!(coordinator.snapshot().await.history.len(), 0);
    }

    #[tokio::test]
    async fn reset_returns_to_selection() {
        let coordinator = coordinator_with(
            Arc::new(GatedInterview::new()),
            Arc::new(ScriptedProctor::default()),
        );
        coordinator.start_interview("UI Designer Basic Fresher").await;
        coordinator.reset().await;

        let snapshot = coordinator.snapshot().await;
        assert_eq!(screen_for(&snapshot), Screen::Selection);
        assert!(snapshot.job_title.is_empty());
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn host_events_before_proctoring_starts_are_dropped() {
        let proctor = Arc::new(ScriptedProctor::default());
        let coordinator = coordinator_with(Arc::new(GatedInterview::new()), proctor.clone());

        coordinator.report_host_event(HostEvent::Blur).await;
        assert!(proctor.events.lock().unwrap().is_empty());
    }
}
