use async_trait::async_trait;
use viva_core::types::{HostEvent, ProctorSessionId, QaPair};
use viva_engine::traits::{InterviewApi, ProctorApi, ProctorStatusReport};
use viva_providers::interview::{
    InterviewApiConfig, build_evaluate_request, build_question_request, build_start_request,
};
use viva_providers::parse;
use viva_providers::proctor::{
    ProctorApiConfig, build_frame_request, build_log_event_request, build_start_proctor_request,
    build_status_request,
};
use viva_providers::runtime::execute;

/// HTTP-backed question/answer service client.
///
/// Failure messages here are user-facing: non-success statuses surface as
/// these literal strings in the session's error field.
#[derive(Debug, Clone)]
pub struct RemoteInterviewApi {
    cfg: InterviewApiConfig,
}

impl RemoteInterviewApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            cfg: InterviewApiConfig {
                base_url: base_url.into(),
            },
        }
    }
}

#[async_trait]
impl InterviewApi for RemoteInterviewApi {
    async fn start(&self, job_title: &str) -> anyhow::Result<String> {
        let resp = execute(&build_start_request(&self.cfg, job_title)).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!("Failed to start interview"));
        }
        parse::parse_question(&resp.body)
    }

    async fn next_question(
        &self,
        job_title: &str,
        history: &[QaPair],
        qnum: u32,
    ) -> anyhow::Result<String> {
        let resp = execute(&build_question_request(&self.cfg, job_title, history, qnum)).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!("Failed to get next question"));
        }
        parse::parse_question(&resp.body)
    }

    async fn evaluate(&self, job_title: &str, history: &[QaPair]) -> anyhow::Result<String> {
        let resp = execute(&build_evaluate_request(&self.cfg, job_title, history)).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!("Failed to evaluate"));
        }
        parse::parse_assessment(&resp.body)
    }
}

/// HTTP-backed proctoring service client. Callers treat these errors as
/// best-effort noise except for `start`, which is mandatory.
#[derive(Debug, Clone)]
pub struct RemoteProctorApi {
    cfg: ProctorApiConfig,
}

impl RemoteProctorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            cfg: ProctorApiConfig {
                base_url: base_url.into(),
            },
        }
    }
}

#[async_trait]
impl ProctorApi for RemoteProctorApi {
    async fn start(&self) -> anyhow::Result<ProctorSessionId> {
        let resp = execute(&build_start_proctor_request(&self.cfg)).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "proctor start returned status {}",
                resp.status
            ));
        }
        parse::parse_proctor_session(&resp.body)
    }

    async fn status(&self, session: &ProctorSessionId) -> anyhow::Result<ProctorStatusReport> {
        let resp = execute(&build_status_request(&self.cfg, session)?).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "proctor status returned status {}",
                resp.status
            ));
        }
        let status = parse::parse_proctor_status(&resp.body)?;
        Ok(ProctorStatusReport {
            warnings: status.warnings,
            reason: status.reason,
            stopped: status.stopped,
        })
    }

    async fn log_event(
        &self,
        _session: &ProctorSessionId,
        event: HostEvent,
    ) -> anyhow::Result<()> {
        let resp = execute(&build_log_event_request(&self.cfg, event)).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "proctor event log returned status {}",
                resp.status
            ));
        }
        Ok(())
    }

    async fn latest_frame(
        &self,
        session: &ProctorSessionId,
        seq: u64,
    ) -> anyhow::Result<Vec<u8>> {
        let resp = execute(&build_frame_request(&self.cfg, session, seq)?).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "proctor frame returned status {}",
                resp.status
            ));
        }
        Ok(resp.body)
    }
}
