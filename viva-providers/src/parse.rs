use anyhow::Context;
use serde::Deserialize;
use viva_core::types::ProctorSessionId;

#[derive(Debug, Deserialize)]
struct QuestionResponse {
    question: String,
}

pub fn parse_question(body: &[u8]) -> anyhow::Result<String> {
    let resp: QuestionResponse =
        serde_json::from_slice(body).context("decode question JSON")?;
    Ok(resp.question)
}

#[derive(Debug, Deserialize)]
struct AssessmentResponse {
    assessment: String,
}

pub fn parse_assessment(body: &[u8]) -> anyhow::Result<String> {
    let resp: AssessmentResponse =
        serde_json::from_slice(body).context("decode assessment JSON")?;
    Ok(resp.assessment)
}

#[derive(Debug, Deserialize)]
struct StartProctorResponse {
    #[serde(rename = "sessionId")]
    session_id: String,
}

pub fn parse_proctor_session(body: &[u8]) -> anyhow::Result<ProctorSessionId> {
    let resp: StartProctorResponse =
        serde_json::from_slice(body).context("decode proctor session JSON")?;
    Ok(ProctorSessionId::new(resp.session_id))
}

/// Raw `/status_proctor` payload. The reason may be omitted entirely while
/// a warning is still being classified; treat that the same as empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProctorStatusResponse {
    pub warnings: u32,
    #[serde(default)]
    pub reason: String,
    pub stopped: bool,
}

pub fn parse_proctor_status(body: &[u8]) -> anyhow::Result<ProctorStatusResponse> {
    serde_json::from_slice(body).context("decode proctor status JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_question() {
        let body = br#"{"question":"Tell me about yourself"}"#;
        assert_eq!(parse_question(body).unwrap(), "Tell me about yourself");
    }

    #[test]
    fn parses_assessment() {
        let body = br#"{"assessment":"Score: 82/100"}"#;
        assert_eq!(parse_assessment(body).unwrap(), "Score: 82/100");
    }

    #[test]
    fn parses_proctor_session() {
        let body = br#"{"sessionId":"s-123"}"#;
        assert_eq!(
            parse_proctor_session(body).unwrap(),
            ProctorSessionId::new("s-123")
        );
    }

    #[test]
    fn parses_proctor_status_with_missing_reason() {
        let body = br#"{"warnings":1,"stopped":false}"#;
        let status = parse_proctor_status(body).unwrap();
        assert_eq!(status.warnings, 1);
        assert_eq!(status.reason, "");
        assert!(!status.stopped);
    }

    #[test]
    fn missing_question_field_errors() {
        let body = br#"{"prompt":"hi"}"#;
        assert!(parse_question(body).is_err());
    }
}
