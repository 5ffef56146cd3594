use crate::request::{Body, HttpRequest};
use serde_json::json;
use viva_core::types::QaPair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewApiConfig {
    pub base_url: String,
}

pub fn build_start_request(cfg: &InterviewApiConfig, job_title: &str) -> HttpRequest {
    post_json(
        join_url(&cfg.base_url, "/api/start"),
        json!({ "job_title": job_title }),
    )
}

pub fn build_question_request(
    cfg: &InterviewApiConfig,
    job_title: &str,
    history: &[QaPair],
    qnum: u32,
) -> HttpRequest {
    post_json(
        join_url(&cfg.base_url, "/api/question"),
        json!({
            "job_title": job_title,
            "history": history,
            "qnum": qnum,
        }),
    )
}

pub fn build_evaluate_request(
    cfg: &InterviewApiConfig,
    job_title: &str,
    history: &[QaPair],
) -> HttpRequest {
    post_json(
        join_url(&cfg.base_url, "/api/evaluate"),
        json!({
            "job_title": job_title,
            "history": history,
        }),
    )
}

fn post_json(url: String, payload: serde_json::Value) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Json(payload.to_string()),
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
