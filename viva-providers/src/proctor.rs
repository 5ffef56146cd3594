use crate::interview::join_url;
use crate::request::{Body, HttpRequest};
use anyhow::Context;
use serde_json::json;
use url::Url;
use viva_core::types::{HostEvent, ProctorSessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProctorApiConfig {
    pub base_url: String,
}

pub fn build_start_proctor_request(cfg: &ProctorApiConfig) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: join_url(&cfg.base_url, "/start_proctor"),
        headers: vec![],
        body: Body::Empty,
    }
}

pub fn build_status_request(
    cfg: &ProctorApiConfig,
    session: &ProctorSessionId,
) -> anyhow::Result<HttpRequest> {
    let mut url = Url::parse(&join_url(&cfg.base_url, "/status_proctor"))
        .context("invalid proctor base URL")?;
    url.query_pairs_mut()
        .append_pair("sessionId", session.as_str());

    Ok(HttpRequest {
        method: "GET".into(),
        url: url.into(),
        headers: vec![],
        body: Body::Empty,
    })
}

pub fn build_log_event_request(cfg: &ProctorApiConfig, event: HostEvent) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: join_url(&cfg.base_url, "/log_event"),
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Json(json!({ "event": event.as_str() }).to_string()),
    }
}

/// The frame endpoint is an image resource; `seq` is a cache-busting
/// parameter so intermediaries can't serve a stale frame.
pub fn build_frame_request(
    cfg: &ProctorApiConfig,
    session: &ProctorSessionId,
    seq: u64,
) -> anyhow::Result<HttpRequest> {
    let mut url = Url::parse(&join_url(&cfg.base_url, "/latest_frame"))
        .context("invalid proctor base URL")?;
    url.query_pairs_mut()
        .append_pair("sessionId", session.as_str())
        .append_pair("t", &seq.to_string());

    Ok(HttpRequest {
        method: "GET".into(),
        url: url.into(),
        headers: vec![],
        body: Body::Empty,
    })
}
