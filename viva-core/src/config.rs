use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interview base URL must not be empty")]
    EmptyInterviewBaseUrl,
    #[error("proctor base URL must not be empty")]
    EmptyProctorBaseUrl,
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub interview_base_url: String,
    pub proctor_base_url: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_frame_refresh_ms")]
    pub frame_refresh_ms: u64,

    #[serde(default = "default_alert_dwell_ms")]
    pub alert_dwell_ms: u64,

    #[serde(default = "default_recording_limit_secs")]
    pub recording_limit_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_frame_refresh_ms() -> u64 {
    500
}

fn default_alert_dwell_ms() -> u64 {
    3_000
}

fn default_recording_limit_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Both services sit behind the same dev host by default.
            interview_base_url: "http://127.0.0.1:8080".into(),
            proctor_base_url: "http://127.0.0.1:8080".into(),
            poll_interval_ms: default_poll_interval_ms(),
            frame_refresh_ms: default_frame_refresh_ms(),
            alert_dwell_ms: default_alert_dwell_ms(),
            recording_limit_secs: default_recording_limit_secs(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interview_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyInterviewBaseUrl);
        }
        if self.proctor_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyProctorBaseUrl);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("poll_interval_ms"));
        }
        if self.frame_refresh_ms == 0 {
            return Err(ConfigError::ZeroInterval("frame_refresh_ms"));
        }
        if self.alert_dwell_ms == 0 {
            return Err(ConfigError::ZeroInterval("alert_dwell_ms"));
        }
        if self.recording_limit_secs == 0 {
            return Err(ConfigError::ZeroInterval("recording_limit_secs"));
        }
        Ok(())
    }
}
