#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use std::path::PathBuf;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

use super::SourceType;
use super::Tone;
use super::UpcomingPost;

/// Failure of a single round trip to the server. Every variant starts with
/// the short message users see in alerts.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}")]
    Status { context: &'static str, status: u16 },
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        source: reqwest::Error,
    },
    #[error("{context}: unreadable response")]
    Decode {
        context: &'static str,
        source: reqwest::Error,
    },
    #[error("Unable to read {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("No credentials configured for LinkedIn account {0}")]
    MissingCredentials(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub source_type: SourceType,
    pub source_data: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub content: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<String>,
}

/// What a successful publish reported back. The server only promises a 2xx,
/// so every field is read leniently from whatever JSON came with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishResponse {
    pub post_id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<String>,
    pub token_refreshed: bool,
}

fn lenient_string(value: &serde_json::Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(serde_json::Value::String(e)) => return Some(e.to_string()),
        Some(serde_json::Value::Number(e)) => return Some(e.to_string()),
        _ => return None,
    }
}

impl PublishResponse {
    pub fn from_value(value: &serde_json::Value) -> PublishResponse {
        return PublishResponse {
            post_id: lenient_string(value, "post_id"),
            access_token: lenient_string(value, "access_token"),
            refresh_token: lenient_string(value, "refresh_token"),
            token_expires_at: lenient_string(value, "token_expires_at"),
            token_refreshed: value
                .get("token_refreshed")
                .and_then(|e| return e.as_bool())
                .unwrap_or(false),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub content: String,
    pub scheduled_time: String,
    pub linkedin_account: String,
}

/// What a successful schedule reported back. Any 2xx counts as scheduled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResponse {
    pub message: Option<String>,
    pub scheduled_time: Option<String>,
}

impl ScheduleResponse {
    pub fn from_value(value: &serde_json::Value) -> ScheduleResponse {
        return ScheduleResponse {
            message: lenient_string(value, "message"),
            scheduled_time: lenient_string(value, "scheduled_time"),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpcomingPostsResponse {
    pub posts: Vec<UpcomingPost>,
}

#[async_trait]
pub trait Api {
    /// `POST /api/generate-content`.
    async fn generate_content(
        &self,
        req: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError>;

    /// `POST /api/upload` as multipart form data with `file` and `tone` parts.
    async fn upload(&self, req: UploadRequest) -> Result<GenerateContentResponse, ApiError>;

    /// `POST /api/publish`.
    async fn publish(&self, req: PublishRequest) -> Result<PublishResponse, ApiError>;

    /// `POST /api/schedule`. The server is trusted to reject past timestamps.
    async fn schedule(&self, req: ScheduleRequest) -> Result<ScheduleResponse, ApiError>;

    /// `GET /api/upcoming-posts`.
    async fn upcoming_posts(&self) -> Result<UpcomingPostsResponse, ApiError>;

    /// `GET /api/dashboard`. The payload shape is owned by the server.
    async fn dashboard(&self) -> Result<serde_json::Value, ApiError>;
}

pub type ApiBox = Box<dyn Api + Send + Sync>;
