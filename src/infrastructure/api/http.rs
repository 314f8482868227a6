#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio_util::io::ReaderStream;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Api;
use crate::domain::models::ApiError;
use crate::domain::models::GenerateContentRequest;
use crate::domain::models::GenerateContentResponse;
use crate::domain::models::PublishRequest;
use crate::domain::models::PublishResponse;
use crate::domain::models::ScheduleRequest;
use crate::domain::models::ScheduleResponse;
use crate::domain::models::UpcomingPostsResponse;
use crate::domain::models::UploadRequest;

const GENERATE_FAILED: &str = "Failed to generate content";
const UPLOAD_FAILED: &str = "Failed to upload file";
const PUBLISH_FAILED: &str = "Failed to publish content";
const SCHEDULE_FAILED: &str = "Failed to schedule post";
const UPCOMING_FAILED: &str = "Failed to fetch upcoming posts";
const DASHBOARD_FAILED: &str = "Failed to fetch dashboard data";

/// JSON over HTTP client for the linkpost server.
pub struct HttpApi {
    url: String,
    client: reqwest::Client,
}

impl Default for HttpApi {
    fn default() -> HttpApi {
        return HttpApi::with_url(Config::get(ConfigKey::ServerURL));
    }
}

impl HttpApi {
    pub fn with_url(url: String) -> HttpApi {
        return HttpApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url);
    }

    async fn read<T: DeserializeOwned>(
        context: &'static str,
        res: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, ApiError> {
        let res = res.map_err(|source| return ApiError::Transport { context, source })?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), context, "request failed");
            return Err(ApiError::Status {
                context,
                status: status.as_u16(),
            });
        }

        return res
            .json::<T>()
            .await
            .map_err(|source| return ApiError::Decode { context, source });
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let res = self.client.post(self.endpoint(path)).json(body).send().await;
        return HttpApi::read(context, res).await;
    }

    /// Posts `body` where the server only promises a 2xx. Whatever comes back
    /// is handed over as JSON when it parses, `Value::Null` otherwise.
    async fn post_opaque<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> Result<serde_json::Value, ApiError> {
        let res = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|source| return ApiError::Transport { context, source })?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), context, "request failed");
            return Err(ApiError::Status {
                context,
                status: status.as_u16(),
            });
        }

        let text = res.text().await.unwrap_or_default();
        return Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::Null));
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let res = self.client.get(self.endpoint(path)).send().await;
        return HttpApi::read(context, res).await;
    }
}

#[async_trait]
impl Api for HttpApi {
    #[allow(clippy::implicit_return)]
    async fn generate_content(
        &self,
        req: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        return self
            .post_json("/api/generate-content", &req, GENERATE_FAILED)
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn upload(&self, req: UploadRequest) -> Result<GenerateContentResponse, ApiError> {
        let path_display = req.path.to_string_lossy().to_string();
        let file_err = |source| {
            return ApiError::File {
                path: path_display.to_string(),
                source,
            };
        };

        let file = fs::File::open(&req.path).await.map_err(file_err)?;
        let len = file.metadata().await.map_err(file_err)?.len();
        let file_name = req
            .path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return "upload".to_string());

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::stream_with_length(body, len).file_name(file_name),
            )
            .text("tone", req.tone.to_string());

        let res = self
            .client
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await;

        return HttpApi::read(UPLOAD_FAILED, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn publish(&self, req: PublishRequest) -> Result<PublishResponse, ApiError> {
        let res = self.post_opaque("/api/publish", &req, PUBLISH_FAILED).await?;
        return Ok(PublishResponse::from_value(&res));
    }

    #[allow(clippy::implicit_return)]
    async fn schedule(&self, req: ScheduleRequest) -> Result<ScheduleResponse, ApiError> {
        let res = self.post_opaque("/api/schedule", &req, SCHEDULE_FAILED).await?;
        return Ok(ScheduleResponse::from_value(&res));
    }

    #[allow(clippy::implicit_return)]
    async fn upcoming_posts(&self) -> Result<UpcomingPostsResponse, ApiError> {
        return self.get_json("/api/upcoming-posts", UPCOMING_FAILED).await;
    }

    #[allow(clippy::implicit_return)]
    async fn dashboard(&self) -> Result<serde_json::Value, ApiError> {
        return self.get_json("/api/dashboard", DASHBOARD_FAILED).await;
    }
}
