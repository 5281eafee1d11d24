//! Native typed client for the cartoon-diary backend.
//!
//! One method per backend operation, no retries, no caching. Non-2xx
//! responses surface the server's `detail` message when the body carries
//! one, else the operation's fixed fallback text.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use cdiary_client_core::config::{normalize_base_url, resolve_api_base_url};
use cdiary_client_core::types::{
    ArtifactDetail, ArtifactListing, DiaryEntryRequest, DiaryRecord, GenerateAccepted,
    GeneratedImage, ImageGenerationRequest, JobSnapshot, LoginRequest, RegisterRequest,
    SaveProfileImageRequest, SavedProfileImage, StatusMessage, TokenResponse, UserProfile,
    UserUpdateRequest, UserUpdated,
};

pub mod stream;

pub use stream::{JobStream, SseFrameReader};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct DiaryApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl DiaryApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiaryApiClient {
    base_url: String,
    timeout: Duration,
    bearer_token: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum DiaryApiError {
    #[error("api_base_url_invalid:{message}")]
    BaseUrl { message: String },
    #[error("api_invalid_path")]
    InvalidPath,
    #[error("api_request_failed:{message}")]
    Request { message: String },
    #[error("api_read_failed:{message}")]
    Read { message: String },
    /// Non-2xx response; `detail` is the server's message when present,
    /// else the operation's fallback text.
    #[error("{detail}")]
    Http { status: StatusCode, detail: String },
    #[error("api_json_decode_failed:{message}")]
    Decode { message: String },
}

impl DiaryApiClient {
    pub fn new(config: DiaryApiConfig) -> Result<Self, DiaryApiError> {
        let base_url =
            normalize_base_url(&config.base_url).map_err(|error| DiaryApiError::BaseUrl {
                message: error.to_string(),
            })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            bearer_token: None,
            http: reqwest::Client::new(),
        })
    }

    /// Client against the environment-resolved base URL
    /// (`CDIARY_API_BASE_URL`, else the local development default).
    pub fn from_env() -> Result<Self, DiaryApiError> {
        let (base_url, _source) =
            resolve_api_base_url().map_err(|error| DiaryApiError::BaseUrl {
                message: error.to_string(),
            })?;
        Self::new(DiaryApiConfig::new(base_url))
    }

    /// Session token attached as `Authorization: Bearer` on every call
    /// until cleared.
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }

    #[must_use]
    pub fn register_path() -> &'static str {
        "/auth/register"
    }

    #[must_use]
    pub fn login_path() -> &'static str {
        "/auth/login"
    }

    #[must_use]
    pub fn generate_diary_path() -> &'static str {
        "/diary/generate"
    }

    #[must_use]
    pub fn job_path(job_id: &str) -> String {
        format!("/jobs/{}", job_id.trim())
    }

    #[must_use]
    pub fn jobs_stream_path() -> &'static str {
        "/jobs/stream"
    }

    #[must_use]
    pub fn user_diaries_path(user_id: &str) -> String {
        format!("/diary/user/{}", user_id.trim())
    }

    #[must_use]
    pub fn search_diaries_path() -> &'static str {
        "/diary/search"
    }

    #[must_use]
    pub fn artifacts_path() -> &'static str {
        "/artifacts"
    }

    #[must_use]
    pub fn artifact_path(artifact_id: &str) -> String {
        format!("/artifacts/{}", artifact_id.trim())
    }

    #[must_use]
    pub fn user_path(user_id: &str) -> String {
        format!("/users/{}", user_id.trim())
    }

    #[must_use]
    pub fn generate_image_path() -> &'static str {
        "/image/generate"
    }

    #[must_use]
    pub fn save_profile_image_path() -> &'static str {
        "/image/save"
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<TokenResponse, DiaryApiError> {
        let builder = self.request(Method::POST, Self::register_path())?;
        execute(builder.json(request), "Registration failed.").await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, DiaryApiError> {
        let builder = self.request(Method::POST, Self::login_path())?;
        execute(builder.json(request), "Invalid username or password.").await
    }

    pub async fn generate_diary(
        &self,
        request: &DiaryEntryRequest,
    ) -> Result<GenerateAccepted, DiaryApiError> {
        let builder = self.request(Method::POST, Self::generate_diary_path())?;
        execute(builder.json(request), "Failed to start generation.").await
    }

    pub async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, DiaryApiError> {
        let builder = self.request(Method::GET, &Self::job_path(job_id))?;
        execute(builder, "Failed to get job status.").await
    }

    /// Feed listing. An absent `query` is the recent-for-user listing; a
    /// present one asks the backend to rank by relevance.
    pub async fn list_artifacts(
        &self,
        user_id: &str,
        limit: u32,
        query: Option<&str>,
    ) -> Result<ArtifactListing, DiaryApiError> {
        let mut builder = self
            .request(Method::GET, Self::artifacts_path())?
            .query(&[("user_id", user_id)])
            .query(&[("limit", limit)]);
        if let Some(query) = query {
            builder = builder.query(&[("query", query)]);
        }
        execute(builder, "Failed to list artifacts.").await
    }

    pub async fn user_diaries(&self, user_id: &str) -> Result<Vec<DiaryRecord>, DiaryApiError> {
        let builder = self.request(Method::GET, &Self::user_diaries_path(user_id))?;
        execute(builder, "Failed to load diaries.").await
    }

    pub async fn search_diaries(
        &self,
        user_id: &str,
        query: &str,
    ) -> Result<Vec<DiaryRecord>, DiaryApiError> {
        let builder = self
            .request(Method::GET, Self::search_diaries_path())?
            .query(&[("user_id", user_id), ("query", query)]);
        execute(builder, "Failed to search diaries.").await
    }

    pub async fn artifact(&self, artifact_id: &str) -> Result<ArtifactDetail, DiaryApiError> {
        let builder = self.request(Method::GET, &Self::artifact_path(artifact_id))?;
        execute(builder, "Failed to get artifact.").await
    }

    pub async fn delete_artifact(&self, artifact_id: &str) -> Result<StatusMessage, DiaryApiError> {
        let builder = self.request(Method::DELETE, &Self::artifact_path(artifact_id))?;
        execute(builder, "Failed to delete diary.").await
    }

    pub async fn user(&self, user_id: &str) -> Result<UserProfile, DiaryApiError> {
        let builder = self.request(Method::GET, &Self::user_path(user_id))?;
        execute(builder, "Failed to load user.").await
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UserUpdateRequest,
    ) -> Result<UserUpdated, DiaryApiError> {
        let builder = self.request(Method::PUT, &Self::user_path(user_id))?;
        execute(builder.json(request), "Failed to update profile.").await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<StatusMessage, DiaryApiError> {
        let builder = self.request(Method::DELETE, &Self::user_path(user_id))?;
        execute(builder, "Failed to delete account.").await
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, DiaryApiError> {
        let builder = self.request(Method::POST, Self::generate_image_path())?;
        let request = ImageGenerationRequest {
            prompt: prompt.to_string(),
        };
        execute(builder.json(&request), "Failed to generate image.").await
    }

    pub async fn save_profile_image(
        &self,
        request: &SaveProfileImageRequest,
    ) -> Result<SavedProfileImage, DiaryApiError> {
        let builder = self.request(Method::POST, Self::save_profile_image_path())?;
        execute(builder.json(request), "Failed to save profile image.").await
    }

    /// Open the long-lived job snapshot stream. The reader yields one full
    /// snapshot per server frame until the connection closes. The request
    /// timeout deliberately does not apply here.
    pub async fn open_job_stream(&self) -> Result<JobStream, DiaryApiError> {
        let url = self
            .endpoint(Self::jobs_stream_path())
            .ok_or(DiaryApiError::InvalidPath)?;
        let mut builder = self
            .http
            .get(url)
            .header("accept", "text/event-stream")
            .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder
            .send()
            .await
            .map_err(|error| DiaryApiError::Request {
                message: error.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.unwrap_or_default();
            return Err(http_error(status, &bytes, "Failed to open job stream."));
        }
        Ok(JobStream::new(response))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, DiaryApiError> {
        let url = self.endpoint(path).ok_or(DiaryApiError::InvalidPath)?;
        let mut builder = self
            .http
            .request(method, url)
            .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
            .timeout(self.timeout);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }
}

async fn execute<T>(builder: reqwest::RequestBuilder, fallback: &str) -> Result<T, DiaryApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = builder
        .send()
        .await
        .map_err(|error| DiaryApiError::Request {
            message: error.to_string(),
        })?;
    decode_json_response(response, fallback).await
}

async fn decode_json_response<T>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, DiaryApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let bytes = response.bytes().await.map_err(|error| DiaryApiError::Read {
        message: error.to_string(),
    })?;

    if !status.is_success() {
        return Err(http_error(status, &bytes, fallback));
    }

    serde_json::from_slice::<T>(&bytes).map_err(|error| DiaryApiError::Decode {
        message: error.to_string(),
    })
}

/// Prefer the server's `{"detail": ...}` message; fall back to the
/// operation's fixed text.
pub fn http_error(status: StatusCode, body: &[u8], fallback: &str) -> DiaryApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|value| match value {
            serde_json::Value::String(text) => {
                let trimmed = text.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string());

    DiaryApiError::Http { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DiaryApiClient {
        DiaryApiClient::new(DiaryApiConfig::new("http://localhost:5050/api")).expect("client")
    }

    #[test]
    fn endpoint_builder_normalizes_paths() {
        let client = client();
        assert_eq!(
            client.endpoint("/jobs/stream"),
            Some("http://localhost:5050/api/jobs/stream".to_string())
        );
        assert_eq!(
            client.endpoint("jobs/stream"),
            Some("http://localhost:5050/api/jobs/stream".to_string())
        );
        assert_eq!(client.endpoint(""), None);
    }

    #[test]
    fn path_helpers_are_deterministic() {
        assert_eq!(DiaryApiClient::register_path(), "/auth/register");
        assert_eq!(DiaryApiClient::login_path(), "/auth/login");
        assert_eq!(DiaryApiClient::generate_diary_path(), "/diary/generate");
        assert_eq!(DiaryApiClient::job_path(" job-7 "), "/jobs/job-7");
        assert_eq!(DiaryApiClient::jobs_stream_path(), "/jobs/stream");
        assert_eq!(DiaryApiClient::user_diaries_path("u1"), "/diary/user/u1");
        assert_eq!(DiaryApiClient::artifact_path("A1"), "/artifacts/A1");
        assert_eq!(DiaryApiClient::user_path("u1"), "/users/u1");
        assert_eq!(DiaryApiClient::generate_image_path(), "/image/generate");
        assert_eq!(DiaryApiClient::save_profile_image_path(), "/image/save");
    }

    #[test]
    fn http_error_prefers_server_detail() {
        let error = http_error(
            StatusCode::BAD_REQUEST,
            br#"{"detail": "Username or Email already registered"}"#,
            "Registration failed.",
        );
        assert_eq!(
            error.to_string(),
            "Username or Email already registered"
        );
    }

    #[test]
    fn http_error_falls_back_when_detail_is_absent_or_structured() {
        let missing = http_error(StatusCode::BAD_GATEWAY, b"<html>boom</html>", "Failed to get artifact.");
        assert_eq!(missing.to_string(), "Failed to get artifact.");

        // FastAPI validation errors carry a list in `detail`.
        let structured = http_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail": [{"loc": ["body", "mood"], "msg": "field required"}]}"#,
            "Failed to start generation.",
        );
        assert_eq!(structured.to_string(), "Failed to start generation.");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = DiaryApiClient::new(DiaryApiConfig::new("   "));
        assert!(matches!(result, Err(DiaryApiError::BaseUrl { .. })));
    }
}
