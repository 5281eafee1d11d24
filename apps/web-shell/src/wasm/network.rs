use super::*;

    /// Failure of a backend call as the screens see it: the server's
    /// `detail` message when one was sent, else the caller's localized
    /// fallback.
    #[derive(Debug, Clone)]
    pub(crate) struct ApiError {
        pub(crate) status: u16,
        pub(crate) detail: Option<String>,
        message: String,
    }

    impl ApiError {
        fn transport(message: String) -> Self {
            Self {
                status: 0,
                detail: None,
                message,
            }
        }

        fn decode(message: String) -> Self {
            Self {
                status: 0,
                detail: None,
                message,
            }
        }

        fn http(status: u16, detail: Option<String>) -> Self {
            let message = detail
                .clone()
                .unwrap_or_else(|| format!("request failed with status {status}"));
            Self {
                status,
                detail,
                message,
            }
        }

        pub(crate) fn user_message(&self, language: Language, fallback: MessageKey) -> String {
            self.detail
                .clone()
                .unwrap_or_else(|| locale::text(language, fallback).to_string())
        }
    }

    impl std::fmt::Display for ApiError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            if self.status > 0 {
                write!(f, "http {}: {}", self.status, self.message)
            } else {
                write!(f, "{}", self.message)
            }
        }
    }

    /// The deployed page may pin the API origin through a global before the
    /// wasm module loads; development falls back to the local backend.
    pub(super) fn resolve_shell_api_base() -> String {
        if let Some(window) = web_sys::window() {
            if let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(API_BASE_GLOBAL)) {
                if let Some(base) = value.as_string() {
                    if let Ok(normalized) = config::normalize_base_url(&base) {
                        return normalized;
                    }
                    console_warn("ignoring invalid API base override");
                }
            }
        }
        config::DEFAULT_API_BASE_URL.to_string()
    }

    fn api_url(path: &str) -> String {
        API_BASE_URL.with(|base| format!("{}{path}", base.borrow()))
    }

    fn bearer_token() -> Option<String> {
        APP_STATE.with(|state| {
            state
                .borrow()
                .session
                .as_ref()
                .map(|session| session.token.clone())
        })
    }

    fn encode(value: &str) -> String {
        js_sys::encode_uri_component(value).into()
    }

    pub(super) fn jobs_stream_url() -> String {
        api_url("/jobs/stream")
    }

    fn get_request(url: &str) -> gloo_net::http::RequestBuilder {
        let mut builder = Request::get(url);
        if let Some(token) = bearer_token() {
            builder = builder.header("authorization", &format!("Bearer {token}"));
        }
        builder
    }

    fn post_request(url: &str) -> gloo_net::http::RequestBuilder {
        let mut builder = Request::post(url);
        if let Some(token) = bearer_token() {
            builder = builder.header("authorization", &format!("Bearer {token}"));
        }
        builder
    }

    fn put_request(url: &str) -> gloo_net::http::RequestBuilder {
        let mut builder = Request::put(url);
        if let Some(token) = bearer_token() {
            builder = builder.header("authorization", &format!("Bearer {token}"));
        }
        builder
    }

    fn delete_request(url: &str) -> gloo_net::http::RequestBuilder {
        let mut builder = Request::delete(url);
        if let Some(token) = bearer_token() {
            builder = builder.header("authorization", &format!("Bearer {token}"));
        }
        builder
    }

    async fn send_get<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
        let response = get_request(url)
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))?;
        decode_json_response(response).await
    }

    async fn send_json<Req, Res>(
        builder: gloo_net::http::RequestBuilder,
        payload: &Req,
    ) -> Result<Res, ApiError>
    where
        Req: serde::Serialize + ?Sized,
        Res: serde::de::DeserializeOwned,
    {
        let request = builder
            .json(payload)
            .map_err(|error| ApiError::transport(error.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))?;
        decode_json_response(response).await
    }

    async fn send_empty<T: serde::de::DeserializeOwned>(
        builder: gloo_net::http::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))?;
        decode_json_response(response).await
    }

    async fn decode_json_response<T: serde::de::DeserializeOwned>(
        response: gloo_net::http::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))?;

        if !(200..=299).contains(&status) {
            return Err(ApiError::http(status, extract_detail(&raw)));
        }

        serde_json::from_str(&raw).map_err(|error| ApiError::decode(error.to_string()))
    }

    /// FastAPI-style error bodies: `{"detail": "..."}`. Structured details
    /// (validation lists) are not user text and fall through.
    fn extract_detail(raw: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            detail: Option<serde_json::Value>,
        }

        serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.detail)
            .and_then(|value| match value {
                serde_json::Value::String(text) => {
                    let trimmed = text.trim().to_string();
                    (!trimmed.is_empty()).then_some(trimmed)
                }
                _ => None,
            })
    }

    pub(super) async fn register(request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        send_json(post_request(&api_url("/auth/register")), request).await
    }

    pub(super) async fn login(request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        send_json(post_request(&api_url("/auth/login")), request).await
    }

    pub(super) async fn generate_diary(
        request: &DiaryEntryRequest,
    ) -> Result<GenerateAccepted, ApiError> {
        send_json(post_request(&api_url("/diary/generate")), request).await
    }

    pub(super) async fn job_status(job_id: &str) -> Result<JobSnapshot, ApiError> {
        send_get(&api_url(&format!("/jobs/{}", encode(job_id)))).await
    }

    pub(super) async fn load_feed(query: &FeedQuery) -> Result<Vec<ArtifactSummary>, ApiError> {
        let url = match query {
            FeedQuery::Recent { user_id, limit } => api_url(&format!(
                "/artifacts?user_id={}&limit={limit}",
                encode(user_id)
            )),
            FeedQuery::Search { user_id, query } => api_url(&format!(
                "/artifacts?user_id={}&query={}",
                encode(user_id),
                encode(query)
            )),
        };
        let listing: ArtifactListing = send_get(&url).await?;
        Ok(listing.items)
    }

    pub(super) async fn artifact(artifact_id: &str) -> Result<ArtifactDetail, ApiError> {
        send_get(&api_url(&format!("/artifacts/{}", encode(artifact_id)))).await
    }

    pub(super) async fn delete_artifact(artifact_id: &str) -> Result<StatusMessage, ApiError> {
        send_empty(delete_request(&api_url(&format!(
            "/artifacts/{}",
            encode(artifact_id)
        ))))
        .await
    }

    pub(super) async fn get_user(user_id: &str) -> Result<UserProfile, ApiError> {
        send_get(&api_url(&format!("/users/{}", encode(user_id)))).await
    }

    pub(super) async fn update_user(
        user_id: &str,
        request: &UserUpdateRequest,
    ) -> Result<UserUpdated, ApiError> {
        send_json(
            put_request(&api_url(&format!("/users/{}", encode(user_id)))),
            request,
        )
        .await
    }

    pub(super) async fn delete_user(user_id: &str) -> Result<StatusMessage, ApiError> {
        send_empty(delete_request(&api_url(&format!(
            "/users/{}",
            encode(user_id)
        ))))
        .await
    }

    pub(super) async fn generate_image(prompt: &str) -> Result<GeneratedImage, ApiError> {
        let request = ImageGenerationRequest {
            prompt: prompt.to_string(),
        };
        send_json(post_request(&api_url("/image/generate")), &request).await
    }

    pub(super) async fn save_profile_image(
        request: &SaveProfileImageRequest,
    ) -> Result<SavedProfileImage, ApiError> {
        send_json(post_request(&api_url("/image/save")), request).await
    }
