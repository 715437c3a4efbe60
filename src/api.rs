use crate::models::{Credentials, LoginReply, NewTask, ServerReply, TaskFetch, TokenReply};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const TASKS_PATH: &str = "/api/tasks";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response shape")]
    Unexpected,
}

/// The remote task-list service as seen by the client.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<ServerReply, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError>;

    async fn list_tasks(&self, token: &str) -> Result<TaskFetch, ApiError>;

    /// Only transport failures and non-2xx statuses are reported; the body is
    /// never read.
    async fn create_task(&self, token: &str, description: &str) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(token: &str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(val) = format!("Bearer {token}").parse() {
            headers.insert(reqwest::header::AUTHORIZATION, val);
        }
        headers
    }

    /// Sends the request and decodes the body as JSON whatever the status.
    async fn exchange(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Value), ApiError> {
        let resp = request.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(ApiError::Transport)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok((status, body)),
            Err(_) if !status.is_success() => Err(ApiError::Http {
                status,
                message: text,
            }),
            Err(_) => Err(ApiError::Unexpected),
        }
    }
}

#[async_trait]
impl TaskService for ApiClient {
    async fn register(&self, credentials: &Credentials) -> Result<ServerReply, ApiError> {
        let request = self.client.post(self.url(REGISTER_PATH)).json(credentials);
        let (status, body) = self.exchange(request).await?;
        debug!(%status, "register answered");
        serde_json::from_value(body).map_err(|_| ApiError::Unexpected)
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let request = self.client.post(self.url(LOGIN_PATH)).json(credentials);
        let (status, body) = self.exchange(request).await?;
        debug!(%status, "login answered");
        if status.is_success() {
            let reply: TokenReply =
                serde_json::from_value(body).map_err(|_| ApiError::Unexpected)?;
            Ok(LoginReply::Granted { token: reply.token })
        } else {
            let reply: ServerReply = serde_json::from_value(body).unwrap_or_default();
            Ok(LoginReply::Denied { error: reply.error })
        }
    }

    async fn list_tasks(&self, token: &str) -> Result<TaskFetch, ApiError> {
        let request = self
            .client
            .get(self.url(TASKS_PATH))
            .headers(Self::auth_headers(token));
        let (status, body) = self.exchange(request).await?;
        debug!(%status, "task list answered");
        TaskFetch::from_value(body).ok_or(ApiError::Unexpected)
    }

    async fn create_task(&self, token: &str, description: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url(TASKS_PATH))
            .headers(Self::auth_headers(token))
            .json(&NewTask { description })
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = resp.status();
        debug!(%status, "create task answered");
        if !status.is_success() {
            let message = resp
                .text()
                .await
                .unwrap_or_else(|_| "request failed".to_string());
            return Err(ApiError::Http { status, message });
        }
        Ok(())
    }
}
