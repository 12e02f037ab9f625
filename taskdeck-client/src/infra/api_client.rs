use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdeck_config::ClientConfig;
use taskdeck_model::{DeleteTaskResponse, Task, TaskDraft, TaskId, TaskPage};

use super::errors::{ClientError, ClientResult};
use crate::carousel::{Page, PageQuery, PaginationSource};

const TASKS_PATH: &str = "/api/tasks";

/// HTTP client for the task API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Add a scheme when missing and trim trailing slashes so paths can be
/// appended with a single `/`.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> ClientResult<Self> {
        let raw = base_url.as_ref();
        let base_url = normalize_base_url(raw);
        if base_url != raw {
            warn!(
                "[ApiClient] Normalized base URL from '{}' to '{}'",
                raw, base_url
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        info!("[ApiClient] Using task API at {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        format!("{}/{}", self.base_url, path.as_ref().trim_start_matches('/'))
    }

    pub async fn fetch_tasks(&self, query: PageQuery) -> ClientResult<TaskPage> {
        let url = self.build_url(TASKS_PATH);
        debug!(
            "GET {} status={} page={} limit={}",
            url, query.status, query.page, query.limit
        );
        let request = self.client.get(&url).query(&[
            ("status", query.status.api_name().to_string()),
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ]);
        self.execute(url, request).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> ClientResult<Task> {
        let url = self.build_url(TASKS_PATH);
        let request = self.client.post(&url).json(draft);
        self.execute(url, request).await
    }

    pub async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> ClientResult<Task> {
        let url = self.build_url(format!("{TASKS_PATH}/{id}"));
        let request = self.client.put(&url).json(draft);
        self.execute(url, request).await
    }

    pub async fn delete_task(&self, id: TaskId) -> ClientResult<DeleteTaskResponse> {
        let url = self.build_url(format!("{TASKS_PATH}/{id}"));
        let request = self.client.delete(&url);
        self.execute(url, request).await
    }

    pub async fn toggle_task(&self, id: TaskId) -> ClientResult<Task> {
        let url = self.build_url(format!("{TASKS_PATH}/{id}/toggle"));
        let request = self.client.patch(&url);
        self.execute(url, request).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        url: String,
        request: RequestBuilder,
    ) -> ClientResult<R> {
        let response = request.send().await.map_err(|source| ClientError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                }),
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }
}

/// Pull the message out of `{"error": {"message": ..}}` (or a bare
/// `{"error": ".."}`), falling back to the raw body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}

#[async_trait]
impl PaginationSource for ApiClient {
    type Item = Task;
    type Error = ClientError;

    async fn fetch_page(&self, query: PageQuery) -> Result<Page<Task>, ClientError> {
        self.fetch_tasks(query).await.map(Page::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(normalize_base_url("localhost:4000"), "http://localhost:4000");
        assert_eq!(
            normalize_base_url(" https://tasks.example.com/ "),
            "https://tasks.example.com"
        );
        assert_eq!(normalize_base_url("http://a:1//"), "http://a:1");
    }

    #[test]
    fn urls_join_with_a_single_slash() {
        let client = ApiClient::new("http://localhost:4000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.build_url("/api/tasks"),
            "http://localhost:4000/api/tasks"
        );
        assert_eq!(
            client.build_url("api/tasks/3/toggle"),
            "http://localhost:4000/api/tasks/3/toggle"
        );
    }

    #[test]
    fn error_messages_are_extracted() {
        assert_eq!(
            error_message(r#"{"error":{"message":"Task not found","status":404}}"#).as_deref(),
            Some("Task not found")
        );
        assert_eq!(
            error_message(r#"{"error":"Title is required"}"#).as_deref(),
            Some("Title is required")
        );
        assert_eq!(error_message("gateway down").as_deref(), Some("gateway down"));
        assert_eq!(error_message("  "), None);
    }
}
