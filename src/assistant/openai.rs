//! Hosted assistants API client
//!
//! This module implements the `AssistantApi` trait over HTTP using the
//! threads / runs / messages endpoints of the hosted assistants service.

use crate::assistant::{AssistantApi, Role, RunStatus, ThreadMessage};
use crate::config::AssistantConfig;
use crate::error::{RelayError, RelayResult, Result};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Beta header required by the assistants endpoints
const ASSISTANTS_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Assistants API client
///
/// A single client is shared by all requests; it holds only the HTTP
/// connection pool and immutable configuration.
///
/// # Examples
///
/// ```no_run
/// use assistant_relay::assistant::{AssistantApi, OpenAiAssistantClient, Role};
/// use assistant_relay::config::AssistantConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = AssistantConfig {
///     api_key: "sk-test".to_string(),
///     assistant_id: "asst_123".to_string(),
///     ..Default::default()
/// };
/// let client = OpenAiAssistantClient::new(config)?;
/// let thread_id = client.create_thread().await?;
/// client.post_message(&thread_id, Role::User, "Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiAssistantClient {
    client: Client,
    config: AssistantConfig,
    base_url: Url,
}

/// Any object response where only the id matters
#[derive(Debug, Deserialize)]
struct ObjectResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Run object from `GET /threads/{id}/runs/{run_id}`
#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    status: Option<RunStatus>,
}

/// Page of thread messages
#[derive(Debug, Deserialize)]
struct MessageListResponse {
    #[serde(default)]
    data: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default = "default_role")]
    role: Role,
    #[serde(default)]
    content: Vec<ContentPart>,
}

fn default_role() -> Role {
    Role::Other
}

/// One content part; non-text parts (images, files) carry no `text`
#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

impl ApiMessage {
    fn into_thread_message(self) -> ThreadMessage {
        let text = self
            .content
            .into_iter()
            .find_map(|part| part.text.and_then(|t| t.value));
        ThreadMessage {
            role: self.role,
            text,
        }
    }
}

impl OpenAiAssistantClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails or `api_base` is not
    /// a usable base URL
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base)
            .map_err(|e| RelayError::Config(format!("Invalid api_base: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RelayError::Config(format!(
                "api_base cannot be used as a base URL: {}",
                config.api_base
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("assistant-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized assistants client: api_base={}, assistant_id={}",
            config.api_base,
            config.assistant_id
        );

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Endpoint URL under `api_base`; each segment is percent-encoded, so an
    /// id cannot add path components or a query
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send an authenticated request and decode the JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> RelayResult<T> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Assistants {} request failed: {}", operation, e);
                RelayError::RemoteUnavailable(format!("{} request failed: {}", operation, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                "Assistants API returned error {} for {}: {}",
                status,
                operation,
                error_text
            );
            return Err(RelayError::RemoteUnavailable(format!(
                "{} returned {}: {}",
                operation, status, error_text
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", operation, e);
            RelayError::MalformedResponse(format!(
                "{} response could not be parsed: {}",
                operation, e
            ))
        })
    }
}

/// Reject absent or blank identifiers before they are used in a path
fn require_id(id: Option<String>, what: &str) -> RelayResult<String> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(RelayError::MalformedResponse(format!(
            "{} id missing from response",
            what
        ))),
    }
}

#[async_trait]
impl AssistantApi for OpenAiAssistantClient {
    async fn create_thread(&self) -> RelayResult<String> {
        let request = self.client.post(self.endpoint(&["threads"])).json(&json!({}));
        let thread: ObjectResponse = self.send_json(request, "create thread").await?;
        require_id(thread.id, "thread")
    }

    async fn post_message(&self, thread_id: &str, role: Role, text: &str) -> RelayResult<()> {
        let body = CreateMessageRequest {
            role: role.as_str(),
            content: text,
        };
        let request = self
            .client
            .post(self.endpoint(&["threads", thread_id, "messages"]))
            .json(&body);
        let _: IgnoredAny = self.send_json(request, "create message").await?;
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<String> {
        let request = self
            .client
            .post(self.endpoint(&["threads", thread_id, "runs"]))
            .json(&CreateRunRequest { assistant_id });
        let run: ObjectResponse = self.send_json(request, "create run").await?;
        require_id(run.id, "run")
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> RelayResult<RunStatus> {
        let request = self
            .client
            .get(self.endpoint(&["threads", thread_id, "runs", run_id]));
        let run: RunResponse = self.send_json(request, "retrieve run").await?;
        run.status
            .ok_or_else(|| RelayError::MalformedResponse("run status missing".to_string()))
    }

    async fn list_messages(&self, thread_id: &str) -> RelayResult<Vec<ThreadMessage>> {
        let request = self
            .client
            .get(self.endpoint(&["threads", thread_id, "messages"]));
        let page: MessageListResponse = self.send_json(request, "list messages").await?;
        tracing::debug!("Listed {} messages on thread {}", page.data.len(), thread_id);
        Ok(page
            .data
            .into_iter()
            .map(ApiMessage::into_thread_message)
            .collect())
    }
}
