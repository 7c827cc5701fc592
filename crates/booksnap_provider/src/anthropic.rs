use std::time::Duration;

use anyhow::Context as _;
use backon::{ExponentialBuilder, Retryable};
use booksnap_domain::{CompletionRequest, Error, ModelReply, ProviderClient, Result, RetryConfig};
use reqwest::StatusCode;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::ErrorResponse;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the provider's messages API.
///
/// Cheap to clone; connection pooling lives inside the underlying reqwest
/// client.
#[derive(Clone)]
pub struct Anthropic {
    client: reqwest::Client,
    messages_url: Url,
    api_key: String,
    anthropic_version: String,
    retry_config: RetryConfig,
}

impl Anthropic {
    pub fn builder() -> AnthropicBuilder {
        AnthropicBuilder::default()
    }

    async fn send(&self, request: &CompletionRequest) -> Result<ModelReply> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.anthropic_version)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let reply = response
                .json::<ModelReply>()
                .await
                .map_err(map_transport_error)?;
            debug!(
                stop_reason = ?reply.stop_reason,
                blocks = reply.content.len(),
                "received provider reply"
            );
            return Ok(reply);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from_body(&body);
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth,
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
            _ => {
                error!(status = status.as_u16(), %message, "provider call failed");
                Error::Provider { status: Some(status.as_u16()), message }
            }
        })
    }
}

#[async_trait::async_trait]
impl ProviderClient for Anthropic {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply> {
        let strategy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.retry_config.min_delay_ms))
            .with_factor(self.retry_config.backoff_factor as f32)
            .with_max_times(self.retry_config.max_retry_attempts)
            .with_jitter();

        (|| self.send(&request))
            .retry(&strategy)
            .when(|error: &Error| error.is_retryable(&self.retry_config.retry_status_codes))
            .notify(|error: &Error, delay: Duration| {
                warn!(%error, ?delay, "retrying provider call");
            })
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout
    } else {
        Error::Provider {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

pub struct AnthropicBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    anthropic_version: String,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl Default for AnthropicBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_config: RetryConfig::default(),
        }
    }
}

impl AnthropicBuilder {
    pub fn api_key(mut self, api_key: impl ToString) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn anthropic_version(mut self, version: impl ToString) -> Self {
        self.anthropic_version = version.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn build(self) -> anyhow::Result<Anthropic> {
        let api_key = self.api_key.context("provider API key is required")?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        let messages_url = base_url
            .join("v1/messages")
            .with_context(|| format!("failed to join v1/messages onto {base_url}"))?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to initialize HTTP client")?;

        Ok(Anthropic {
            client,
            messages_url,
            api_key,
            anthropic_version: self.anthropic_version,
            retry_config: self.retry_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use booksnap_domain::{Message, ModelId, StopReason, ToolDefinition};
    use pretty_assertions::assert_eq;

    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> Anthropic {
        Anthropic::builder()
            .api_key("sk-test")
            .base_url(Url::parse(&server.url()).unwrap())
            .retry_config(
                RetryConfig::default()
                    .min_delay_ms(1u64)
                    .max_retry_attempts(1usize),
            )
            .build()
            .unwrap()
    }

    fn request_fixture() -> CompletionRequest {
        CompletionRequest::new(ModelId::default(), 1024)
            .system("You summarize books.")
            .tools(vec![ToolDefinition::web_search()])
            .messages(vec![Message::user_text("hello")])
    }

    #[tokio::test]
    async fn test_complete_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "sk-test")
            .match_header("anthropic-version", DEFAULT_ANTHROPIC_VERSION)
            .with_status(200)
            .with_body(
                r#"{"id":"msg_1","role":"assistant",
                    "content":[{"type":"text","text":"summary text"}],
                    "stop_reason":"end_turn","usage":{"input_tokens":1,"output_tokens":1}}"#,
            )
            .create_async()
            .await;

        let actual = client_for(&server)
            .complete(request_fixture())
            .await
            .unwrap();

        assert_eq!(actual.stop_reason, StopReason::EndTurn);
        assert_eq!(actual.text(), "summary text");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(
                r#"{"type":"error","error":{"type":"authentication_error","message":"bad key"}}"#,
            )
            .create_async()
            .await;

        let actual = client_for(&server).complete(request_fixture()).await;

        assert!(matches!(actual, Err(Error::Auth)));
    }

    #[tokio::test]
    async fn test_throttling_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .with_body(
                r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let actual = client_for(&server).complete(request_fixture()).await;

        assert!(matches!(actual, Err(Error::RateLimited)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_failure_is_retried_then_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(503)
            .with_body(
                r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
            )
            .expect(2)
            .create_async()
            .await;

        let actual = client_for(&server).complete(request_fixture()).await;

        match actual {
            Err(Error::Provider { status, .. }) => assert_eq!(status, Some(503)),
            other => panic!("expected provider error, got {other:?}"),
        }
        mock.assert_async().await;
    }
}
