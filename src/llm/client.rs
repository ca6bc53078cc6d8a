//! DeepSeek chat-completions client

use futures::stream::Stream;
use futures::StreamExt;
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;

use super::error::LlmError;
use super::model::ChatModel;
use super::sse::parse_sse_stream;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Default DeepSeek API endpoint
const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Sampling temperature used for every completion request
const TEMPERATURE: f64 = 0.7;

/// Output token cap used for every completion request
const MAX_TOKENS: u32 = 2000;

/// Client for the DeepSeek chat-completions API
#[derive(Clone)]
pub struct DeepSeekClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer token for the API
    api_key: String,
    /// API base URL (overridable for tests)
    base_url: String,
}

impl DeepSeekClient {
    /// Create a new client against the default DeepSeek endpoint
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client against an explicit base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::Http {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Build a client from `DEEPSEEK_API_KEY` and optional `DEEPSEEK_BASE_URL`
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("DEEPSEEK_API_KEY").unwrap_or_default();
        match std::env::var("DEEPSEEK_BASE_URL") {
            Ok(base_url) => Self::with_base_url(api_key, base_url),
            Err(_) => Self::new(api_key),
        }
    }

    fn build_endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(
        &self,
        model: ChatModel,
        messages: Vec<ChatMessage>,
        stream: bool,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.as_str().to_string(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream,
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, LlmError> {
        let response = self
            .http_client
            .post(self.build_endpoint_url())
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Issue one blocking completion request and return the full response text
    pub async fn complete(
        &self,
        model: ChatModel,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmError> {
        let request = self.build_request(model, messages, false);
        let response = self.send(&request).await?;

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("completion had no choices".to_string()))
    }

    /// Issue one streaming completion request
    ///
    /// Returns the content fragments in arrival order; empty deltas (such as
    /// the reasoner's reasoning-only chunks) are skipped. Dropping the
    /// returned stream drops the underlying HTTP response.
    pub async fn stream(
        &self,
        model: ChatModel,
        messages: Vec<ChatMessage>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + Sync>>, LlmError> {
        let request = self.build_request(model, messages, true);
        let response = self.send(&request).await?;

        let byte_stream = response.bytes_stream();
        let chunk_stream = parse_sse_stream(Box::pin(byte_stream));

        let content_stream = chunk_stream.filter_map(|result| async move {
            match result {
                Ok(chunk) => chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .filter(|text| !text.is_empty())
                    .map(Ok),
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(content_stream))
    }
}
