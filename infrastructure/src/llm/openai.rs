//! OpenAI-compatible chat-completions client.

use super::protocol::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use crate::http::{build_client, join_url, snippet};
use assistant_application::{ChatRequest, LanguageModel, LanguageModelError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub struct OpenAiChatModel {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiChatModel {
    /// A missing key is not an error here; requests fail with
    /// [`LanguageModelError::NotConfigured`] instead, so the server still
    /// starts and answers with the generic failure.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LanguageModelError> {
        let client =
            build_client(timeout).map_err(|e| LanguageModelError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: join_url(base_url, "chat/completions"),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    async fn chat(&self, request: ChatRequest) -> Result<String, LanguageModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LanguageModelError::NotConfigured("llm.api_key is not set".into()))?;

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %request.model, messages = body.messages.len(), "Calling chat completions");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LanguageModelError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LanguageModelError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat completions returned an error");
            return Err(LanguageModelError::Status {
                status: status.as_u16(),
                snippet: snippet(&text),
            });
        }

        first_choice_text(&text)
    }
}

fn first_choice_text(text: &str) -> Result<String, LanguageModelError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(text)
        .map_err(|e| LanguageModelError::Decode(format!("{}: {}", e, snippet(text))))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LanguageModelError::Decode("response has no choices".into()))?;

    Ok(choice.message.content.unwrap_or_default())
}
