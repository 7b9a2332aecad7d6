use super::protocol::{ChatBody, ChatReply};
use crate::http::{build_client, join_url, snippet};
use assistant_application::{CompletionClient, CompletionError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Calls the completion proxy over HTTP.
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
}

impl HttpCompletionClient {
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let client =
            build_client(timeout).map_err(|e| CompletionError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: join_url(api_base_url, "api/chat"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, query: &str, context: &str) -> Result<String, CompletionError> {
        let body = ChatBody { query, context };

        debug!(endpoint = %self.endpoint, context_len = context.len(), "Calling completion proxy");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Completion proxy returned an error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                snippet: snippet(&text),
            });
        }

        parse_reply(&text)
    }
}

fn parse_reply(text: &str) -> Result<String, CompletionError> {
    serde_json::from_str::<ChatReply>(text)
        .map(|reply| reply.message)
        .map_err(|e| CompletionError::Decode(format!("{}: {}", e, snippet(text))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::canned_server;

    #[test]
    fn test_endpoint_is_api_chat() {
        let client =
            HttpCompletionClient::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/chat");
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(
            parse_reply(r#"{"message":"You get 20 days."}"#).unwrap(),
            "You get 20 days."
        );
    }

    #[test]
    fn test_parse_reply_missing_field() {
        assert!(matches!(
            parse_reply(r#"{"answer":"x"}"#),
            Err(CompletionError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_posts_query_and_context_to_api_chat() {
        let (base, seen) = canned_server(vec![(200, r#"{"message":"You get 20 days."}"#)]).await;
        let client = HttpCompletionClient::new(&base, Duration::from_secs(5)).unwrap();

        let answer = client
            .complete("vacation policy", "HR.pdf:\nEmployees get 20 days")
            .await
            .unwrap();

        assert_eq!(answer, "You get 20 days.");
        let requests = seen.lock().unwrap();
        assert_eq!(requests[0].line, "POST /api/chat HTTP/1.1");
        let body = requests[0].json();
        assert_eq!(body["query"], "vacation policy");
        assert_eq!(body["context"], "HR.pdf:\nEmployees get 20 days");
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let (base, _) = canned_server(vec![(
            500,
            r#"{"error":"An error occurred while processing your request"}"#,
        )])
        .await;
        let client = HttpCompletionClient::new(&base, Duration::from_secs(5)).unwrap();

        let result = client.complete("q", "c").await;

        match result {
            Err(CompletionError::Status { status, snippet }) => {
                assert_eq!(status, 500);
                assert!(snippet.contains("An error occurred"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client =
            HttpCompletionClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let result = client.complete("q", "c").await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }
}
