//! Route handlers for the completion server.

use super::error::ApiError;
use super::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body of `POST /api/chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequestBody {
    pub query: String,
    pub context: String,
}

/// Success body of `POST /api/chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `POST /api/chat`
///
/// A malformed body is reported like any other failure: generic 500.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponseBody>, ApiError> {
    let Json(body) = payload?;
    debug!(
        query_len = body.query.len(),
        context_len = body.context.len(),
        "Chat request received"
    );

    let message = state.completion.execute(&body.query, &body.context).await?;
    Ok(Json(ChatResponseBody { message }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::error::{ErrorBody, GENERIC_FAILURE};
    use crate::http::routes::create_router;
    use assistant_application::{
        ChatRequest, LanguageModel, LanguageModelError, ProxyCompletionUseCase,
    };
    use assistant_domain::Role;
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    struct MockModel {
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl LanguageModel for MockModel {
        async fn chat(&self, request: ChatRequest) -> Result<String, LanguageModelError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(LanguageModelError::Transport)
        }
    }

    fn make_app(reply: Result<String, String>) -> (Router, Arc<MockModel>) {
        let model = Arc::new(MockModel {
            reply,
            seen: Mutex::new(Vec::new()),
        });
        let state = AppState::new(ProxyCompletionUseCase::new(model.clone()));
        (create_router(state, CorsLayer::permissive()), model)
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::post("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = make_app(Ok(String::new()));
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_chat_returns_model_answer() {
        let (app, model) = make_app(Ok("You get 20 days.".to_string()));
        let resp = app
            .oneshot(chat_request(
                r#"{"query":"vacation policy","context":"HR.pdf:\nEmployees get 20 days..."}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let reply: ChatResponseBody = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(reply.message, "You get 20 days.");

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.messages[0].role(), Role::System);
        assert!(
            request.messages[0]
                .content()
                .ends_with("HR.pdf:\nEmployees get 20 days...")
        );
        assert_eq!(request.messages[1].content(), "vacation policy");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_model_failure_is_generic_500() {
        let (app, _) = make_app(Err("upstream exploded with secret detail".to_string()));
        let resp = app
            .oneshot(chat_request(r#"{"query":"q","context":""}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(body.error, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_malformed_body_is_generic_500() {
        let (app, model) = make_app(Ok("unused".to_string()));
        let resp = app
            .oneshot(chat_request(r#"{"query":"missing context"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(body.error, GENERIC_FAILURE);
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _) = make_app(Ok(String::new()));
        let resp = app
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
