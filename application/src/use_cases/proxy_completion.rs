//! Proxy Completion use case.
//!
//! Server side of the completion proxy: wraps the document context into a
//! system instruction, adds the user's question, and asks the hosted model
//! with fixed sampling parameters.

use crate::config::CompletionParams;
use crate::ports::language_model::{ChatRequest, LanguageModel, LanguageModelError};
use assistant_domain::{Message, PromptTemplate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while producing a proxied completion
#[derive(Error, Debug)]
pub enum ProxyCompletionError {
    #[error("Language model error: {0}")]
    LanguageModel(#[from] LanguageModelError),
}

/// Use case for answering one `(query, context)` pair
pub struct ProxyCompletionUseCase {
    model: Arc<dyn LanguageModel>,
    params: CompletionParams,
}

impl ProxyCompletionUseCase {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            params: CompletionParams::default(),
        }
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    /// Build the two-message chat request sent to the model
    pub fn build_request(&self, query: &str, context: &str) -> ChatRequest {
        ChatRequest {
            model: self.params.model.clone(),
            messages: vec![
                Message::system(PromptTemplate::completion_system(context)),
                Message::user(query),
            ],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        }
    }

    pub async fn execute(&self, query: &str, context: &str) -> Result<String, ProxyCompletionError> {
        debug!(
            query_len = query.len(),
            context_len = context.len(),
            "Building completion request"
        );
        let request = self.build_request(query, context);
        let answer = self.model.chat(request).await?;
        info!(
            model = %self.params.model,
            answer_len = answer.len(),
            "Completion produced"
        );
        Ok(answer)
    }
}
