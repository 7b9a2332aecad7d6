//! Ask Documents use case.
//!
//! Orchestrates one question turn: authentication precondition, document
//! search, context assembly, completion, and appending to the conversation.
//!
//! # Turn contract
//!
//! | Situation | Messages appended |
//! |-----------|-------------------|
//! | Not signed in | none (login is triggered instead; cancellable) |
//! | Another turn in flight | none |
//! | Success | `user`, `assistant` (answer verbatim) |
//! | Search/completion failure | `user`, `assistant` (fixed apology) |
//!
//! Failures are logged with their [`ErrorKind`] and never shown raw.
//! There are no retries.

use crate::config::TurnParams;
use crate::ports::completion::{CompletionClient, CompletionError};
use crate::ports::document_search::{DocumentSearch, SearchError};
use crate::ports::progress::{NoProgress, TurnProgress};
use crate::use_cases::auth_controller::AuthController;
use assistant_domain::util::preview;
use assistant_domain::{
    AccessToken, Conversation, ErrorKind, Message, PromptTemplate, Query, assemble_context,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model's answer was appended.
    Answered,
    /// Search or completion failed; the apology was appended.
    Fallback(ErrorKind),
    /// Nobody was signed in; login was triggered and nothing appended.
    LoginRequired,
    /// A previous turn is still running; nothing appended.
    Busy,
}

/// Failures of the search + completion steps
#[derive(Error, Debug)]
enum TurnError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Completion returned an empty answer")]
    EmptyAnswer,

    #[error("Turn cancelled")]
    Cancelled,

    #[error("Turn timed out")]
    TimedOut,
}

impl TurnError {
    fn kind(&self) -> ErrorKind {
        match self {
            TurnError::Search(e) => e.kind(),
            TurnError::Completion(e) => e.kind(),
            TurnError::EmptyAnswer => ErrorKind::CompletionFailed,
            TurnError::Cancelled | TurnError::TimedOut => ErrorKind::Unknown,
        }
    }
}

/// Resets the in-flight flag when a turn ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for answering a question from the user's documents
pub struct AskDocumentsUseCase {
    auth: Arc<AuthController>,
    search: Arc<dyn DocumentSearch>,
    completion: Arc<dyn CompletionClient>,
    params: TurnParams,
    in_flight: AtomicBool,
}

impl AskDocumentsUseCase {
    pub fn new(
        auth: Arc<AuthController>,
        search: Arc<dyn DocumentSearch>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            auth,
            search,
            completion,
            params: TurnParams::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_params(mut self, params: TurnParams) -> Self {
        self.params = params;
        self
    }

    /// Whether a turn is currently running. Input should be disabled while true.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handle a question without progress reporting or cancellation
    pub async fn handle(&self, query: &Query, conversation: &mut Conversation) -> TurnOutcome {
        self.handle_with(query, conversation, &NoProgress, None)
            .await
    }

    /// Handle a question with progress callbacks and an optional cancellation token
    pub async fn handle_with(
        &self,
        query: &Query,
        conversation: &mut Conversation,
        progress: &dyn TurnProgress,
        cancellation: Option<&CancellationToken>,
    ) -> TurnOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!("Rejecting question while another turn is in flight");
            return TurnOutcome::Busy;
        };

        let access = match self.auth.access_token().await {
            Ok(token) => token,
            Err(e) => {
                if e.kind().needs_login() {
                    info!("No signed-in account, starting login instead of answering");
                } else {
                    error!(kind = %e.kind(), "Token acquisition failed: {}", e);
                }
                self.auth.login_until(cancellation).await;
                return TurnOutcome::LoginRequired;
            }
        };

        info!("Answering question: {}", preview(query.as_str(), 80));
        conversation.push(Message::user(query.as_str()));

        let bounded = async {
            match self.params.timeout {
                Some(limit) => tokio::time::timeout(limit, self.answer(query, &access, progress))
                    .await
                    .unwrap_or(Err(TurnError::TimedOut)),
                None => self.answer(query, &access, progress).await,
            }
        };

        let result = match cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(TurnError::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        };

        match result {
            Ok(answer) => {
                conversation.push(Message::assistant(answer));
                progress.on_turn_complete(true);
                TurnOutcome::Answered
            }
            Err(e) => {
                let kind = e.kind();
                error!(kind = %kind, "Question turn failed: {}", e);
                conversation.push(Message::assistant(PromptTemplate::fallback_apology()));
                progress.on_turn_complete(false);
                TurnOutcome::Fallback(kind)
            }
        }
    }

    /// Search, assemble the context, and ask the completion backend
    async fn answer(
        &self,
        query: &Query,
        access: &AccessToken,
        progress: &dyn TurnProgress,
    ) -> Result<String, TurnError> {
        progress.on_search_start(query.as_str());
        let documents = self.search.search(query.as_str(), access).await?;
        progress.on_search_complete(&documents);

        let context = assemble_context(&documents);
        debug!(
            documents = documents.len(),
            context_len = context.len(),
            "Assembled document context"
        );

        progress.on_completion_start();
        let answer = self.completion.complete(query.as_str(), &context).await?;

        if answer.trim().is_empty() {
            return Err(TurnError::EmptyAnswer);
        }
        Ok(answer)
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }
}
