//! Prompt templates for the document Q&A flow

/// Fixed texts used across the orchestration and completion steps
pub struct PromptTemplate;

impl PromptTemplate {
    /// Synthetic system message that opens every conversation
    pub fn conversation_greeting() -> &'static str {
        "I am an AI assistant that helps answer questions about your SharePoint documents."
    }

    /// Assistant message appended when search or completion fails
    pub fn fallback_apology() -> &'static str {
        "I apologize, but I encountered an error processing your request. Please try again."
    }

    /// System instruction for the completion backend, embedding the context
    pub fn completion_system(context: &str) -> String {
        format!(
            "You are an AI assistant that helps users find information in their SharePoint documents. \
             Use the following document context to answer the user's question: \n\n{}",
            context
        )
    }
}
