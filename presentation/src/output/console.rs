//! Console output formatter for conversations and sign-in status

use assistant_application::AuthStatus;
use assistant_domain::{Conversation, Message, Role};
use colored::Colorize;
use serde::Serialize;

/// Formats assistant output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one message for the transcript
    pub fn format_message(message: &Message) -> String {
        let label = match message.role() {
            Role::User => "You:".cyan().bold(),
            Role::Assistant => "Assistant:".green().bold(),
            Role::System => "System:".dimmed(),
        };
        format!("{} {}", label, message.content())
    }

    /// Format the visible transcript (the system message is hidden)
    pub fn format_history(conversation: &Conversation) -> String {
        let mut output = String::new();
        for message in conversation.exchanges() {
            output.push_str(&Self::format_message(message));
            output.push_str("\n\n");
        }
        if output.is_empty() {
            output.push_str(&format!("{}\n", "No questions asked yet.".dimmed()));
        }
        output
    }

    /// Format the last question/answer pair as JSON
    pub fn format_json(conversation: &Conversation) -> String {
        #[derive(Serialize)]
        struct Exchange<'a> {
            messages: Vec<&'a Message>,
        }

        let messages: Vec<&Message> = conversation.exchanges().collect();
        let start = messages.len().saturating_sub(2);
        serde_json::to_string_pretty(&Exchange {
            messages: messages[start..].to_vec(),
        })
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the sign-in status line. `login_hint` follows "Not signed in."
    /// and should name a sign-in action that exists in the current mode.
    pub fn format_status(status: &AuthStatus, login_hint: Option<&str>) -> String {
        let mut output = if status.authenticated {
            let who = status
                .account
                .as_ref()
                .map(|a| a.label().to_string())
                .unwrap_or_else(|| "unknown account".to_string());
            format!("{} {}", "Signed in as".green(), who.bold())
        } else {
            let mut line = "Not signed in.".yellow().to_string();
            if let Some(hint) = login_hint {
                line.push_str(&format!(" {}", hint.dimmed()));
            }
            line
        };
        if let Some(error) = &status.error {
            output.push_str(&format!("\n{} {}", "!".red().bold(), error.red()));
        }
        output
    }
}
