//! Slash commands understood by the chat REPL

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Login,
    Logout,
    Status,
    History,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Arguments after the command are ignored.
    pub fn parse(line: &str) -> Self {
        let name = line.split_whitespace().next().unwrap_or(line);
        match name {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/login" => ReplCommand::Login,
            "/logout" => ReplCommand::Logout,
            "/status" => ReplCommand::Status,
            "/history" => ReplCommand::History,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }

    pub fn help_text() -> &'static str {
        "Commands:
  /help, /h, /?     - Show this help
  /login            - Sign in with a device code
  /logout           - Sign out
  /status           - Show who is signed in
  /history          - Show this conversation
  /quit, /exit, /q  - Exit chat

Press Ctrl-C while an answer is pending to cancel it."
    }
}
