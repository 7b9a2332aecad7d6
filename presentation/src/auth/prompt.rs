//! Device code prompt for an interactive terminal.

use assistant_application::{DeviceCodeChallenge, LoginPrompt, LoginPromptError};
use colored::Colorize;
use std::io::{IsTerminal, Write};

/// Prints the verification URL and user code to stderr.
///
/// Refuses to present when stderr is not a terminal, because nobody would
/// see the code and the login would only time out.
pub struct TerminalLoginPrompt {
    require_terminal: bool,
}

impl TerminalLoginPrompt {
    pub fn new() -> Self {
        Self {
            require_terminal: true,
        }
    }

    /// Present even when stderr is redirected (e.g. `2>login.txt`).
    pub fn allow_non_terminal(mut self) -> Self {
        self.require_terminal = false;
        self
    }

    pub fn render(challenge: &DeviceCodeChallenge) -> String {
        format!(
            "\n{}\n  {}\n  {} {}\n  {} {}\n",
            "Sign in to continue".cyan().bold(),
            challenge.message,
            "Open:".dimmed(),
            challenge.verification_uri.underline(),
            "Code:".dimmed(),
            challenge.user_code.yellow().bold()
        )
    }
}

impl Default for TerminalLoginPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPrompt for TerminalLoginPrompt {
    fn present(&self, challenge: &DeviceCodeChallenge) -> Result<(), LoginPromptError> {
        let mut stderr = std::io::stderr();
        if self.require_terminal && !stderr.is_terminal() {
            return Err(LoginPromptError(
                "stderr is not an interactive terminal".to_string(),
            ));
        }
        writeln!(stderr, "{}", Self::render(challenge))
            .map_err(|e| LoginPromptError(e.to_string()))?;
        writeln!(stderr, "{}", "Waiting for sign-in...".dimmed())
            .map_err(|e| LoginPromptError(e.to_string()))
    }

    fn finished(&self, success: bool) {
        if success {
            eprintln!("{}", "Signed in.".green());
        } else {
            eprintln!("{}", "Sign-in did not complete.".red());
        }
    }
}
