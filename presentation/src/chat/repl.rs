//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use super::interrupt::InterruptWatch;
use crate::config::ReplConfig;
use crate::{ConsoleFormatter, SimpleProgress, SpinnerProgress};
use assistant_application::{
    AskDocumentsUseCase, AuthController, AuthStatus, TurnOutcome, TurnProgress,
};
use assistant_domain::{Conversation, Query};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::debug;

const LOGIN_HINT: &str = "Use /login to sign in.";

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<AskDocumentsUseCase>,
    auth: Arc<AuthController>,
    conversation: Conversation,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl with a fresh conversation
    pub fn new(use_case: Arc<AskDocumentsUseCase>, auth: Arc<AuthController>) -> Self {
        Self {
            use_case,
            auth,
            conversation: Conversation::new(),
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome().await;

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Document Assistant - Chat Mode       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if let Some(greeting) = self.conversation.messages().first() {
            println!("{}", greeting.content().dimmed());
            println!();
        }
        let status = self.auth.check().await;
        print_status(&status);
        println!();
        println!("{}", ReplCommand::help_text());
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help_text());
            }
            ReplCommand::Login => {
                let interrupt = InterruptWatch::start();
                let status = self.auth.login_until(Some(interrupt.token())).await;
                print_status(&status);
            }
            ReplCommand::Logout => {
                let status = self.auth.logout().await;
                print_status(&status);
            }
            ReplCommand::Status => {
                print_status(&self.auth.status());
            }
            ReplCommand::History => {
                println!();
                print!("{}", ConsoleFormatter::format_history(&self.conversation));
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        println!();
        false
    }

    async fn process_question(&mut self, line: &str) {
        let Ok(query) = Query::new(line) else {
            return;
        };
        println!();

        let progress: Box<dyn TurnProgress> = if self.config.show_progress {
            Box::new(SpinnerProgress::new())
        } else {
            Box::new(SimpleProgress)
        };

        // Ctrl-C while the turn is pending cancels only this turn.
        let interrupt = InterruptWatch::start();
        let outcome = self
            .use_case
            .handle_with(
                &query,
                &mut self.conversation,
                progress.as_ref(),
                Some(interrupt.token()),
            )
            .await;
        drop(interrupt);

        debug!(?outcome, "Turn finished");
        self.render_outcome(outcome);
        println!();
    }

    fn render_outcome(&self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Answered | TurnOutcome::Fallback(_) => {
                if let Some(answer) = self.conversation.last() {
                    println!("{}", ConsoleFormatter::format_message(answer));
                }
            }
            TurnOutcome::LoginRequired => {
                let status = self.auth.status();
                print_status(&status);
                if status.authenticated {
                    println!("{}", "Ask your question again.".dimmed());
                }
            }
            TurnOutcome::Busy => {
                println!("{}", "Still answering the previous question.".yellow());
            }
        }
    }
}

fn print_status(status: &AuthStatus) {
    println!("{}", ConsoleFormatter::format_status(status, Some(LOGIN_HINT)));
}
