//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The answer text only
    Text,
    /// The question and answer as JSON messages
    Json,
}

/// CLI arguments for doc-assistant
#[derive(Parser, Debug)]
#[command(name = "doc-assistant")]
#[command(author, version, about = "Ask questions about your SharePoint documents")]
#[command(long_about = r#"
doc-assistant answers questions using your SharePoint and OneDrive documents.

Each question runs three steps:
1. Search: your documents are searched with your own Microsoft account
2. Context: the matching excerpts are collected into one context
3. Answer: the completion server asks the language model to answer from that context

Sign-in uses the device code flow: open the printed URL on any device and
enter the code.

Configuration files are loaded from (in priority order):
1. DOC_ASSISTANT_<SECTION>__<KEY> environment variables
2. --config <path>              Explicit config file
3. ./doc-assistant.toml         Project-level config
4. ~/.config/doc-assistant/config.toml   Global config

Example:
  doc-assistant "How many vacation days do we get?"
  doc-assistant --chat
  doc-assistant --serve --bind 0.0.0.0:7071
"#)]
pub struct Cli {
    /// The question to ask (not required in chat or serve mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "serve")]
    pub chat: bool,

    /// Run the completion server (`POST /api/chat`)
    #[arg(long)]
    pub serve: bool,

    /// Address for the completion server (overrides server.bind)
    #[arg(long, value_name = "ADDR", requires = "serve")]
    pub bind: Option<String>,

    /// Sign in and exit
    #[arg(long, conflicts_with_all = ["serve", "logout"])]
    pub login: bool,

    /// Sign out and exit
    #[arg(long, conflicts_with = "serve")]
    pub logout: bool,

    /// Output format for one-shot answers
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
