//! CLI entrypoint for doc-assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use assistant_application::{
    AskDocumentsUseCase, AuthController, InteractiveAuth, NoProgress, ProxyCompletionUseCase,
    TurnOutcome, TurnProgress,
};
use assistant_domain::{Conversation, Query};
use assistant_infrastructure::{
    ConfigLoader, DeviceCodeIdentityProvider, FileConfig, GraphDocumentSearch,
    HttpCompletionClient, IdentitySettings, OpenAiChatModel,
};
use assistant_presentation::{
    AppState, ChatRepl, Cli, ConsoleFormatter, InterruptWatch, OutputFormat, ReplConfig,
    SpinnerProgress, TerminalLoginPrompt, cors_layer, create_router,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    config.validate().context("Invalid configuration")?;

    info!("Starting doc-assistant");

    if cli.serve {
        return serve(&config).await;
    }

    // === Dependency Injection ===
    let prompt = Arc::new(TerminalLoginPrompt::new());
    let provider = DeviceCodeIdentityProvider::new(IdentitySettings::from_config(&config), prompt)?;
    provider
        .initialize()
        .await
        .context("Identity client failed to initialize")?;
    let auth = Arc::new(AuthController::new(Arc::new(provider)));

    if cli.login {
        let status = auth.login().await;
        println!("{}", ConsoleFormatter::format_status(&status, None));
        if !status.authenticated {
            bail!("Sign-in failed");
        }
        return Ok(());
    }

    if cli.logout {
        let status = auth.logout().await;
        println!("{}", ConsoleFormatter::format_status(&status, None));
        return Ok(());
    }

    let timeout = config.behavior.request_timeout();
    let search = Arc::new(GraphDocumentSearch::new(
        &config.search.graph_base_url,
        config.search.page_size,
        timeout,
    )?);
    let completion = Arc::new(HttpCompletionClient::new(&config.api.base_url, timeout)?);
    let use_case = Arc::new(
        AskDocumentsUseCase::new(auth.clone(), search, completion)
            .with_params(config.behavior.turn_params()),
    );

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
        };
        let mut repl = ChatRepl::new(use_case, auth).with_config(repl_config);
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(ref q) => Query::new(q.as_str())?,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    ask_once(&cli, &auth, &use_case, &question).await
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    loaded.map_err(|e| anyhow!("Failed to load configuration: {}", e))
}

/// Sign in if needed, ask one question, and print the answer.
async fn ask_once(
    cli: &Cli,
    auth: &AuthController,
    use_case: &AskDocumentsUseCase,
    question: &Query,
) -> Result<()> {
    let mut status = auth.check().await;
    if !status.authenticated {
        status = auth.login().await;
    }
    if !status.authenticated {
        eprintln!("{}", ConsoleFormatter::format_status(&status, None));
        bail!("Not signed in");
    }

    let progress: Box<dyn TurnProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(SpinnerProgress::new())
    };

    let interrupt = InterruptWatch::start();
    let mut conversation = Conversation::new();
    let outcome = use_case
        .handle_with(
            question,
            &mut conversation,
            progress.as_ref(),
            Some(interrupt.token()),
        )
        .await;
    drop(interrupt);

    match outcome {
        TurnOutcome::Answered | TurnOutcome::Fallback(_) => {
            let output = match cli.output {
                OutputFormat::Json => ConsoleFormatter::format_json(&conversation),
                OutputFormat::Text => conversation
                    .last()
                    .map(|m| m.content().to_string())
                    .unwrap_or_default(),
            };
            println!("{}", output);
            if let TurnOutcome::Fallback(kind) = outcome {
                bail!("Question could not be answered ({})", kind);
            }
            Ok(())
        }
        TurnOutcome::LoginRequired => {
            eprintln!("{}", ConsoleFormatter::format_status(&auth.status(), None));
            bail!("Sign-in required");
        }
        TurnOutcome::Busy => bail!("Another question is already in progress"),
    }
}

/// Run the completion proxy server until Ctrl-C.
async fn serve(config: &FileConfig) -> Result<()> {
    let model = OpenAiChatModel::new(
        &config.llm.base_url,
        config.llm.api_key.clone(),
        config.behavior.request_timeout(),
    )?;
    if !model.is_configured() {
        warn!("llm.api_key is not set; every chat request will fail");
    }

    let completion =
        ProxyCompletionUseCase::new(Arc::new(model)).with_params(config.llm.completion_params());
    let cors = cors_layer(config.server.allowed_origin.as_deref())
        .context("Invalid server.allowed_origin")?;
    let router = create_router(AppState::new(completion), cors);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!(address = %config.server.bind, "Completion server listening");
    eprintln!("Completion server listening on http://{}", config.server.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
