//! CLI binary for trivia.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use trivia::listen::StdinQuestions;
use trivia::speech;
use trivia::{Resolver, TriviaConfig, TriviaSession};

/// Trivia: ask a question, hear a short answer.
#[derive(Parser)]
#[command(name = "trivia", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write logs to a daily rolling `trivia.log` in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Answer a single question and exit.
    Ask {
        /// The question, e.g. `trivia ask who wrote hamlet`.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Answer typed questions interactively, speaking each answer.
    Listen,

    /// Serve the HTTP API.
    Serve {
        /// Address to bind (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_dir.as_deref());

    let mut config = TriviaConfig::load(cli.config.as_deref())?;
    config.apply_env();
    config.validate()?;
    let resolver = Resolver::new(&config.search)?;
    info!(providers = ?resolver.provider_names(), "resolver ready");

    match cli.command {
        Command::Ask { question } => Ok(run_ask(&resolver, &question.join(" ")).await),
        Command::Listen => {
            run_listen(config, resolver).await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let cancel = CancellationToken::new();
            cancel_on_ctrl_c(cancel.clone());
            trivia::server::serve(&config.server, resolver, cancel).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Install the global subscriber: stderr always, plus a rolling file when
/// `log_dir` is set. The returned guard must live until exit so buffered
/// file logs are flushed.
fn init_tracing(log_dir: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Users can override with RUST_LOG=debug to see everything.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trivia=info,trivia_search=info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "trivia.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    guard
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel.cancel();
        }
    });
}

/// Print the answer (or fallback message). Fails the process when unanswered.
async fn run_ask(resolver: &Resolver, question: &str) -> ExitCode {
    let result = resolver.resolve(question).await;
    println!("{}", result.display_text());
    if result.is_answered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_listen(config: TriviaConfig, resolver: Resolver) {
    println!("Trivia v{}", env!("CARGO_PKG_VERSION"));

    let speaker = speech::from_settings(&config.speech);
    let source = StdinQuestions::stdin(Duration::from_secs(config.speech.listen_timeout_seconds));
    let mut session = TriviaSession::new(resolver, source, Arc::clone(&speaker))
        .with_acknowledgement(config.speech.acknowledge);
    cancel_on_ctrl_c(session.cancel_token());

    speech::speak_detached(speaker, "Ask me a trivia question.".to_owned());
    println!("\nType a question and press Enter. Press Ctrl+C to quit.\n");

    session.run().await;
}
