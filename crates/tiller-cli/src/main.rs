//! Ask the operator questions in the terminal and print the answers.
//!
//! # Examples
//!
//! ```sh
//! tiller ask -q "Deploy now?|yes|no" -q "Release notes?"
//! tiller ask --questions questions.json --mode plan --timeout 300
//! tiller modes
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tiller_cli::{AskConfig, load_questions, modes_json, questions_from_flags, render_result};
use tiller_rs::mode::AgentMode;
use tiller_rs::question::{Question, SessionOutcome};
use tiller_rs::tools::names;
use tiller_rs::ui::{current_mode, resolve_prompt};
use tiller_rs::ui::tracing::UiTracingLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Interactive question prompts for terminal agents.
#[derive(Parser)]
#[command(name = "tiller", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask one or more questions and print the answers as JSON.
    Ask(AskArgs),
    /// Print the operating modes in cycle order as JSON.
    Modes,
}

#[derive(Args)]
struct AskArgs {
    /// JSON file with the questions.
    #[arg(long, conflicts_with = "question")]
    questions: Option<PathBuf>,

    /// A question as `TEXT|CHOICE|CHOICE...`. Repeat for more tabs.
    #[arg(short, long)]
    question: Vec<String>,

    /// Mode the indicator starts in: default, plan or auto_approve.
    #[arg(long, default_value = "auto_approve")]
    mode: AgentMode,

    /// Most padding rows reserved below the choices.
    #[arg(long, default_value_t = tiller_rs::question::DEFAULT_MAX_CHOICES)]
    max_choices: usize,

    /// Give up after this many seconds without an answer.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Also write logs to stderr (filtered by `RUST_LOG`).
    #[arg(long)]
    log_stderr: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Modes => match serde_json::to_string_pretty(&modes_json()) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Ask(args) => ask(args).await,
    }
}

async fn ask(args: AskArgs) -> ExitCode {
    let questions = match collect_questions(&args) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let config = AskConfig::default()
        .with_initial_mode(args.mode)
        .with_max_choices(args.max_choices)
        .with_timeout(args.timeout.map(Duration::from_secs));
    let ui_state = config.build_ui_state();
    let tools = config.build_tool_set(&ui_state);

    // Set up tracing → TUI log buffer, optionally mirrored to stderr.
    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    let stderr_layer = args.log_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });
    tracing_subscriber::registry()
        .with(tracing_layer)
        .with(stderr_layer)
        .init();

    let tui_config = tiller_tui::TuiConfig::default().with_log_buffer(log_buffer);
    let tui_handle = tiller_tui::spawn_tui(ui_state.clone(), tui_config);

    let arguments = serde_json::json!({ "questions": questions }).to_string();
    let raw = tools.execute(names::ASK_USER, &arguments).await;
    // A timed-out prompt is still installed.
    resolve_prompt(&ui_state, SessionOutcome::Cancelled);

    let mode = current_mode(&ui_state).unwrap_or(args.mode);
    if let Ok(mut s) = ui_state.lock() {
        s.running = false;
        s.quit_requested = true;
    }
    if tui_handle.join().is_err() {
        error!("TUI thread panicked");
    }

    match render_result(mode, &raw) {
        Ok((doc, status)) => {
            info!(?status, %mode, "Ask finished");
            match serde_json::to_string_pretty(&doc) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::from(status.code())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn collect_questions(args: &AskArgs) -> Result<Vec<Question>, String> {
    match &args.questions {
        Some(path) => load_questions(path),
        None if args.question.is_empty() => {
            Err("pass --questions <FILE> or at least one --question".to_string())
        }
        None => questions_from_flags(&args.question),
    }
}
