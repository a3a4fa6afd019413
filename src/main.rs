//! pres-tui - iterative question/answer form for presentation context
//!
//! A Ratatui-based TUI that asks rounds of questions supplied by a question
//! source, checks with the user between rounds and writes out the answers.

mod cli;
mod config;
mod session;
mod source;
mod state;
mod transcript;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs, GatherArgs};
use config::PresConfig;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::{Session, SessionError, StopReason};
use source::ScriptedSource;
use state::{IterativeForm, Outcome};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transcript::Transcript;
use ui::Theme;

/// Exit status for a session the user cancelled
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Gather(args) => gather(args).await,
        Commands::Config(args) => show_config(args),
    }
}

/// Initialize logging; the TUI owns the screen, so stderr only gets warnings by default
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() {
        "pres_tui=info"
    } else {
        "pres_tui=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }

    Ok(())
}

async fn gather(args: GatherArgs) -> Result<()> {
    let config = PresConfig::load().context("Failed to load configuration")?;
    let mut form_config = config.form_config();
    if let Some(max_rounds) = args.max_rounds {
        form_config.max_rounds = usize::from(max_rounds);
    }
    let title = args.title.unwrap_or_else(|| config.title());

    let source = ScriptedSource::load(&args.script)?;
    tracing::info!(rounds = source.round_count(), "Loaded question script");

    let form = IterativeForm::new(&title, form_config)?;
    let mut session = Session::new(source, form, Theme::from_env());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = session.run(&mut terminal, event::read).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let report = match result {
        Ok(report) => report,
        Err(SessionError::Cancelled) => {
            eprintln!("{}", ui::outcome_message(Outcome::Cancelled));
            std::process::exit(EXIT_CANCELLED);
        }
        Err(err) => return Err(err.into()),
    };

    match report.stop_reason {
        StopReason::SourceSatisfied => match report.confidence {
            Some(confidence) => eprintln!(
                "✓ Sufficient information gathered (confidence: {confidence:.2})"
            ),
            None => eprintln!("✓ Sufficient information gathered"),
        },
        StopReason::RoundBudgetReached => {
            eprintln!("⚠ Reached maximum rounds. Proceeding with available information...")
        }
        StopReason::UserDeclined | StopReason::NoMoreQuestions => {
            eprintln!("{}", ui::outcome_message(Outcome::Finished))
        }
    }

    eprintln!(
        "Gathered {} answers in {} rounds",
        report.qa_pairs.len(),
        report.rounds_completed
    );

    let transcript = Transcript::from_form(session.form());
    match args.output {
        Some(path) => {
            transcript.save(&path)?;
            eprintln!(
                "Saved {} answers to {}",
                transcript.answer_count(),
                path.display()
            );
        }
        None => println!("{}", transcript.to_json()?),
    }

    Ok(())
}

fn show_config(args: ConfigArgs) -> Result<()> {
    if args.init {
        match PresConfig::with_defaults().save()? {
            Some(path) => println!("Wrote {}", path.display()),
            None => anyhow::bail!("No configuration directory available"),
        }
        return Ok(());
    }

    let path = PresConfig::config_path();
    let config = PresConfig::load().context("Failed to load configuration")?;
    let form = config.form_config();

    match path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (unavailable)"),
    }
    println!("Title: {}", config.title());
    println!("Max rounds: {}", form.max_rounds);
    println!("Round prompt: {}", form.round_prompt);
    println!("Continuation prompt: {}", form.continuation_prompt);
    Ok(())
}
