//! Dog rescue command-line runner.
//!
//! `validate` checks level files for unreachable dogs; `replay` plays a JSON
//! command script against a level and prints each outcome.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dog_rescue::core::{validate_level, Board, LevelDescriptor};
use dog_rescue::engine::config::UNDO_LIMIT_ENV;
use dog_rescue::engine::{Session, SessionConfig};
use dog_rescue::replay;

#[derive(Parser)]
#[command(name = "dog-rescue", version, about = "Dog rescue puzzle level tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every dog can be reached by a block of its color
    Validate {
        #[arg(required = true)]
        levels: Vec<PathBuf>,
    },
    /// Apply a JSON command script to a level
    Replay {
        level: PathBuf,
        script: PathBuf,
        #[arg(long, env = UNDO_LIMIT_ENV)]
        undo_limit: Option<usize>,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { levels } => validate(&levels),
        Commands::Replay {
            level,
            script,
            undo_limit,
        } => {
            let mut config = SessionConfig::from_env();
            if let Some(limit) = undo_limit {
                config = config.with_undo_limit(limit);
            }
            run_replay(&level, &script, config)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_level(path: &Path) -> Result<LevelDescriptor> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level {}", path.display()))?;
    LevelDescriptor::from_json(&json)
        .with_context(|| format!("failed to parse level {}", path.display()))
}

fn validate(paths: &[PathBuf]) -> Result<ExitCode> {
    let mut failed = false;
    for path in paths {
        debug!(path = %path.display(), "validating");
        let level = load_level(path)?;
        let board = Board::from_level(&level)
            .with_context(|| format!("invalid level {}", path.display()))?;
        let report = validate_level(&board);

        if report.is_valid() {
            println!("{}: ok ({})", path.display(), level.title());
            continue;
        }
        failed = true;
        println!(
            "{}: {} issue(s) ({})",
            path.display(),
            report.issues.len(),
            level.title()
        );
        for issue in &report.issues {
            println!("  [{}] {}", issue.code(), issue.message());
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_replay(level: &Path, script: &Path, config: SessionConfig) -> Result<ExitCode> {
    let descriptor = load_level(level)?;
    let json = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let commands = replay::parse_script(&json)
        .with_context(|| format!("failed to parse script {}", script.display()))?;

    let mut session = Session::new(descriptor, config)
        .with_context(|| format!("invalid level {}", level.display()))?;
    println!(
        "{}: {} dog(s) waiting",
        session.level().title(),
        session.dogs_remaining()
    );

    debug!(steps = commands.len(), undo_limit = config.undo_limit, "replay started");
    for (step, command) in commands.iter().enumerate() {
        let report = replay::apply(&mut session, command)
            .with_context(|| format!("step {step} could not restore history"))?;
        println!(
            "{step:>3} {command:?} -> {report} (dogs remaining: {})",
            session.dogs_remaining()
        );
    }

    if session.is_won() {
        println!("level complete");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} dog(s) still waiting", session.dogs_remaining());
        Ok(ExitCode::FAILURE)
    }
}
