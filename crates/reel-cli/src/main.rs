//! Reel CLI Application
//!
//! Interactive, menu-driven search over a movie catalog, with popularity
//! analytics over past searches.

mod args;
mod prompt;
mod renderer;
mod shell;

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use log::{debug, info, warn};
use prompt::Prompter;
use reel_core::{ErrorClass, ErrorClassifier, OperatorLog, Session, SessionConfig, StoreError};
use renderer::TerminalRenderer;
use shell::Shell;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {} = Args::parse();

    // Variables already set in the environment take precedence over `.env`.
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded settings from {}", path.display()),
        Err(err) if err.not_found() => debug!("No .env file found"),
        Err(err) => warn!("Ignoring unreadable .env file: {err}"),
    }

    let log_path = OperatorLog::default_path().context("Failed to locate operator log")?;
    let log = OperatorLog::open(&log_path)
        .with_context(|| format!("Failed to open operator log at {}", log_path.display()))?;
    let classifier = ErrorClassifier::new(log);

    let session = match Session::open(&SessionConfig::from_env()) {
        Ok(session) => session,
        Err(err) => return Ok(terminate(&classifier, "initialize", &err)),
    };

    info!("Reel started");

    let stdout = io::stdout();
    let renderer = TerminalRenderer::new(stdout.is_terminal());
    let prompt = Prompter::new(io::stdin().lock(), stdout.lock());

    let outcome = Shell::new(session.catalog(), &classifier, renderer, prompt).run();
    session.close();

    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<StoreError>() {
            // Already reported by the shell.
            Some(store_err) => {
                eprintln!("{}", ErrorClass::of(store_err).user_message());
                ExitCode::FAILURE
            }
            None => return Err(err),
        },
    };

    classifier.shutdown();
    Ok(code)
}

/// Reports a fatal store error and picks the exit status.
fn terminate(classifier: &ErrorClassifier, operation: &str, err: &StoreError) -> ExitCode {
    let class = classifier.report(operation, err);
    eprintln!("{}", class.user_message());
    classifier.shutdown();
    ExitCode::FAILURE
}
