//! PDF Search CLI
//!
//! Answers questions from the document chunks stored in a pgvector
//! collection, either once (`-q`) or in an interactive loop.

mod commands;

use clap::Parser;
use pdfsearch_core::{config::AppConfig, logging, AppResult};
use pdfsearch_knowledge::RagPipeline;
use std::process::ExitCode;
use tracing::Instrument;

/// PDF Search CLI - answer questions from your ingested documents
#[derive(Parser, Debug)]
#[command(name = "pdfsearch")]
#[command(about = "Answer questions from documents stored in pgvector", long_about = None)]
#[command(version)]
struct Cli {
    /// Ask a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Interactive mode (the default when no question is given)
    #[arg(short, long)]
    interactive: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Single(String),
    Interactive,
}

impl Cli {
    /// A question wins over `--interactive`.
    fn mode(&self) -> Mode {
        match self.question {
            Some(ref question) => {
                if self.interactive {
                    tracing::debug!("--question given, ignoring --interactive");
                }
                Mode::Single(question.clone())
            }
            None => Mode::Interactive,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erro: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Fails on missing variables before any client exists
    let config = AppConfig::load()?.with_overrides(cli.log_level.clone(), cli.verbose, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("PDF search CLI starting");
    tracing::debug!("Config: {:?}", config);

    let pipeline = RagPipeline::from_config(&config)?;
    let mut stdout = std::io::stdout();

    match cli.mode() {
        Mode::Single(question) => {
            commands::run_single(&pipeline, &question, &mut stdout)
                .instrument(tracing::info_span!("command", name = "single"))
                .await?;
        }
        Mode::Interactive => {
            let mut lines = commands::spawn_stdin_lines();
            commands::run_interactive(&pipeline, &mut lines, &mut stdout, commands::interrupted())
                .instrument(tracing::info_span!("command", name = "interactive"))
                .await?;
        }
    }

    tracing::info!("Command completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_interactive() {
        let cli = Cli::try_parse_from(["pdfsearch"]).unwrap();
        assert_eq!(cli.mode(), Mode::Interactive);
    }

    #[test]
    fn test_interactive_flag() {
        let cli = Cli::try_parse_from(["pdfsearch", "-i"]).unwrap();
        assert!(cli.interactive);
        assert_eq!(cli.mode(), Mode::Interactive);
    }

    #[test]
    fn test_question_flag() {
        let cli = Cli::try_parse_from(["pdfsearch", "--question", "Quem venceu em 1994?"]).unwrap();
        assert_eq!(cli.mode(), Mode::Single("Quem venceu em 1994?".to_string()));
    }

    #[test]
    fn test_question_wins_over_interactive() {
        let cli = Cli::try_parse_from(["pdfsearch", "-i", "-q", "copa do mundo"]).unwrap();
        assert_eq!(cli.mode(), Mode::Single("copa do mundo".to_string()));
    }

    #[test]
    fn test_question_requires_value() {
        assert!(Cli::try_parse_from(["pdfsearch", "-q"]).is_err());
    }

    #[test]
    fn test_verbose_and_log_flags() {
        let cli = Cli::try_parse_from(["pdfsearch", "-v", "--log-level", "info", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.log_level.as_deref(), Some("info"));
    }
}
