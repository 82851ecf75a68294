//! quizrun CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Shuffled multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively (commands are read from stdin)
    Play {
        /// Path to the quiz JSON file
        #[arg(long)]
        quiz: PathBuf,

        /// RNG seed for reproducible shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: text, json, html, all
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a saved JSON report
    Show {
        /// Path to a report written by `play --format json`
        #[arg(long)]
        report: PathBuf,

        /// Also render the report as HTML to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Validate a quiz JSON file
    Validate {
        /// Path to the quiz JSON file
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quizrun=info,quizrun_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            seed,
            output,
            format,
            config,
        } => commands::play::execute(quiz, seed, output, format, config),
        Commands::Show { report, html } => commands::show::execute(report, html),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
