use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod core;
mod error;
mod models;

use commands::{generate_docs, generate_faq, run_check, CheckOptions, ReportOptions};

/// JiraDocs - turn a Jira project's history into PDF documentation with a local LLM
#[derive(Parser)]
#[command(name = "jiradocs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a documentation PDF for a Jira project
    Docs {
        /// Jira project key (e.g. "DEMO")
        #[arg(short, long)]
        project: String,

        /// Restrict the run to these issue keys (comma-separated)
        #[arg(long, value_delimiter = ',')]
        issues: Option<Vec<String>>,

        /// Override the Ollama model to use
        #[arg(long)]
        model: Option<String>,

        /// Override the Ollama API URL
        #[arg(long)]
        ollama_url: Option<String>,

        /// Directory the PDF is written to
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Override the generation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Extract solved issues into a FAQ-style PDF
    Faq {
        /// Jira project key (e.g. "DEMO")
        #[arg(short, long)]
        project: String,

        /// Restrict the run to these issue keys (comma-separated)
        #[arg(long, value_delimiter = ',')]
        issues: Option<Vec<String>>,

        /// Override the Ollama model to use
        #[arg(long)]
        model: Option<String>,

        /// Override the Ollama API URL
        #[arg(long)]
        ollama_url: Option<String>,

        /// Directory the PDF is written to
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Override the generation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Verify Jira credentials, Ollama reachability, and model availability
    Check {
        /// Override the Ollama model to use
        #[arg(long)]
        model: Option<String>,

        /// Override the Ollama API URL
        #[arg(long)]
        ollama_url: Option<String>,

        /// Override the generation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    // Pick up JIRA_* credentials from a .env file when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Docs {
            project,
            issues,
            model,
            ollama_url,
            output_dir,
            timeout,
        } => {
            generate_docs(ReportOptions {
                project,
                issues,
                model,
                ollama_url,
                output_dir,
                timeout,
            })
            .await
        }

        Commands::Faq {
            project,
            issues,
            model,
            ollama_url,
            output_dir,
            timeout,
        } => {
            generate_faq(ReportOptions {
                project,
                issues,
                model,
                ollama_url,
                output_dir,
                timeout,
            })
            .await
        }

        Commands::Check {
            model,
            ollama_url,
            timeout,
        } => {
            run_check(CheckOptions {
                model,
                ollama_url,
                timeout,
            })
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
