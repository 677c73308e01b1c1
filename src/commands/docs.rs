use std::path::PathBuf;

use crate::core::{load_config, Runner};
use crate::error::Result;
use crate::models::{validate_project_key, JiraConfig};

/// Options shared by the report-generating subcommands
pub struct ReportOptions {
    /// Jira project key
    pub project: String,
    /// Restrict the run to these issue keys
    pub issues: Option<Vec<String>>,
    /// Model override
    pub model: Option<String>,
    /// Ollama URL override
    pub ollama_url: Option<String>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Timeout override
    pub timeout: Option<u64>,
}

/// Generate the documentation PDF for a project
pub async fn generate_docs(options: ReportOptions) -> Result<()> {
    let runner = build_runner(options)?;
    let outcome = runner.run_docs().await?;

    println!("\n=== Run Summary ===");
    println!("Fetched:    {} issues", outcome.fetched);
    println!("Documented: {} issues", outcome.documented);
    if let Some(path) = outcome.artifact {
        println!("Report:     {}", path.display());
    }

    Ok(())
}

/// Load configuration and credentials and build the runner.
pub(crate) fn build_runner(options: ReportOptions) -> Result<Runner> {
    validate_project_key(&options.project)?;
    let jira_config = JiraConfig::from_env()?;

    let cwd = std::env::current_dir()?;
    let config = load_config(
        &cwd,
        options.model,
        options.ollama_url,
        options.timeout,
        options.output_dir,
    )?;

    Runner::new(config, jira_config, options.project, options.issues)
}
