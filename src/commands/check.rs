use crate::core::{load_config, JiraClient, OllamaClient};
use crate::error::Result;
use crate::models::JiraConfig;

/// Options for the check subcommand
pub struct CheckOptions {
    /// Model override
    pub model: Option<String>,
    /// Ollama URL override
    pub ollama_url: Option<String>,
    /// Timeout override
    pub timeout: Option<u64>,
}

/// Verify credentials and connectivity without generating anything.
///
/// Fails when Jira rejects the credentials or Ollama is unreachable. A
/// missing model is only reported, since it can be pulled before the next
/// run.
pub async fn run_check(options: CheckOptions) -> Result<()> {
    let jira_config = JiraConfig::from_env()?;
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, options.model, options.ollama_url, options.timeout, None)?;

    let jira = JiraClient::new(jira_config)?;
    let ollama = OllamaClient::new(config.ollama.clone())?;

    let account = jira.verify_credentials().await?;
    println!("Jira:   authenticated as {}", account);

    let healthy = ollama.health_check().await?;
    if healthy {
        println!("Ollama: reachable at {}", config.ollama.url);
    } else {
        println!("Ollama: responded with a non-success status");
    }

    match ollama.check_model().await {
        Ok(true) => println!("Model:  '{}' is available", config.ollama.model),
        Ok(false) => println!(
            "Model:  '{}' NOT found; pull it with 'ollama pull {}'",
            config.ollama.model, config.ollama.model
        ),
        Err(e) => println!("Model:  availability unknown ({})", e),
    }

    Ok(())
}
