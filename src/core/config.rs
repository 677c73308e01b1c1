use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::JiraDocsError;
use crate::models::Config;

/// Load configuration from the working directory with CLI overrides
pub fn load_config(
    dir: &Path,
    model: Option<String>,
    url: Option<String>,
    timeout: Option<u64>,
    output_dir: Option<PathBuf>,
) -> Result<Config, JiraDocsError> {
    let config = Config::load_from_dir(&dir.to_path_buf())?;
    let config = config.with_overrides(model, url, timeout, output_dir);

    info!(
        "Configuration loaded: model={}, url={}, timeout={}s, output={}",
        config.ollama.model,
        config.ollama.url,
        config.ollama.timeout_seconds,
        config.report.output_dir.display()
    );

    Ok(config)
}
