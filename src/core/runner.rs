//! Pipeline orchestration for the fetch, summarize, and render stages.
//!
//! Every stage is fatal on error. Issues are summarized strictly one at a
//! time so a single local Ollama instance is never asked to serve parallel
//! generations.

use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::core::jira::JiraClient;
use crate::core::ollama::OllamaClient;
use crate::core::parser;
use crate::core::prompts;
use crate::core::report::{self, DocumentReport, FaqReport};
use crate::error::{JiraDocsError, Result};
use crate::models::{AnalyzedIssue, Config, Issue, JiraConfig, SolvedIssue};

/// Drives one docs or faq invocation end to end
pub struct Runner {
    config: Config,
    project_key: String,
    issue_keys: Option<Vec<String>>,
    jira: JiraClient,
    ollama: OllamaClient,
}

/// What a pipeline run produced
#[derive(Debug)]
pub struct RunOutcome {
    /// Issues fetched from Jira
    pub fetched: usize,
    /// Issues that made it into the report
    pub documented: usize,
    /// Path of the written PDF, when one was produced
    pub artifact: Option<PathBuf>,
}

impl Runner {
    pub fn new(
        config: Config,
        jira_config: JiraConfig,
        project_key: String,
        issue_keys: Option<Vec<String>>,
    ) -> Result<Self> {
        let jira = JiraClient::new(jira_config)?;
        let ollama = OllamaClient::new(config.ollama.clone())?;
        Ok(Self {
            config,
            project_key,
            issue_keys,
            jira,
            ollama,
        })
    }

    /// Run the documentation pipeline end to end and render the PDF.
    ///
    /// An empty project still produces a report with just the cover and
    /// summary, so a completed run can be told apart from one that failed.
    pub async fn run_docs(&self) -> Result<RunOutcome> {
        self.preflight().await?;
        let issues = self.fetch().await?;

        let analyzed = self.analyze_issues(&issues).await?;

        info!(
            "Generating executive summary with model {}",
            self.config.ollama.model
        );
        let grouped = report::categorize(&analyzed);
        let summary_prompt = prompts::summary_prompt(&self.project_key, &grouped);
        let executive_summary = self
            .ollama
            .generate(
                Some(prompts::SYSTEM_PROMPT_SUMMARY),
                &summary_prompt,
                prompts::SUMMARY_TEMPERATURE,
            )
            .await?;

        let document = DocumentReport::new(&self.project_key, executive_summary, analyzed);
        let path = report::report_path(
            &self.config.report.output_dir,
            report::DOCUMENTATION_PREFIX,
            &self.project_key,
        );
        report::write_documentation_pdf(&document, &path)?;
        info!("Documentation saved to {}", path.display());

        Ok(RunOutcome {
            fetched: issues.len(),
            documented: document.entries.len(),
            artifact: Some(path),
        })
    }

    /// Run the FAQ pipeline: extract a solution per issue and render the
    /// solved ones. No PDF is written when nothing was solved.
    pub async fn run_faq(&self) -> Result<RunOutcome> {
        self.preflight().await?;
        let issues = self.fetch().await?;
        let total = issues.len();

        info!(
            "Extracting solutions from {} issues with model {}",
            total, self.config.ollama.model
        );
        let mut solved: Vec<SolvedIssue> = Vec::new();
        for (index, issue) in issues.iter().enumerate() {
            info!("Processing {} ({}/{})", issue.key, index + 1, total);
            let prompt = prompts::solution_prompt(issue);
            let response = self
                .ollama
                .generate(
                    Some(prompts::SYSTEM_PROMPT_SOLUTION),
                    &prompt,
                    prompts::ANALYSIS_TEMPERATURE,
                )
                .await?;

            match parser::extract_solution(&response) {
                Some(solution) => solved.push(SolvedIssue {
                    issue: issue.clone(),
                    solution,
                }),
                None => debug!("No usable solution for {}", issue.key),
            }
        }

        if solved.is_empty() {
            info!("No solutions found in any issue; no document generated");
            return Ok(RunOutcome {
                fetched: total,
                documented: 0,
                artifact: None,
            });
        }
        info!("Found solutions for {} out of {} issues", solved.len(), total);

        let faq = FaqReport::new(&self.project_key, solved);
        let path = report::report_path(
            &self.config.report.output_dir,
            report::FAQ_PREFIX,
            &self.project_key,
        );
        report::write_faq_pdf(&faq, &path)?;
        info!("FAQ documentation saved to {}", path.display());

        Ok(RunOutcome {
            fetched: total,
            documented: faq.entry_count(),
            artifact: Some(path),
        })
    }

    /// Analyze each issue in fetch order, one request at a time.
    async fn analyze_issues(&self, issues: &[Issue]) -> Result<Vec<AnalyzedIssue>> {
        let total = issues.len();
        info!(
            "Analyzing {} issues with model {}",
            total, self.config.ollama.model
        );

        let mut analyzed = Vec::with_capacity(total);
        for (index, issue) in issues.iter().enumerate() {
            info!("Analyzing {} ({}/{})", issue.key, index + 1, total);
            let prompt = prompts::analysis_prompt(issue);
            let analysis = self
                .ollama
                .generate(
                    Some(prompts::SYSTEM_PROMPT_ANALYZE),
                    &prompt,
                    prompts::ANALYSIS_TEMPERATURE,
                )
                .await?;
            analyzed.push(AnalyzedIssue {
                issue: issue.clone(),
                analysis,
            });
        }
        Ok(analyzed)
    }

    /// Confirm Ollama is reachable before any Jira traffic is spent.
    async fn preflight(&self) -> Result<()> {
        match self.ollama.health_check().await {
            Ok(true) => info!("Ollama is reachable at {}", self.config.ollama.url),
            Ok(false) => warn!("Ollama health check returned a non-success status"),
            Err(e) => {
                error!("Cannot connect to Ollama: {}", e);
                return Err(JiraDocsError::Ollama(e));
            }
        }

        match self.ollama.check_model().await {
            Ok(true) => debug!("Model '{}' is available", self.config.ollama.model),
            Ok(false) => warn!(
                "Model '{}' not found on the server; generation may fail",
                self.config.ollama.model
            ),
            Err(e) => warn!("Could not verify model availability: {}", e),
        }
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<Issue>> {
        let issues = self
            .jira
            .fetch_issues(&self.project_key, self.issue_keys.as_deref())
            .await?;
        Ok(issues)
    }
}
