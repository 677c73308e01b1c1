//! Prompts sent to the local model
//!
//! System prompts set the model's behavior; the issue material itself is
//! assembled into the user prompt and truncated to a character budget so a
//! long comment thread cannot blow the context window.

use crate::models::{AnalyzedIssue, Issue, IssueCategory};

/// System prompt for per-issue analysis (docs mode)
pub const SYSTEM_PROMPT_ANALYZE: &str = r#"You are a technical documentation assistant that analyzes Jira issues and comments to extract valuable information.

Analyze the Jira issue and its comments provided by the user. Extract:
1. Key problems identified
2. Solutions proposed or implemented
3. Technical decisions made
4. Any important information that should be documented

Provide the analysis in a structured format."#;

/// System prompt for the executive summary (docs mode)
pub const SYSTEM_PROMPT_SUMMARY: &str =
    "You are a technical documentation expert that synthesizes information into clear, concise summaries.";

/// System prompt for solution extraction (faq mode)
pub const SYSTEM_PROMPT_SOLUTION: &str = r#"You are a technical documentation assistant that analyzes Jira issues and comments.

Read the Jira issue carefully, including its description and ALL comments.
Your task is to:

1. Determine if there is a clear SOLUTION to the problem described in the ticket. The solution could be in the description or in any of the comments.
2. If a solution exists, extract and summarize it clearly.
3. If NO solution exists, simply state "NO_SOLUTION_FOUND".

Respond in JSON format with these fields:
{
  "has_solution": true/false,
  "solution_summary": "Brief summary of the solution (if found)",
  "solution_details": "Detailed explanation of the solution (if found)",
  "confidence": "high/medium/low (how confident you are that this is a real solution)"
}"#;

/// Sampling temperature for per-issue requests
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;
/// Sampling temperature for the executive summary
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Character budget for a single issue's prompt text
pub const MAX_ISSUE_TEXT_CHARS: usize = 8_000;
/// Character budget for the executive-summary input
pub const MAX_SUMMARY_INPUT_CHARS: usize = 10_000;
/// Issues quoted per category in the executive-summary input
const MAX_ISSUES_PER_CATEGORY: usize = 3;
/// Analysis snippet length quoted in the executive-summary input
const MAX_ANALYSIS_SNIPPET_CHARS: usize = 500;

/// Build the user prompt for analyzing one issue (docs mode).
pub fn analysis_prompt(issue: &Issue) -> String {
    truncate_chars(&issue_text(issue, false), MAX_ISSUE_TEXT_CHARS)
}

/// Build the user prompt for extracting a solution from one issue (faq mode).
///
/// Comments carry their dates here so the model can tell which answer came
/// last in a long thread.
pub fn solution_prompt(issue: &Issue) -> String {
    truncate_chars(&issue_text(issue, true), MAX_ISSUE_TEXT_CHARS)
}

/// Build the executive-summary prompt from categorized analyses.
pub fn summary_prompt(
    project_key: &str,
    categorized: &[(IssueCategory, Vec<&AnalyzedIssue>)],
) -> String {
    let mut analyses: Vec<String> = Vec::new();
    for (category, entries) in categorized {
        if entries.is_empty() {
            continue;
        }
        analyses.push(format!("Category: {}", category));
        for entry in entries.iter().take(MAX_ISSUES_PER_CATEGORY) {
            analyses.push(format!(
                "Issue {}: {}\nAnalysis: {}...",
                entry.issue.key,
                entry.issue.title,
                clip_chars(&entry.analysis, MAX_ANALYSIS_SNIPPET_CHARS)
            ));
        }
    }
    let body = truncate_chars(&analyses.join("\n\n"), MAX_SUMMARY_INPUT_CHARS);

    format!(
        "Based on the following analyses of Jira issues for project {}, \
         write an executive summary that highlights:\n\n\
         1. Major features and improvements\n\
         2. Common issues and their resolutions\n\
         3. Technical decisions and their rationale\n\
         4. Recommendations for future improvements\n\n\
         Keep your summary comprehensive but concise.\n\n\
         Analyses:\n{}",
        project_key, body
    )
}

fn issue_text(issue: &Issue, dated_comments: bool) -> String {
    let mut text = format!("Issue: {} - {}\n", issue.key, issue.title);
    text.push_str(&format!("Description: {}\n", issue.description));
    text.push_str(&format!("Status: {}\n", issue.status));
    text.push_str(&format!("Type: {}\n\n", issue.issue_type));

    if !issue.comments.is_empty() {
        text.push_str("Comments:\n");
        for comment in &issue.comments {
            if dated_comments {
                text.push_str(&format!(
                    "- {} ({}): {}\n\n",
                    comment.author, comment.created, comment.body
                ));
            } else {
                text.push_str(&format!("- {}: {}\n\n", comment.author, comment.body));
            }
        }
    }
    text
}

/// Truncate to a character budget, appending a marker when text was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    format!("{}... (truncated)", clip_chars(text, max_chars))
}

/// First `max_chars` characters, with no marker.
pub(crate) fn clip_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
