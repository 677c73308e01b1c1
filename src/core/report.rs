//! Report assembly: document structure and output paths.

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::pdf::PdfWriter;
use crate::error::ReportError;
use crate::models::{AnalyzedIssue, IssueCategory, SolvedIssue};

/// Filename prefix for docs-mode reports
pub const DOCUMENTATION_PREFIX: &str = "documentation";
/// Filename prefix for faq-mode reports
pub const FAQ_PREFIX: &str = "solution_faq";

/// Description preview length in issue sections
const DESCRIPTION_PREVIEW_CHARS: usize = 500;
/// Context preview length in FAQ entries
const CONTEXT_PREVIEW_CHARS: usize = 300;

/// The assembled documentation report (docs mode)
#[derive(Debug)]
pub struct DocumentReport {
    pub title: String,
    /// Generation date shown on the cover
    pub generated_on: String,
    pub executive_summary: String,
    /// Issue entries in fetch order
    pub entries: Vec<AnalyzedIssue>,
}

impl DocumentReport {
    pub fn new(project_key: &str, executive_summary: String, entries: Vec<AnalyzedIssue>) -> Self {
        Self {
            title: format!("Project Documentation: {}", project_key),
            generated_on: Local::now().format("%Y-%m-%d").to_string(),
            executive_summary,
            entries,
        }
    }

    /// Executive summary plus one section per issue.
    pub fn section_count(&self) -> usize {
        self.entries.len() + 1
    }
}

/// The assembled FAQ report (faq mode)
#[derive(Debug)]
pub struct FaqReport {
    pub title: String,
    pub generated_on: String,
    pub project_key: String,
    /// Solved issues grouped by issue type, in first-appearance order
    pub groups: Vec<(String, Vec<SolvedIssue>)>,
}

impl FaqReport {
    pub fn new(project_key: &str, solved: Vec<SolvedIssue>) -> Self {
        Self {
            title: format!("Solution FAQ for Project: {}", project_key),
            generated_on: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            project_key: project_key.to_string(),
            groups: group_by_type(solved),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|(_, entries)| entries.len()).sum()
    }

    fn introduction(&self) -> String {
        format!(
            "This document contains solutions to common problems identified in the {} project. \
             Each solution has been extracted from Jira tickets and their associated comments. \
             This FAQ-style documentation is intended to help team members quickly find \
             solutions to known issues.",
            self.project_key
        )
    }
}

/// Group analyzed issues by category, in the fixed category order.
///
/// Categories keep their slot even when empty so the summary prompt sees a
/// stable layout.
pub fn categorize(entries: &[AnalyzedIssue]) -> Vec<(IssueCategory, Vec<&AnalyzedIssue>)> {
    IssueCategory::ALL
        .iter()
        .map(|&category| {
            let matching = entries
                .iter()
                .filter(|e| IssueCategory::from_type_name(&e.issue.issue_type) == category)
                .collect();
            (category, matching)
        })
        .collect()
}

fn group_by_type(solved: Vec<SolvedIssue>) -> Vec<(String, Vec<SolvedIssue>)> {
    let mut groups: Vec<(String, Vec<SolvedIssue>)> = Vec::new();
    for entry in solved {
        match groups
            .iter_mut()
            .find(|(issue_type, _)| *issue_type == entry.issue.issue_type)
        {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((entry.issue.issue_type.clone(), vec![entry])),
        }
    }
    groups
}

/// Output path for a report: `<dir>/<prefix>_<project>_<timestamp>.pdf`.
pub fn report_path(output_dir: &Path, prefix: &str, project_key: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    output_dir.join(format!("{}_{}_{}.pdf", prefix, project_key, stamp))
}

/// Render the documentation report and write it to `path`.
///
/// Layout: cover block, executive summary, then one section per issue in
/// fetch order.
pub fn write_documentation_pdf(report: &DocumentReport, path: &Path) -> Result<(), ReportError> {
    info!("Rendering documentation PDF");
    let mut pdf = PdfWriter::new(&report.title)?;

    pdf.title_line(&report.title);
    pdf.subtitle_line(&format!("Generated on {}", report.generated_on));
    pdf.space(10.0);

    pdf.chapter_title("Executive Summary");
    pdf.body(&report.executive_summary);
    pdf.space(10.0);

    for entry in &report.entries {
        pdf.section_title(&format!("{}: {}", entry.issue.key, entry.issue.title));
        pdf.body(&format!(
            "Status: {}  |  Type: {}",
            entry.issue.status, entry.issue.issue_type
        ));
        if !entry.issue.description.is_empty() {
            pdf.body(&format!(
                "Description: {}",
                preview(&entry.issue.description, DESCRIPTION_PREVIEW_CHARS)
            ));
        }
        pdf.body(&format!("AI Analysis:\n{}", entry.analysis));
        pdf.space(5.0);
    }

    let pages = pdf.page_count();
    pdf.save(path)?;
    info!("Documentation PDF written ({} pages)", pages);
    Ok(())
}

/// Render the FAQ report and write it to `path`.
///
/// Each issue type gets its own chapter on a fresh page; entries follow
/// the Q/Context/A/Details/Reference layout.
pub fn write_faq_pdf(report: &FaqReport, path: &Path) -> Result<(), ReportError> {
    info!("Rendering FAQ PDF");
    let mut pdf = PdfWriter::new(&report.title)?;

    pdf.title_line(&report.title);
    pdf.subtitle_line(&format!("Generated on {}", report.generated_on));
    pdf.space(10.0);

    pdf.chapter_title("Introduction");
    pdf.body(&report.introduction());

    for (issue_type, entries) in &report.groups {
        pdf.page_break();
        pdf.chapter_title(&format!("{} Solutions", issue_type));

        for entry in entries {
            pdf.section_title(&format!("Q: {}", entry.issue.title));

            let context = preview(&entry.issue.description, CONTEXT_PREVIEW_CHARS);
            if !context.is_empty() {
                pdf.body(&format!("Context: {}", context));
            }

            pdf.body(&format!("A: {}", entry.solution.summary));
            if !entry.solution.details.is_empty()
                && entry.solution.details != entry.solution.summary
            {
                pdf.body(&format!("Details: {}", entry.solution.details));
            }

            pdf.note(&format!(
                "Reference: {} (Confidence: {})",
                entry.issue.key, entry.solution.confidence
            ));
            pdf.space(5.0);
        }
    }

    let pages = pdf.page_count();
    pdf.save(path)?;
    info!("FAQ PDF written ({} pages)", pages);
    Ok(())
}

/// First `max` characters with an ellipsis when clipped.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let clipped: String = text.chars().take(max).collect();
        format!("{}...", clipped)
    } else {
        text.to_string()
    }
}
