use serde::{Deserialize, Serialize};
use std::fmt;

/// A single work item fetched from Jira
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Project-scoped key, e.g. "DEMO-1"
    pub key: String,
    /// Issue title (Jira calls this the summary field)
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub issue_type: String,
    /// Creation timestamp as reported by Jira, kept verbatim
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment attached to an issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub created: String,
}

/// Buckets used to organize issues when building summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    Features,
    Bugs,
    TechnicalDebt,
    Documentation,
    Other,
}

impl IssueCategory {
    /// Fixed category order used when assembling summaries
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::Features,
        IssueCategory::Bugs,
        IssueCategory::TechnicalDebt,
        IssueCategory::Documentation,
        IssueCategory::Other,
    ];

    /// Derive the category from a Jira issue type name.
    ///
    /// Matching is by substring, so custom type names like "Sub-bug" or
    /// "User Story" land in the expected bucket.
    pub fn from_type_name(type_name: &str) -> Self {
        let lower = type_name.to_lowercase();
        if lower.contains("bug") {
            IssueCategory::Bugs
        } else if lower.contains("feature") || lower.contains("story") {
            IssueCategory::Features
        } else if lower.contains("documentation") {
            IssueCategory::Documentation
        } else if lower.contains("technical") || lower.contains("debt") {
            IssueCategory::TechnicalDebt
        } else {
            IssueCategory::Other
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueCategory::Features => "Features",
            IssueCategory::Bugs => "Bugs",
            IssueCategory::TechnicalDebt => "Technical Debt",
            IssueCategory::Documentation => "Documentation",
            IssueCategory::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_type_name() {
        assert_eq!(IssueCategory::from_type_name("Bug"), IssueCategory::Bugs);
        assert_eq!(
            IssueCategory::from_type_name("Sub-bug"),
            IssueCategory::Bugs
        );
        assert_eq!(
            IssueCategory::from_type_name("New Feature"),
            IssueCategory::Features
        );
        assert_eq!(
            IssueCategory::from_type_name("User Story"),
            IssueCategory::Features
        );
        assert_eq!(
            IssueCategory::from_type_name("Documentation"),
            IssueCategory::Documentation
        );
        assert_eq!(
            IssueCategory::from_type_name("Technical Debt"),
            IssueCategory::TechnicalDebt
        );
        assert_eq!(IssueCategory::from_type_name("Task"), IssueCategory::Other);
        assert_eq!(IssueCategory::from_type_name(""), IssueCategory::Other);
    }

    #[test]
    fn test_bug_takes_precedence_over_story() {
        // "Story bug" contains both markers; bug wins
        assert_eq!(
            IssueCategory::from_type_name("Story bug"),
            IssueCategory::Bugs
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(IssueCategory::TechnicalDebt.to_string(), "Technical Debt");
        assert_eq!(IssueCategory::Other.to_string(), "Other");
    }

    #[test]
    fn test_issue_deserializes_with_missing_optionals() {
        let json = r#"{
            "key": "DEMO-1",
            "title": "Fix login bug",
            "status": "Done",
            "issue_type": "Bug"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "DEMO-1");
        assert_eq!(issue.description, "");
        assert!(issue.comments.is_empty());
    }
}
