//! Common test utilities

use jiradocs::models::{AnalyzedIssue, Comment, Confidence, Issue, Solution, SolvedIssue};

/// Build an issue with the given key, title, and type
pub fn test_issue(key: &str, title: &str, issue_type: &str) -> Issue {
    Issue {
        key: key.to_string(),
        title: title.to_string(),
        description: format!("Description of {}", key),
        status: "Done".to_string(),
        issue_type: issue_type.to_string(),
        created: "2026-01-10T09:00:00.000+0000".to_string(),
        updated: "2026-01-12T15:30:00.000+0000".to_string(),
        comments: vec![Comment {
            author: "Dana Developer".to_string(),
            body: "Fixed by clearing the session cache.".to_string(),
            created: "2026-01-11T10:00:00.000+0000".to_string(),
        }],
    }
}

/// Build an analyzed issue for docs-mode report tests
pub fn test_analyzed(key: &str, title: &str, issue_type: &str, analysis: &str) -> AnalyzedIssue {
    AnalyzedIssue {
        issue: test_issue(key, title, issue_type),
        analysis: analysis.to_string(),
    }
}

/// Build a solved issue for faq-mode report tests
pub fn test_solved(key: &str, title: &str, issue_type: &str) -> SolvedIssue {
    SolvedIssue {
        issue: test_issue(key, title, issue_type),
        solution: Solution {
            summary: format!("Solution for {}", key),
            details: "Bump the driver and clear the cache.".to_string(),
            confidence: Confidence::High,
        },
    }
}
