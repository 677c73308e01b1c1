use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Issue;

/// An issue paired with the model's analysis of it
#[derive(Debug, Clone)]
pub struct AnalyzedIssue {
    pub issue: Issue,
    /// Free-form analysis text returned by the model
    pub analysis: String,
}

/// Confidence the model reported for an extracted solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Map the model's confidence string; unknown values count as medium.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "low" => Confidence::Low,
            _ => Confidence::Medium,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        write!(f, "{}", name)
    }
}

/// A solution extracted from an issue's description and comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Short statement of the fix
    pub summary: String,
    /// Longer explanation, when the model provided one
    pub details: String,
    pub confidence: Confidence,
}

/// An issue that yielded a usable solution
#[derive(Debug, Clone)]
pub struct SolvedIssue {
    pub issue: Issue,
    pub solution: Solution,
}
