//! Parsing of model responses in faq mode.
//!
//! The solution prompt asks for a JSON verdict, but models often wrap it in
//! markdown fences or ignore the requested format entirely. Extraction tries
//! fenced JSON first and then the raw text, keeping an unparseable response
//! as a low-confidence entry unless the model explicitly reported no
//! solution.

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::prompts::clip_chars;
use crate::models::{Confidence, Solution};

/// Marker the model is instructed to emit when an issue has no solution
const NO_SOLUTION_MARKER: &str = "NO_SOLUTION_FOUND";
/// Detail length kept when a response cannot be parsed as JSON
const FALLBACK_DETAIL_CHARS: usize = 500;

/// JSON verdict shape requested from the model
#[derive(Debug, Deserialize)]
struct SolutionVerdict {
    #[serde(default)]
    has_solution: bool,
    #[serde(default)]
    solution_summary: Option<String>,
    #[serde(default)]
    solution_details: Option<String>,
    #[serde(default)]
    confidence: Option<String>,
}

/// Extract a solution from a model response.
///
/// Returns `None` when the model reported no solution, or reported one with
/// low confidence. A response that is not JSON at all is kept as a
/// low-confidence entry as long as it does not carry the no-solution marker.
pub fn extract_solution(response: &str) -> Option<Solution> {
    let cleaned = strip_fences(response);

    match serde_json::from_str::<SolutionVerdict>(&cleaned) {
        Ok(verdict) => {
            let confidence = Confidence::parse(verdict.confidence.as_deref().unwrap_or("medium"));
            if !verdict.has_solution {
                debug!("Model reported no solution");
                return None;
            }
            if confidence == Confidence::Low {
                debug!("Dropping low-confidence solution");
                return None;
            }
            Some(Solution {
                summary: verdict
                    .solution_summary
                    .unwrap_or_else(|| "No summary provided".to_string()),
                details: verdict
                    .solution_details
                    .unwrap_or_else(|| "No details provided".to_string()),
                confidence,
            })
        }
        Err(e) => {
            if response.contains(NO_SOLUTION_MARKER) {
                return None;
            }
            warn!("Could not parse solution JSON ({}), keeping raw text", e);
            Some(Solution {
                summary: "Solution may exist, but couldn't parse automatically".to_string(),
                details: clip_chars(response.trim(), FALLBACK_DETAIL_CHARS),
                confidence: Confidence::Low,
            })
        }
    }
}

/// Pull JSON out of markdown code fences.
///
/// Prefers a ```json fence, falls back to any fence, and finally to the
/// trimmed response itself.
fn strip_fences(response: &str) -> String {
    let trimmed = response.trim();

    let json_fence = Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap();
    if let Some(captures) = json_fence.captures(trimmed) {
        return captures[1].to_string();
    }

    let any_fence = Regex::new(r"(?s)```\s*(.*?)\s*```").unwrap();
    if let Some(captures) = any_fence.captures(trimmed) {
        return captures[1].to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_VERDICT: &str = r#"{
        "has_solution": true,
        "solution_summary": "Clear the session cache",
        "solution_details": "The stale cache kept the old auth token alive.",
        "confidence": "high"
    }"#;

    #[test]
    fn test_extracts_bare_json() {
        let solution = extract_solution(GOOD_VERDICT).unwrap();
        assert_eq!(solution.summary, "Clear the session cache");
        assert_eq!(solution.confidence, Confidence::High);
    }

    #[test]
    fn test_extracts_json_fenced_response() {
        let response = format!("Here is my verdict:\n```json\n{}\n```\nDone.", GOOD_VERDICT);
        let solution = extract_solution(&response).unwrap();
        assert_eq!(solution.summary, "Clear the session cache");
    }

    #[test]
    fn test_extracts_generic_fenced_response() {
        let response = format!("```\n{}\n```", GOOD_VERDICT);
        let solution = extract_solution(&response).unwrap();
        assert_eq!(solution.confidence, Confidence::High);
    }

    #[test]
    fn test_no_solution_verdict_returns_none() {
        let response = r#"{"has_solution": false, "confidence": "high"}"#;
        assert!(extract_solution(response).is_none());
    }

    #[test]
    fn test_low_confidence_verdict_is_dropped() {
        let response = r#"{
            "has_solution": true,
            "solution_summary": "Maybe restart it",
            "solution_details": "Unclear from the thread.",
            "confidence": "low"
        }"#;
        assert!(extract_solution(response).is_none());
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let response = r#"{"has_solution": true}"#;
        let solution = extract_solution(response).unwrap();
        assert_eq!(solution.summary, "No summary provided");
        assert_eq!(solution.details, "No details provided");
        assert_eq!(solution.confidence, Confidence::Medium);
    }

    #[test]
    fn test_plain_text_marker_returns_none() {
        let response = "I read the whole thread. NO_SOLUTION_FOUND";
        assert!(extract_solution(response).is_none());
    }

    #[test]
    fn test_unparseable_text_becomes_low_confidence_entry() {
        let response = "The fix was to bump the driver version to 3.2.";
        let solution = extract_solution(response).unwrap();
        assert_eq!(solution.confidence, Confidence::Low);
        assert!(solution.summary.contains("couldn't parse"));
        assert_eq!(solution.details, response);
    }

    #[test]
    fn test_fallback_details_are_clipped() {
        let response = "z".repeat(2_000);
        let solution = extract_solution(&response).unwrap();
        assert_eq!(solution.details.chars().count(), 500);
    }

    #[test]
    fn test_thinking_preamble_with_fenced_json_still_parses() {
        let response = format!(
            "<think>The user wants a verdict. Let me check the comments.</think>\n```json\n{}\n```",
            GOOD_VERDICT
        );
        let solution = extract_solution(&response).unwrap();
        assert_eq!(solution.confidence, Confidence::High);
    }

    #[test]
    fn test_strip_fences_prefers_json_fence() {
        let response = "```\nnot this\n```\n```json\n{\"a\":1}\n```";
        assert_eq!(strip_fences(response), "{\"a\":1}");
    }
}
