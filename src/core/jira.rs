//! Jira REST API client.
//!
//! Talks to the v2 REST endpoints using basic auth (account email plus API
//! token). Search results are paginated; `fetch_issues` walks every page and
//! then collects the comment thread for each issue.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::JiraError;
use crate::models::{Comment, Issue, JiraConfig};

/// Page size requested from the search endpoint
const PAGE_SIZE: usize = 100;
/// Timeout for individual Jira requests
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Fields requested with each search page
const SEARCH_FIELDS: &str = "summary,description,status,issuetype,created,updated";

/// Jira REST API client
pub struct JiraClient {
    client: Client,
    config: JiraConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
struct SearchIssue {
    key: String,
    fields: SearchFields,
}

#[derive(Debug, Deserialize)]
struct SearchFields {
    summary: String,
    #[serde(default)]
    description: Option<String>,
    status: NamedField,
    issuetype: NamedField,
    #[serde(default)]
    created: String,
    #[serde(default)]
    updated: String,
}

#[derive(Debug, Default, Deserialize)]
struct NamedField {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<WireComment>,
}

#[derive(Debug, Deserialize)]
struct WireComment {
    #[serde(default)]
    author: WireAuthor,
    #[serde(default)]
    body: String,
    #[serde(default)]
    created: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireAuthor {
    #[serde(rename = "displayName", default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct MyselfResponse {
    #[serde(rename = "displayName", default)]
    display_name: String,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| JiraError::RequestFailed(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Fetch every issue in a project, newest first.
    ///
    /// When `issue_keys` is given the result is restricted to those keys;
    /// keys that do not exist in the project simply yield nothing.
    pub async fn fetch_issues(
        &self,
        project_key: &str,
        issue_keys: Option<&[String]>,
    ) -> Result<Vec<Issue>, JiraError> {
        let jql = build_jql(project_key);
        info!("Fetching issues for project {}", project_key);

        let mut issues: Vec<Issue> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut start_at = 0usize;

        loop {
            let page = self.search_page(&jql, start_at).await?;
            let page_len = page.issues.len();
            let total = page.total;
            debug!(
                "Search page at offset {}: {} issues (server total {})",
                start_at, page_len, total
            );

            merge_page(&mut issues, &mut seen, page.issues);

            start_at += page_len;
            if !has_more_pages(page_len, PAGE_SIZE, start_at, total) {
                break;
            }
        }

        if let Some(keys) = issue_keys {
            let before = issues.len();
            issues = restrict_to_keys(issues, keys);
            info!(
                "Restricted to {} of {} issues via --issues",
                issues.len(),
                before
            );
        }

        info!("Collecting comments for {} issues", issues.len());
        for issue in &mut issues {
            debug!("Fetching comments for {}", issue.key);
            issue.comments = self.fetch_comments(&issue.key).await?;
        }

        info!("Fetched {} issues", issues.len());
        Ok(issues)
    }

    /// Fetch the comment thread of a single issue.
    pub async fn fetch_comments(&self, issue_key: &str) -> Result<Vec<Comment>, JiraError> {
        let url = format!(
            "{}/rest/api/2/issue/{}/comment",
            self.config.base_url, issue_key
        );
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .query(&[("maxResults", PAGE_SIZE.to_string())])
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let parsed: CommentsResponse = Self::handle_response(response).await?;
        Ok(parsed.comments.into_iter().map(comment_from_wire).collect())
    }

    /// Verify the credentials by fetching the calling account.
    ///
    /// Returns the account's display name on success.
    pub async fn verify_credentials(&self) -> Result<String, JiraError> {
        let url = format!("{}/rest/api/2/myself", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let parsed: MyselfResponse = Self::handle_response(response).await?;
        Ok(parsed.display_name)
    }

    async fn search_page(&self, jql: &str, start_at: usize) -> Result<SearchResponse, JiraError> {
        let url = format!("{}/rest/api/2/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("fields", SEARCH_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        Self::handle_response(response).await
    }

    fn classify_send_error(&self, err: reqwest::Error) -> JiraError {
        if err.is_connect() {
            JiraError::ConnectionFailed(format!(
                "Could not connect to Jira at {}",
                self.config.base_url
            ))
        } else if err.is_timeout() {
            JiraError::Timeout(REQUEST_TIMEOUT_SECS)
        } else {
            JiraError::from(err)
        }
    }

    async fn handle_response<T>(response: reqwest::Response) -> Result<T, JiraError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(JiraError::AuthRejected(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| JiraError::RequestFailed(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                warn!("Failed to parse Jira response: {}", e);
                JiraError::ParseError(e.to_string())
            })
        } else {
            Err(JiraError::HttpError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

fn build_jql(project_key: &str) -> String {
    format!("project = {} ORDER BY created DESC", project_key)
}

/// Whether another search page must be requested.
///
/// A short page means the server ran out of results even if its reported
/// total says otherwise, so exactly ceil(total / page_size) requests are
/// made for a well-behaved server.
fn has_more_pages(page_len: usize, page_size: usize, fetched: usize, total: usize) -> bool {
    page_len == page_size && fetched < total
}

/// Append a page of results, dropping keys already seen.
fn merge_page(issues: &mut Vec<Issue>, seen: &mut HashSet<String>, page: Vec<SearchIssue>) {
    for raw in page {
        if seen.insert(raw.key.clone()) {
            issues.push(issue_from_search(raw));
        } else {
            debug!("Skipping duplicate issue {}", raw.key);
        }
    }
}

fn restrict_to_keys(issues: Vec<Issue>, keys: &[String]) -> Vec<Issue> {
    let wanted: HashSet<String> = keys.iter().map(|k| k.trim().to_uppercase()).collect();
    issues
        .into_iter()
        .filter(|issue| wanted.contains(&issue.key.to_uppercase()))
        .collect()
}

fn issue_from_search(raw: SearchIssue) -> Issue {
    Issue {
        key: raw.key,
        title: raw.fields.summary,
        description: raw.fields.description.unwrap_or_default(),
        status: raw.fields.status.name,
        issue_type: raw.fields.issuetype.name,
        created: raw.fields.created,
        updated: raw.fields.updated,
        comments: Vec::new(),
    }
}

fn comment_from_wire(raw: WireComment) -> Comment {
    Comment {
        author: raw.author.display_name,
        body: raw.body,
        created: raw.created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_issue(key: &str) -> SearchIssue {
        SearchIssue {
            key: key.to_string(),
            fields: SearchFields {
                summary: format!("Title of {}", key),
                description: Some("A description".to_string()),
                status: NamedField {
                    name: "Done".to_string(),
                },
                issuetype: NamedField {
                    name: "Bug".to_string(),
                },
                created: "2026-01-10T09:00:00.000+0000".to_string(),
                updated: "2026-01-12T15:30:00.000+0000".to_string(),
            },
        }
    }

    #[test]
    fn test_build_jql() {
        assert_eq!(build_jql("DEMO"), "project = DEMO ORDER BY created DESC");
    }

    #[test]
    fn test_has_more_pages() {
        // full page, more reported: keep going
        assert!(has_more_pages(100, 100, 100, 250));
        // full page but total reached: stop (exact multiple of the page size)
        assert!(!has_more_pages(100, 100, 200, 200));
        // short page always stops, even when the total claims more
        assert!(!has_more_pages(50, 100, 150, 300));
        // empty page stops
        assert!(!has_more_pages(0, 100, 0, 0));
    }

    #[test]
    fn test_merge_page_dedupes_and_keeps_order() {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        merge_page(
            &mut issues,
            &mut seen,
            vec![
                search_issue("DEMO-2"),
                search_issue("DEMO-1"),
                search_issue("DEMO-2"),
            ],
        );
        merge_page(&mut issues, &mut seen, vec![search_issue("DEMO-1")]);

        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["DEMO-2", "DEMO-1"]);
    }

    #[test]
    fn test_restrict_to_keys() {
        let issues = vec![
            issue_from_search(search_issue("DEMO-1")),
            issue_from_search(search_issue("DEMO-2")),
            issue_from_search(search_issue("DEMO-3")),
        ];
        let keys = vec!["demo-3".to_string(), " DEMO-1 ".to_string()];
        let kept = restrict_to_keys(issues, &keys);
        let kept_keys: Vec<&str> = kept.iter().map(|i| i.key.as_str()).collect();
        // fetch order preserved, matching case-insensitively
        assert_eq!(kept_keys, vec!["DEMO-1", "DEMO-3"]);
    }

    #[test]
    fn test_restrict_to_unknown_keys_yields_nothing() {
        let issues = vec![issue_from_search(search_issue("DEMO-1"))];
        let keys = vec!["DEMO-99".to_string()];
        assert!(restrict_to_keys(issues, &keys).is_empty());
    }

    #[test]
    fn test_search_response_deserializes() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 100,
            "total": 1,
            "issues": [
                {
                    "key": "DEMO-1",
                    "fields": {
                        "summary": "Fix login bug",
                        "description": null,
                        "status": {"name": "Done"},
                        "issuetype": {"name": "Bug"},
                        "created": "2026-01-10T09:00:00.000+0000",
                        "updated": "2026-01-12T15:30:00.000+0000"
                    }
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.total, 1);
        assert_eq!(parsed.issues.len(), 1);

        let issue = issue_from_search(parsed.issues.into_iter().next().unwrap());
        assert_eq!(issue.key, "DEMO-1");
        assert_eq!(issue.title, "Fix login bug");
        // null description becomes empty, not an error
        assert_eq!(issue.description, "");
        assert_eq!(issue.status, "Done");
        assert_eq!(issue.issue_type, "Bug");
    }

    #[test]
    fn test_comments_response_deserializes() {
        let json = r#"{
            "comments": [
                {
                    "author": {"displayName": "Dana Developer"},
                    "body": "Fixed by clearing the cache.",
                    "created": "2026-01-11T10:00:00.000+0000"
                },
                {
                    "body": "No author on this one"
                }
            ]
        }"#;
        let parsed: CommentsResponse = serde_json::from_str(json).unwrap();
        let comments: Vec<Comment> = parsed.comments.into_iter().map(comment_from_wire).collect();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author, "Dana Developer");
        assert_eq!(comments[0].body, "Fixed by clearing the cache.");
        // anonymous comment falls back to an empty author
        assert_eq!(comments[1].author, "");
    }
}
