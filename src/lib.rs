#![allow(dead_code)]
//! JiraDocs - turn a Jira project's history into PDF documentation with a local LLM
//!
//! JiraDocs is a CLI tool that fetches every issue of a Jira project and asks
//! a locally hosted Ollama model to analyze each one, rendering the results
//! into a timestamped PDF report. It has two report modes: full project
//! documentation and a FAQ built from issues whose threads contain a solution.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (docs, faq, check)
//! - **core**: Core functionality (jira client, ollama client, prompts, parser, runner, report, pdf)
//! - **models**: Data structures (config, issue, analysis)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{JiraDocsError, Result};
