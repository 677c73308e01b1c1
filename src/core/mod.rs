pub mod config;
pub mod jira;
pub mod ollama;
pub mod parser;
pub mod pdf;
pub mod prompts;
pub mod report;
pub mod runner;

pub use config::*;
pub use jira::*;
pub use ollama::*;
pub use parser::*;
pub use pdf::*;
pub use prompts::*;
pub use report::*;
pub use runner::*;
