use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::OllamaError;
use crate::models::OllamaConfig;

/// Ollama API client
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

/// Request body for the Ollama generate endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    options: GenerateOptions,
    stream: bool,
}

/// Sampling options passed with each request
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Response from the generate endpoint (non-streaming)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    total_duration: Option<u64>,
    #[serde(default)]
    eval_count: Option<u64>,
}

impl OllamaClient {
    /// Create a new Ollama client with the given configuration
    pub fn new(config: OllamaConfig) -> Result<Self, OllamaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| OllamaError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Generate a completion for the given prompt.
    ///
    /// - `system_prompt`: Optional system prompt to set model behavior
    /// - `prompt`: The user prompt
    /// - `temperature`: Sampling temperature for this request
    ///
    /// Blocks until the model finishes. The response text is returned as-is;
    /// an empty response is logged but not treated as an error.
    pub async fn generate(
        &self,
        system_prompt: Option<&str>,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, OllamaError> {
        let url = format!("{}/api/generate", self.config.url);

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            system: system_prompt.map(str::to_string),
            options: GenerateOptions { temperature },
            stream: false,
        };

        debug!("Sending generate request to Ollama: {}", url);
        debug!(
            "Using model: {}, prompt length: {} chars, temperature: {}",
            self.config.model,
            prompt.len(),
            temperature
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OllamaError::ConnectionRefused(format!(
                        "Could not connect to Ollama at {}. Is Ollama running?",
                        self.config.url
                    ))
                } else if e.is_timeout() {
                    OllamaError::Timeout(self.config.timeout_seconds)
                } else {
                    OllamaError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::HttpError { status, message });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::ParseError(e.to_string()))?;

        if !parsed.done {
            warn!("Ollama reported an unfinished generation");
        }
        if let Some(duration) = parsed.total_duration {
            debug!("Generation completed in {}ms", duration / 1_000_000);
        }
        if let Some(count) = parsed.eval_count {
            debug!("Tokens generated: {}", count);
        }
        if parsed.response.is_empty() {
            warn!("Model returned an empty response");
        }

        info!("Generated {} characters", parsed.response.len());
        Ok(parsed.response)
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool, OllamaError> {
        let url = format!("{}/api/tags", self.config.url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OllamaError::ConnectionRefused(format!(
                        "Could not connect to Ollama at {}",
                        self.config.url
                    ))
                } else {
                    OllamaError::from(e)
                }
            })?;

        Ok(response.status().is_success())
    }

    /// Check if the specified model is available
    pub async fn check_model(&self) -> Result<bool, OllamaError> {
        let url = format!("{}/api/tags", self.config.url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::ParseError(e.to_string()))?;

        let model_name = &self.config.model;
        let found = tags
            .models
            .iter()
            .any(|m| m.name == *model_name || m.name.starts_with(&format!("{}:", model_name)));

        if !found {
            warn!(
                "Model '{}' not found. Available models: {:?}",
                model_name,
                tags.models.iter().map(|m| &m.name).collect::<Vec<_>>()
            );
        }

        Ok(found)
    }
}
