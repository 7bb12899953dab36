//! Gemini provider implementation for Kaiwatore
//!
//! This module implements the CompletionProvider trait against the
//! generative-language REST API (`models/{model}:generateContent`),
//! sending a single user content part and extracting the first
//! candidate's text.

use crate::config::GeminiConfig;
use crate::error::{KaiwatoreError, Result};
use crate::providers::CompletionProvider;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default API base for the generative-language service
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini API provider
///
/// Connects to the generative-language API to generate completions.
/// No timeout is applied to calls and no retry policy exists; a hung
/// provider call hangs the request, and a failed call is reported once
/// to the caller which maps it to a fallback value.
///
/// # Examples
///
/// ```no_run
/// use kaiwatore::config::GeminiConfig;
/// use kaiwatore::providers::{CompletionProvider, GeminiProvider};
///
/// # async fn example() -> kaiwatore::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("key".to_string()),
///     model: "gemini-1.5-flash".to_string(),
///     api_base: None,
/// };
/// let provider = GeminiProvider::new(config)?;
/// let reply = provider.complete("こんにちは").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// Content block in Gemini format
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Text part in Gemini format
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Response body from generateContent
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Single candidate completion
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration containing API key and model
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or a
    /// provider error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(KaiwatoreError::MissingCredentials("gemini".to_string()).into());
        }

        let client = Client::builder()
            .user_agent("kaiwatore/0.1.0")
            .build()
            .map_err(|e| {
                KaiwatoreError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!("Initialized Gemini provider: model={}", config.model);

        Ok(Self { client, config })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the generateContent endpoint URL, honoring `api_base` overrides
    fn endpoint(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!(
            "{}/v1beta/models/{}:generateContent",
            base, self.config.model
        )
    }

    /// Extract the first candidate's text from a response
    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(KaiwatoreError::EmptyCompletion.into());
        }

        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| KaiwatoreError::MissingCredentials("gemini".to_string()))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            "Sending Gemini request: model={}, prompt_chars={}",
            self.config.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                KaiwatoreError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(KaiwatoreError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            KaiwatoreError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        Self::extract_text(body)
    }
}
