//! Provider module for Kaiwatore
//!
//! This module contains the completion provider abstraction and
//! implementations for the Gemini generative-language API, plus a
//! disabled provider used when no credentials are configured.

pub mod base;
pub mod disabled;
pub mod gemini;

pub use base::CompletionProvider;
pub use disabled::DisabledProvider;
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create a provider instance based on configuration
///
/// A missing Gemini API key does not fail startup: it selects the
/// disabled provider, so every completion call fails and the coach
/// components fall back to their canned values.
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a shared provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn CompletionProvider>> {
    match config.provider_type.as_str() {
        "gemini" => {
            if config.gemini.api_key.as_deref().unwrap_or("").is_empty() {
                tracing::warn!(
                    "No Gemini API key configured; completions are disabled and all \
                     coach components will use their fallback paths"
                );
                return Ok(Arc::new(DisabledProvider));
            }
            Ok(Arc::new(GeminiProvider::new(config.gemini.clone())?))
        }
        "disabled" => Ok(Arc::new(DisabledProvider)),
        other => Err(crate::error::KaiwatoreError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}
