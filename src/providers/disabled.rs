//! Disabled provider for credential-less startup
//!
//! When no API key is configured the process still starts, but every
//! completion call fails with `MissingCredentials`. This exercises every
//! fallback path in the coach pipeline, so users get canned replies and
//! summaries instead of errors.

use crate::error::{KaiwatoreError, Result};
use crate::providers::CompletionProvider;
use async_trait::async_trait;

/// Provider that rejects every completion call
///
/// Selected by the factory when the configured provider is "disabled" or
/// when the Gemini API key is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProvider;

#[async_trait]
impl CompletionProvider for DisabledProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(KaiwatoreError::MissingCredentials("gemini".to_string()).into())
    }
}
