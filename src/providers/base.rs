//! Base provider trait for Kaiwatore
//!
//! This module defines the CompletionProvider trait that all
//! generative-language providers must implement. The core never assumes
//! structured output from a provider; callers parse the returned free
//! text defensively and map failures to their own fallback values.

use crate::error::Result;
use async_trait::async_trait;

/// Completion provider trait
///
/// A provider turns a single prompt into a single free-text completion.
/// There is no retry policy anywhere: every call failure is surfaced once
/// and the calling component decides its fallback.
///
/// # Examples
///
/// ```no_run
/// use kaiwatore::providers::CompletionProvider;
/// use kaiwatore::error::Result;
/// use async_trait::async_trait;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl CompletionProvider for MyProvider {
///     async fn complete(&self, _prompt: &str) -> Result<String> {
///         Ok("Response".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Completes a single prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt text
    ///
    /// # Returns
    ///
    /// Returns the raw completion text from the provider
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails, the response is malformed,
    /// or the provider has no credentials
    async fn complete(&self, prompt: &str) -> Result<String>;
}
