//! Test utilities for Kaiwatore
//!
//! Deterministic in-memory providers used by the coach and provider
//! tests: a scripted provider that replays queued responses in order,
//! and a provider that fails every call.

use crate::error::Result;
use crate::providers::CompletionProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that replays a fixed queue of responses, one per call
///
/// Calls beyond the queued responses fail, which makes an unexpected
/// extra provider call visible in tests.
///
/// # Examples
///
/// ```
/// use kaiwatore::test_utils::ScriptedProvider;
///
/// let provider = ScriptedProvider::with_responses(["喜び", "ええやん！"]);
/// ```
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedProvider {
    /// Creates a provider that will answer with the given responses in order
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        responses
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("ScriptedProvider: no responses left"))
    }
}

/// Provider that fails every call
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(anyhow::anyhow!("provider unavailable"))
    }
}
